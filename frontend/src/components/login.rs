use leptos::prelude::*;
use log::info;

use crate::auth::{LoginForm, LoginOutcome, use_session};
use crate::config::use_config;
use crate::validation::{FIELD_PASSWORD, FIELD_USERNAME};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let identity = use_config().admin;
    let form = LoginForm::new();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if let LoginOutcome::Authenticated { redirect } = form.submit(&session, &identity) {
            // 被拦截的原始目标只做记录，登录后统一进入商品列表
            if let Some(target) = router.take_return_target() {
                info!("login completed, originally requested {}", target);
            }
            router.replace(redirect);
        }
    };

    let general_error = move || form.errors.with(|e| e.general_message().map(str::to_string));
    let field_error =
        move |field: &'static str| move || form.errors.with(|e| e.field(field).map(str::to_string));

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Product Catalog"</h1>
                    <p class="text-base-content/70">"Sign in to manage products"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || general_error().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || general_error().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                class="input input-bordered"
                                prop:value=form.username
                                on:input=move |ev| form.username.set(event_target_value(&ev))
                            />
                            <span class="label-text-alt text-error">{field_error(FIELD_USERNAME)}</span>
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                class="input input-bordered"
                                prop:value=form.password
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                            />
                            <span class="label-text-alt text-error">{field_error(FIELD_PASSWORD)}</span>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary">"Log In"</button>
                        </div>
                        <p class="text-sm text-center">
                            "No account yet? "
                            <Link to=AppRoute::Signup>"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
