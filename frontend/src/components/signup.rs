pub mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::validation::{FIELD_PASSWORD, FIELD_USERNAME};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use form_state::{SignupForm, SignupOutcome};

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let form = SignupForm::new();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            if let SignupOutcome::Registered { redirect } = form.submit(&api).await {
                router.push(redirect);
            }
        });
    };

    let general_error = move || form.errors.with(|e| e.general_message().map(str::to_string));
    let field_error =
        move |field: &'static str| move || form.errors.with(|e| e.field(field).map(str::to_string));
    let loading = move || form.loading.get();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Create Account"</h1>

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
                                class="input input-bordered"
                                prop:value=form.password
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                            />
                            <span class="label-text-alt text-error">{field_error(FIELD_PASSWORD)}</span>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=loading>
                                {move || if loading() {
                                    view! { <span class="loading loading-spinner"></span> "Signing up..." }.into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "Already have an account? "
                            <Link to=AppRoute::Login>"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
