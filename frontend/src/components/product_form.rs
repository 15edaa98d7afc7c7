pub mod form_state;
pub mod previews;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::HtmlInputElement;

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use form_state::{
    FIELD_IMAGES, FIELD_NAME, FIELD_PRICE, FIELD_SKU, FormMode, ProductField, ProductForm,
    SubmitOutcome,
};
use previews::ObjectUrlRegistry;

/// 读取 file input 当前选中的全部文件
fn selected_files(input: &HtmlInputElement) -> Vec<leptos::web_sys::File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// 新建 / 编辑商品页面
#[component]
pub fn ProductFormPage(product_id: Option<u64>) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let form = ProductForm::new(product_id, ObjectUrlRegistry);
    let (selection_error, set_selection_error) = signal(Option::<String>::None);

    // 挂载时加载（仅编辑模式会发请求）
    {
        let api = api.clone();
        spawn_local(async move {
            form.mount(&api).await;
        });
    }

    // 组件销毁时释放本地预览
    on_cleanup(move || form.teardown());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            if let SubmitOutcome::Saved { redirect } = form.submit(&api).await {
                router.replace(redirect);
            }
        });
    };

    let on_files = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        match form.select_images(&selected_files(&input)) {
            Ok(()) => set_selection_error.set(None),
            Err(e) => set_selection_error.set(Some(e.to_string())),
        }
    };

    let loading = move || form.loading.get();
    let field_error = move |field: &'static str| {
        move || form.errors.with(|errors| errors.field(field).map(str::to_string))
    };
    let title = match form.mode() {
        FormMode::Create => "Add Product",
        FormMode::Edit(_) => "Edit Product",
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="card max-w-xl mx-auto bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title">{title}</h2>

                    <Show when=move || form.api_error.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || form.api_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="sku" class="label">
                            <span class="label-text">"SKU"</span>
                        </label>
                        <input id="sku" type="text"
                            class="input input-bordered w-full"
                            disabled=loading
                            prop:value=move || form.values.with(|v| v.sku.clone())
                            on:input=move |ev| form.set_field(ProductField::Sku, event_target_value(&ev))
                        />
                        <FieldError message=Signal::derive(field_error(FIELD_SKU)) />
                    </div>

                    <div class="form-control">
                        <label for="name" class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input id="name" type="text"
                            class="input input-bordered w-full"
                            disabled=loading
                            prop:value=move || form.values.with(|v| v.name.clone())
                            on:input=move |ev| form.set_field(ProductField::Name, event_target_value(&ev))
                        />
                        <FieldError message=Signal::derive(field_error(FIELD_NAME)) />
                    </div>

                    <div class="form-control">
                        <label for="price" class="label">
                            <span class="label-text">"Price"</span>
                        </label>
                        <input id="price" type="text" inputmode="decimal"
                            class="input input-bordered w-full"
                            disabled=loading
                            prop:value=move || form.values.with(|v| v.price.clone())
                            on:input=move |ev| form.set_field(ProductField::Price, event_target_value(&ev))
                        />
                        <FieldError message=Signal::derive(field_error(FIELD_PRICE)) />
                    </div>

                    <div class="form-control">
                        <label for="images" class="label">
                            <span class="label-text">"Images"</span>
                        </label>
                        <input id="images" type="file" accept="image/*" multiple
                            class="file-input file-input-bordered w-full"
                            disabled=loading
                            on:change=on_files
                        />
                        <FieldError message=Signal::derive(field_error(FIELD_IMAGES)) />
                        <FieldError message=selection_error />
                    </div>

                    <div class="flex flex-wrap gap-2">
                        <For
                            each=move || form.preview_entries()
                            key=|(i, url)| (*i, url.clone())
                            children=|(_, url)| view! {
                                <img src=url class="h-20 w-20 object-cover rounded-lg" />
                            }
                        />
                    </div>

                    <div class="card-actions justify-end mt-4">
                        <Link to=AppRoute::Products>
                            <span class="btn btn-ghost">"Cancel"</span>
                        </Link>
                        <button type="submit" class="btn btn-primary" disabled=loading>
                            {move || if loading() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// 字段下方的错误提示
#[component]
fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <label class="label">
                <span class="label-text-alt text-error">{move || message.get().unwrap_or_default()}</span>
            </label>
        </Show>
    }
}
