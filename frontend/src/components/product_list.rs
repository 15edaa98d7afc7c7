pub mod collection;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_session;
use crate::web::dialog;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use collection::{ProductCollection, RemoveOutcome};

#[component]
pub fn ProductListPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let session = use_session();
    let collection = ProductCollection::new();

    // 初始加载
    {
        let api = api.clone();
        spawn_local(async move {
            collection.refresh(&api).await;
        });
    }

    let handle_refresh = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                collection.refresh(&api).await;
            });
        }
    };

    let handle_delete = move |id: u64| {
        let api = api.clone();
        spawn_local(async move {
            if let RemoveOutcome::Failed(message) = collection.remove(&api, id, dialog::confirm).await
            {
                dialog::alert(&message);
            }
        });
    };

    // 注销后由路由服务负责离开本页
    let on_logout = move |_| session.logout();

    let is_empty = move || collection.products.with(|p| p.is_empty());
    let loading = move || collection.loading.get();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1">
                        <a class="btn btn-ghost text-xl">"Products"</a>
                    </div>
                    <div class="flex-none gap-2">
                        <button class="btn btn-primary" on:click=move |_| router.push(AppRoute::ProductCreate)>
                            "Add Product"
                        </button>
                        <button class="btn btn-outline btn-error" on:click=on_logout>
                            "Logout"
                        </button>
                    </div>
                </div>

                <Show when=move || collection.error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || collection.error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-end p-4 pb-0">
                            <button on:click=handle_refresh disabled=loading class="btn btn-ghost btn-sm">
                                "Refresh"
                            </button>
                        </div>
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"SKU"</th>
                                        <th>"Name"</th>
                                        <th>"Price"</th>
                                        <th>"Images"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || loading() && is_empty()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || collection.shows_empty_notice()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No products yet."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || collection.products.get()
                                        key=|p| p.id
                                        children=move |product| {
                                            let id = product.id;
                                            let handle_delete = handle_delete.clone();
                                            view! {
                                                <tr>
                                                    <td class="font-mono text-sm">{product.sku}</td>
                                                    <td>{product.name}</td>
                                                    <td>{format!("{:.2}", product.price)}</td>
                                                    <td>
                                                        <div class="flex gap-1">
                                                            {product.images.into_iter().map(|url| view! {
                                                                <img src=url class="h-10 w-10 object-cover rounded" />
                                                            }).collect_view()}
                                                        </div>
                                                    </td>
                                                    <td class="flex gap-2 justify-end">
                                                        <button class="btn btn-ghost btn-sm"
                                                            on:click=move |_| router.push(AppRoute::ProductEdit(id))
                                                        >
                                                            "Edit"
                                                        </button>
                                                        <button class="btn btn-ghost btn-sm text-error"
                                                            on:click=move |_| handle_delete(id)
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
