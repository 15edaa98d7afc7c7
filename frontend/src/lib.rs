//! 商品目录管理前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话与登录状态机
//! - `api`: 类型化 REST 客户端
//! - `components`: UI 组件层，每个页面的状态机与视图分离，状态机可在原生测试中驱动

mod api;
mod auth;
mod config;
mod error;
mod validation;
mod components {
    pub mod login;
    pub mod product_form;
    pub mod product_list;
    pub mod signup;
}
pub(crate) mod web;

pub use config::AppConfig;

use crate::api::WebApi;
use crate::auth::SessionContext;
use crate::components::login::LoginPage;
use crate::components::product_form::ProductFormPage;
use crate::components::product_list::ProductListPage;
use crate::components::signup::SignupPage;

use leptos::prelude::*;
use log::warn;

use web::FetchClient;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Products => view! { <ProductListPage /> }.into_any(),
        AppRoute::ProductCreate => view! { <ProductFormPage product_id=None /> }.into_any(),
        AppRoute::ProductEdit(id) => view! { <ProductFormPage product_id=Some(id) /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 会话上下文
    let session = SessionContext::new();
    provide_context(session);

    if !config.admin.is_configured() {
        warn!("admin identity is not configured, every login attempt will be rejected");
    }

    // 2. API 客户端
    let api = WebApi::new(config.api_base.clone(), FetchClient);
    provide_context(api);
    provide_context(config);

    // 3. 认证状态信号注入路由服务
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
