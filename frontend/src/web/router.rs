//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，
//! 验证步骤委托给纯函数 `route::resolve`。

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, HistoryMode, Navigation, resolve, resolve_path};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 被守卫拦截的原始目标
///
/// 每次被拦截都会覆盖旧值，取出即清除。
#[derive(Clone, Copy)]
pub struct ReturnTarget(RwSignal<Option<AppRoute>>);

impl ReturnTarget {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    /// 记录一次导航中被拦截的目标（未拦截时保持原值）
    pub fn record(&self, navigation: &Navigation) {
        if let Some(blocked) = navigation.blocked {
            self.0.set(Some(blocked));
        }
    }

    pub fn take(&self) -> Option<AppRoute> {
        self.0.try_update(|target| target.take()).flatten()
    }
}

impl Default for ReturnTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与会话的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
    /// 被守卫拦截的原始目标
    return_to: ReturnTarget,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由外部注入实现解耦
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始值只是占位，`resolve_current` 会立即按守卫规则修正
        let initial_route = AppRoute::from_path(&current_path()).unwrap_or(AppRoute::fallback());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            return_to: ReturnTarget::new(),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 取出并清除保留的原始目标
    pub fn take_return_target(&self) -> Option<AppRoute> {
        self.return_to.take()
    }

    pub fn push(&self, route: AppRoute) {
        self.go(route, HistoryMode::Push);
    }

    pub fn replace(&self, route: AppRoute) {
        self.go(route, HistoryMode::Replace);
    }

    /// 导航到指定路由
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    fn go(&self, target: AppRoute, mode: HistoryMode) {
        let is_auth = self.is_authenticated.get_untracked();
        self.apply(resolve(target, mode, is_auth));
    }

    fn apply(&self, navigation: Navigation) {
        if let Some(from) = navigation.blocked {
            info!(
                "[Router] Access denied to {}. Redirecting to {}.",
                from, navigation.route
            );
        } else {
            debug!(
                "[Router] Navigating to {} ({:?}).",
                navigation.route, navigation.mode
            );
        }
        self.return_to.record(&navigation);

        let path = navigation.route.to_path();
        match navigation.mode {
            HistoryMode::Push => push_history_state(&path),
            HistoryMode::Replace => replace_history_state(&path),
        }
        self.set_route.set(navigation.route);
    }

    /// 按当前地址栏解析路由（首次加载、后退/前进）
    fn resolve_current(&self) {
        let is_auth = self.is_authenticated.get_untracked();
        self.apply(resolve_path(&current_path(), HistoryMode::Replace, is_auth));
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        // popstate 时也执行守卫逻辑
        let closure = Closure::<dyn Fn()>::new(move || router.resolve_current());

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活（路由服务与应用同寿命）
        closure.forget();
    }

    /// 会话失效时离开受保护页面
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if !is_auth && route.requires_auth() {
                info!("[Router] Session ended, leaving {}.", route);
                router.go(route, HistoryMode::Replace);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.resolve_current();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.push(to);
    };

    view! {
        <a href=to.to_path() on:click=on_click>
            {children()}
        </a>
    }
}
