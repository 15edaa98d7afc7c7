//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、路由属性以及守卫判定。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 注册页面
    Signup,
    /// 新建商品 (需要认证)
    ProductCreate,
    /// 编辑商品 (需要认证)
    ProductEdit(u64),
    /// 商品列表 (需要认证)
    Products,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 无法匹配时返回 `None`，由路由服务重定向到 `fallback()`。
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            "/form" => Some(Self::ProductCreate),
            "/products" => Some(Self::Products),
            _ => trimmed
                .strip_prefix("/form/")
                .and_then(|id| id.parse().ok())
                .map(Self::ProductEdit),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::ProductCreate => "/form".to_string(),
            Self::ProductEdit(id) => format!("/form/{}", id),
            Self::Products => "/products".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::ProductCreate | Self::ProductEdit(_) | Self::Products
        )
    }

    /// 未匹配路径的去向
    pub fn fallback() -> Self {
        Self::Products
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Products
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 放行
    Allow(AppRoute),
    /// 重定向到 `to`，并保留原始请求 `from` 以便登录后返回
    Redirect { to: AppRoute, from: AppRoute },
}

/// 守卫：(认证状态, 目标路由) 的纯函数
pub fn guard(target: AppRoute, is_authenticated: bool) -> GuardOutcome {
    if target.requires_auth() && !is_authenticated {
        GuardOutcome::Redirect {
            to: AppRoute::auth_failure_redirect(),
            from: target,
        }
    } else {
        GuardOutcome::Allow(target)
    }
}

/// History 写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    /// 替换当前条目，后退按钮不会回到被替换的页面
    Replace,
}

/// 一次导航的最终决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// 实际进入的路由
    pub route: AppRoute,
    pub mode: HistoryMode,
    /// 被守卫拦截的原始目标，需要记录下来
    pub blocked: Option<AppRoute>,
}

/// 对目标路由应用守卫
///
/// 重定向总是以 replace 方式写入 History。
pub fn resolve(target: AppRoute, mode: HistoryMode, is_authenticated: bool) -> Navigation {
    match guard(target, is_authenticated) {
        GuardOutcome::Allow(route) => Navigation {
            route,
            mode,
            blocked: None,
        },
        GuardOutcome::Redirect { to, from } => Navigation {
            route: to,
            mode: HistoryMode::Replace,
            blocked: Some(from),
        },
    }
}

/// 按 path 解析并应用守卫，未匹配的 path 以 replace 方式落到 `AppRoute::fallback()`
pub fn resolve_path(path: &str, mode: HistoryMode, is_authenticated: bool) -> Navigation {
    match AppRoute::from_path(path) {
        Some(route) => resolve(route, mode, is_authenticated),
        None => resolve(AppRoute::fallback(), HistoryMode::Replace, is_authenticated),
    }
}
