//! 认证模块
//!
//! - `SessionContext`: 会话标志，由应用根创建并显式注入路由服务和登录页
//! - `AdminIdentity`: 构建期配置的管理员身份
//! - `LoginForm`: 登录状态机 `Idle -> Validating -> Authenticated | Rejected`
//!
//! 登录完全在本地完成，不发起任何远程调用。

use catalog_shared::Credentials;
use leptos::prelude::*;
use log::info;

use crate::validation::{FormErrors, validate_credentials};
use crate::web::route::AppRoute;

/// 会话上下文
///
/// 只持有一个认证标志，不做任何持久化，刷新页面即回到未认证。
#[derive(Clone, Copy)]
pub struct SessionContext {
    authenticated: RwSignal<bool>,
}

impl SessionContext {
    /// 创建新的会话（未认证）
    pub fn new() -> Self {
        Self {
            authenticated: RwSignal::new(false),
        }
    }

    pub fn login(&self) {
        self.authenticated.set(true);
    }

    /// 注销
    ///
    /// 导航由路由服务监听认证状态自动处理。
    pub fn logout(&self) {
        self.authenticated.set(false);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.get_untracked()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.authenticated.into()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 管理员身份
///
/// 未配置的身份永远不会匹配。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminIdentity {
    username: Option<String>,
    password: Option<String>,
}

impl AdminIdentity {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// 区分大小写、不做 trim，两个字段必须同时相等
    pub fn matches(&self, credentials: &Credentials) -> bool {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                *username == credentials.username && *password == credentials.password
            }
            _ => false,
        }
    }
}

// =========================================================
// 登录状态机
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Validating,
    Authenticated,
    Rejected,
}

/// 一次登录提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// 存在空字段，错误已写入表单
    Invalid,
    /// 凭据不匹配
    Rejected,
    /// 会话已建立，调用方应以 replace 方式导航到 `redirect`
    Authenticated { redirect: AppRoute },
}

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// 登录表单状态
#[derive(Clone, Copy)]
pub struct LoginForm {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub errors: RwSignal<FormErrors>,
    pub phase: RwSignal<LoginPhase>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            errors: RwSignal::new(FormErrors::new()),
            phase: RwSignal::new(LoginPhase::Idle),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.get_untracked(),
            password: self.password.get_untracked(),
        }
    }

    /// 提交登录
    pub fn submit(&self, session: &SessionContext, identity: &AdminIdentity) -> LoginOutcome {
        self.phase.set(LoginPhase::Validating);
        let credentials = self.credentials();

        let errors = validate_credentials(&credentials);
        if !errors.is_empty() {
            self.errors.set(errors);
            self.phase.set(LoginPhase::Idle);
            return LoginOutcome::Invalid;
        }

        if identity.matches(&credentials) {
            info!("login accepted for {}", credentials.username);
            self.errors.set(FormErrors::new());
            session.login();
            self.phase.set(LoginPhase::Authenticated);
            LoginOutcome::Authenticated {
                redirect: AppRoute::auth_success_redirect(),
            }
        } else {
            info!("login rejected for {}", credentials.username);
            self.errors.set(FormErrors::general(INVALID_CREDENTIALS));
            self.phase.set(LoginPhase::Rejected);
            LoginOutcome::Rejected
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}
