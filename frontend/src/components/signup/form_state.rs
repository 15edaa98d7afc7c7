//! 注册表单状态
//!
//! 与登录共用必填校验；提交走远程 `POST /api/signup`，由 `loading` 保证单飞。

use catalog_shared::Credentials;
use leptos::prelude::*;
use log::{info, warn};

use crate::api::CatalogApi;
use crate::error::ApiError;
use crate::validation::{FormErrors, validate_credentials};
use crate::web::HttpClient;
use crate::web::route::AppRoute;

pub const SIGNUP_FAILED: &str = "Signup failed";
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Busy,
    Invalid,
    /// 注册成功，调用方应导航到 `redirect`
    Registered { redirect: AppRoute },
    /// 失败信息已写入通用错误
    Failed,
}

/// 把远程失败转换为用户可见的文本
fn failure_message(err: &ApiError) -> String {
    if err.is_transport() {
        return NETWORK_ERROR.to_string();
    }
    err.server_message().unwrap_or(SIGNUP_FAILED).to_string()
}

#[derive(Clone, Copy)]
pub struct SignupForm {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub errors: RwSignal<FormErrors>,
    pub loading: RwSignal<bool>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            errors: RwSignal::new(FormErrors::new()),
            loading: RwSignal::new(false),
        }
    }

    pub async fn submit<C: HttpClient>(&self, api: &CatalogApi<C>) -> SignupOutcome {
        if self.loading.get_untracked() {
            return SignupOutcome::Busy;
        }

        let credentials = Credentials {
            username: self.username.get_untracked(),
            password: self.password.get_untracked(),
        };
        let errors = validate_credentials(&credentials);
        if !errors.is_empty() {
            self.errors.set(errors);
            return SignupOutcome::Invalid;
        }
        self.errors.set(FormErrors::new());

        let username = credentials.username.clone();
        self.loading.set(true);
        let result = api.signup(credentials).await;
        self.loading.set(false);

        match result {
            Ok(()) => {
                info!("account {} registered", username);
                SignupOutcome::Registered {
                    redirect: AppRoute::Login,
                }
            }
            Err(e) => {
                warn!("signup for {} failed: {}", username, e);
                self.errors.set(FormErrors::general(failure_message(&e)));
                SignupOutcome::Failed
            }
        }
    }
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FIELD_PASSWORD, FIELD_USERNAME};
    use crate::web::MockHttpClient;
    use catalog_shared::protocol::HttpMethod;
    use serde_json::json;

    fn api() -> CatalogApi<MockHttpClient> {
        CatalogApi::new("", MockHttpClient::new())
    }

    fn filled(username: &str, password: &str) -> SignupForm {
        let form = SignupForm::new();
        form.username.set(username.to_string());
        form.password.set(password.to_string());
        form
    }

    #[tokio::test]
    async fn test_empty_fields_send_nothing() {
        let api = api();
        let form = filled("", "");

        assert_eq!(form.submit(&api).await, SignupOutcome::Invalid);

        let errors = form.errors.get_untracked();
        assert_eq!(errors.field(FIELD_USERNAME), Some("Username is required"));
        assert_eq!(errors.field(FIELD_PASSWORD), Some("Password is required"));
        assert!(errors.general_message().is_none());
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_success_posts_credentials_and_goes_to_login() {
        let api = api();
        api.client().mock_empty(HttpMethod::Post, "/api/signup", 201);
        let form = filled("alice", "pw");

        let outcome = form.submit(&api).await;

        assert_eq!(
            outcome,
            SignupOutcome::Registered {
                redirect: AppRoute::Login
            }
        );
        let req = api.client().last_request().unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "username": "alice", "password": "pw" }));
        assert!(!form.loading.get_untracked());
    }

    #[tokio::test]
    async fn test_server_message_is_shown() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Post,
            "/api/signup",
            409,
            json!({ "message": "Username already taken" }),
        );
        let form = filled("alice", "pw");

        assert_eq!(form.submit(&api).await, SignupOutcome::Failed);
        assert_eq!(
            form.errors.get_untracked().general_message(),
            Some("Username already taken")
        );
    }

    #[tokio::test]
    async fn test_failure_without_message_is_generic() {
        let api = api();
        api.client()
            .mock_response(HttpMethod::Post, "/api/signup", 500, json!({}));
        let form = filled("alice", "pw");

        form.submit(&api).await;

        assert_eq!(
            form.errors.get_untracked().general_message(),
            Some(SIGNUP_FAILED)
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let api = api();
        api.client()
            .mock_network_error(HttpMethod::Post, "/api/signup");
        let form = filled("alice", "pw");

        form.submit(&api).await;

        assert_eq!(
            form.errors.get_untracked().general_message(),
            Some(NETWORK_ERROR)
        );
        assert!(!form.loading.get_untracked());
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_request() {
        let api = api();
        api.client().mock_empty(HttpMethod::Post, "/api/signup", 200);
        let form = filled("alice", "pw");

        let (first, second) = futures::join!(form.submit(&api), form.submit(&api));

        assert!(matches!(first, SignupOutcome::Registered { .. }));
        assert_eq!(second, SignupOutcome::Busy);
        assert_eq!(api.client().request_count(), 1);
    }
}
