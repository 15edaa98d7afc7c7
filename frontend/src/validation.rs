//! 表单错误模型
//!
//! 字段错误是稀疏的：没有对应的键即表示该字段有效。
//! 每次校验都整体重新生成，从不与旧结果合并。

use std::collections::BTreeMap;

use catalog_shared::Credentials;

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PASSWORD: &str = "password";

/// 一次校验得到的全部错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
    general: Option<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只包含一条通用错误
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: Some(message.into()),
        }
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn general_message(&self) -> Option<&str> {
        self.general.as_deref()
    }

    #[cfg(test)]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }
}

/// 用户名、密码必填校验（登录与注册共用）
pub fn validate_credentials(credentials: &Credentials) -> FormErrors {
    let mut errors = FormErrors::new();
    if credentials.username.is_empty() {
        errors.insert(FIELD_USERNAME, "Username is required");
    }
    if credentials.password.is_empty() {
        errors.insert(FIELD_PASSWORD, "Password is required");
    }
    errors
}
