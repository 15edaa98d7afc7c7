use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const PATH_PRODUCTS: &str = "/api/products";
pub const PATH_SIGNUP: &str = "/api/signup";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 由后端持有的商品记录，`id` 只由服务端分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn resource_path(id: u64) -> String {
        format!("{}/{}", PATH_PRODUCTS, id)
    }
}

/// 创建 / 更新商品时提交的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub images: Vec<String>,
}

/// 用户名 + 密码，仅在表单提交期间存在
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 失败响应中可选的 `message` 字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
