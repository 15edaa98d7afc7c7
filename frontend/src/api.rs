use catalog_shared::protocol::{
    ApiRequest, CreateProductRequest, DeleteProductRequest, GetProductRequest,
    ListProductsRequest, SignupRequest, UpdateProductRequest,
};
use catalog_shared::{Credentials, ErrorBody, Product, ProductPayload};
use leptos::prelude::*;
use log::{debug, warn};

use crate::error::ApiError;
use crate::web::{FetchClient, HttpClient, HttpRequest};

/// 浏览器中使用的 API 客户端
pub type WebApi = CatalogApi<FetchClient>;

/// 商品目录 REST 客户端
///
/// 传输层由 `HttpClient` 注入，业务层只关心类型化的请求。
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogApi<C> {
    pub base_url: String,
    client: C,
}

impl<C: HttpClient> CatalogApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送一个类型化请求
    ///
    /// 非 2xx 响应会尝试解析 `{ "message": ... }` 作为服务端消息。
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let path = request.path();
        let mut req = HttpRequest::new(&self.url(&path), R::METHOD);
        if let Some(body) = request.body() {
            let json = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            req = req.with_json_body(json);
        }

        let res = self.client.send(req).await.map_err(|e| {
            warn!("{} {} failed: {}", R::METHOD.as_str(), path, e);
            ApiError::from(e)
        })?;

        if !res.ok() {
            warn!("{} {} responded {}", R::METHOD.as_str(), path, res.status);
            let message = serde_json::from_str::<ErrorBody>(&res.body)
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Status {
                status: res.status,
                message,
            });
        }

        debug!("{} {} -> {}", R::METHOD.as_str(), path, res.status);
        R::decode(&res.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 获取商品列表
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.execute(&ListProductsRequest).await
    }

    /// 获取单个商品
    pub async fn get_product(&self, id: u64) -> Result<Product, ApiError> {
        self.execute(&GetProductRequest { id }).await
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<(), ApiError> {
        self.execute(&CreateProductRequest { payload }).await
    }

    pub async fn update_product(&self, id: u64, payload: ProductPayload) -> Result<(), ApiError> {
        self.execute(&UpdateProductRequest { id, payload }).await
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        self.execute(&DeleteProductRequest { id }).await
    }

    /// 注册新账号
    pub async fn signup(&self, credentials: Credentials) -> Result<(), ApiError> {
        self.execute(&SignupRequest { credentials }).await
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> WebApi {
    use_context::<WebApi>().expect("WebApi should be provided")
}
