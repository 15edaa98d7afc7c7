//! 商品列表视图模型
//!
//! 列表只在服务端确认后才变化：刷新整体替换，删除在成功响应后才移除对应记录。

use catalog_shared::Product;
use leptos::prelude::*;
use log::{info, warn};

use crate::api::CatalogApi;
use crate::web::HttpClient;

pub const FETCH_FAILED: &str = "Failed to fetch products";
pub const DELETE_FAILED: &str = "Failed to delete product";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this product?";

/// 删除操作的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// 用户取消，没有发出请求
    Declined,
    Removed,
    /// 删除失败，携带应弹出的提示
    Failed(String),
}

#[derive(Clone, Copy)]
pub struct ProductCollection {
    pub products: RwSignal<Vec<Product>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ProductCollection {
    /// 初始处于加载中，挂载后立即 `refresh`
    pub fn new() -> Self {
        Self {
            products: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
        }
    }

    /// 重新拉取整个列表
    pub async fn refresh<C: HttpClient>(&self, api: &CatalogApi<C>) {
        self.loading.set(true);
        self.error.set(None);

        match api.list_products().await {
            Ok(products) => self.products.set(products),
            Err(e) => {
                warn!("loading products failed: {}", e);
                self.products.set(Vec::new());
                self.error.set(Some(FETCH_FAILED.to_string()));
            }
        }

        self.loading.set(false);
    }

    /// 加载结束、没有错误且列表为空时才显示空列表提示
    pub fn shows_empty_notice(&self) -> bool {
        !self.loading.get()
            && self.error.with(Option::is_none)
            && self.products.with(Vec::is_empty)
    }

    /// 删除一条记录
    ///
    /// `confirm` 收到确认文案，返回 `false` 时不发请求。
    pub async fn remove<C: HttpClient>(
        &self,
        api: &CatalogApi<C>,
        id: u64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> RemoveOutcome {
        if !confirm(DELETE_CONFIRM) {
            return RemoveOutcome::Declined;
        }

        match api.delete_product(id).await {
            Ok(()) => {
                info!("product {} deleted", id);
                self.products.update(|list| list.retain(|p| p.id != id));
                RemoveOutcome::Removed
            }
            Err(e) => {
                warn!("deleting product {} failed: {}", id, e);
                RemoveOutcome::Failed(DELETE_FAILED.to_string())
            }
        }
    }
}

impl Default for ProductCollection {
    fn default() -> Self {
        Self::new()
    }
}
