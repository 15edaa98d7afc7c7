//! 商品表单状态机
//!
//! 统一新建 / 编辑两种流程：
//!
//! ```text
//! Idle -> (Loading, 仅编辑模式) -> Ready -> Validating -> Submitting -> Saved | Failed
//! ```
//!
//! 负责：
//! - 字段值的持有（价格在编辑期间保持文本）
//! - 整批校验
//! - 本地图片预览的获取与释放
//! - 远程加载与保存，`loading` 标志保证同一表单不会并发提交

use catalog_shared::ProductPayload;
use leptos::prelude::*;
use log::{debug, warn};

use super::previews::{ImageSelection, PreviewRegistry};
use crate::api::CatalogApi;
use crate::error::PreviewError;
use crate::validation::FormErrors;
use crate::web::HttpClient;
use crate::web::route::AppRoute;

pub const FIELD_SKU: &str = "sku";
pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_IMAGES: &str = "images";

pub const FETCH_FAILED: &str = "Failed to fetch product";
pub const SAVE_FAILED: &str = "Failed to save product";

/// 可逐键编辑的文本字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Sku,
    Name,
    Price,
}

/// 表单模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

impl FormMode {
    pub fn from_id(product_id: Option<u64>) -> Self {
        product_id.map_or(FormMode::Create, FormMode::Edit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Loading,
    Ready,
    Validating,
    Submitting,
    Saved,
    Failed,
}

/// 表单字段值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFormValues {
    pub sku: String,
    pub name: String,
    /// 保持用户输入的原文，仅在校验 / 提交时转换为数字
    pub price: String,
    pub images: Vec<ImageSelection>,
}

/// 一次提交的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 上一次请求尚未结束，本次提交被忽略
    Busy,
    /// 校验未通过，错误已写入表单
    Invalid,
    /// 保存成功，调用方应以 replace 方式导航到 `redirect`
    Saved { redirect: AppRoute },
    /// 远程保存失败，错误已写入 `api_error`
    Failed,
}

/// 解析价格文本：去掉首尾空白后必须是大于零的有限数
pub fn parse_price(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
}

/// 整批校验，所有失败一起报告
pub fn validate_product(values: &ProductFormValues, mode: FormMode) -> FormErrors {
    let mut errors = FormErrors::new();
    if values.sku.is_empty() {
        errors.insert(FIELD_SKU, "SKU is required");
    }
    if values.name.is_empty() {
        errors.insert(FIELD_NAME, "Name is required");
    }
    if values.price.is_empty() {
        errors.insert(FIELD_PRICE, "Price is required");
    } else if parse_price(&values.price).is_none() {
        errors.insert(FIELD_PRICE, "Price must be a positive number");
    }
    // 编辑模式下已有图片仍然保留，允许不选
    if mode == FormMode::Create && values.images.is_empty() {
        errors.insert(FIELD_IMAGES, "At least one image is required");
    }
    errors
}

/// 商品表单状态
///
/// 信号字段都是 `Copy` 的，注册表也是 `Copy` 时整个结构可以直接移入各个事件闭包。
#[derive(Clone, Copy)]
pub struct ProductForm<R> {
    mode: FormMode,
    pub values: RwSignal<ProductFormValues>,
    pub errors: RwSignal<FormErrors>,
    /// 当前展示的预览引用，也是提交时的 `images`
    pub previews: RwSignal<Vec<String>>,
    pub loading: RwSignal<bool>,
    pub api_error: RwSignal<Option<String>>,
    pub phase: RwSignal<FormPhase>,
    registry: R,
}

impl<R: PreviewRegistry> ProductForm<R> {
    pub fn new(product_id: Option<u64>, registry: R) -> Self {
        Self {
            mode: FormMode::from_id(product_id),
            values: RwSignal::new(ProductFormValues::default()),
            errors: RwSignal::new(FormErrors::new()),
            previews: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            api_error: RwSignal::new(None),
            phase: RwSignal::new(FormPhase::Idle),
            registry,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// 挂载：编辑模式下加载远程记录
    pub async fn mount<C: HttpClient>(&self, api: &CatalogApi<C>) {
        let FormMode::Edit(id) = self.mode else {
            self.phase.set(FormPhase::Ready);
            return;
        };
        if self.loading.get_untracked() {
            return;
        }

        self.loading.set(true);
        self.phase.set(FormPhase::Loading);

        match api.get_product(id).await {
            Ok(product) => {
                self.values.set(ProductFormValues {
                    sku: product.sku,
                    name: product.name,
                    price: product.price.to_string(),
                    images: Vec::new(),
                });
                self.previews.set(product.images);
            }
            Err(e) => {
                warn!("loading product {} failed: {}", id, e);
                self.api_error.set(Some(FETCH_FAILED.to_string()));
            }
        }

        self.loading.set(false);
        self.phase.set(FormPhase::Ready);
    }

    /// 更新单个字段，不触碰错误信息
    pub fn set_field(&self, field: ProductField, value: String) {
        if self.loading.get_untracked() {
            return;
        }
        self.values.update(|values| match field {
            ProductField::Sku => values.sku = value,
            ProductField::Name => values.name = value,
            ProductField::Price => values.price = value,
        });
    }

    /// 用新选择整体替换图片列表
    ///
    /// 任一文件无法生成预览时整个选择作废，已生成的预览被释放，原状态保持不变。
    pub fn select_images(&self, files: &[R::File]) -> Result<(), PreviewError> {
        if self.loading.get_untracked() {
            return Ok(());
        }

        let mut selection = Vec::with_capacity(files.len());
        for file in files {
            match self.registry.acquire(file) {
                Ok(image) => selection.push(image),
                Err(e) => {
                    warn!("image selection rejected: {}", e);
                    self.release_all(&selection);
                    return Err(e);
                }
            }
        }

        let previews = selection.iter().map(|image| image.preview.clone()).collect();
        let previous = self
            .values
            .try_update(|values| std::mem::replace(&mut values.images, selection))
            .unwrap_or_default();
        self.previews.set(previews);
        self.release_all(&previous);
        Ok(())
    }

    /// 带位置的预览列表，供视图按位置作 key（服务端可能返回重复的 URL）
    pub fn preview_entries(&self) -> Vec<(usize, String)> {
        self.previews.get().into_iter().enumerate().collect()
    }

    /// 执行校验并整体替换错误
    pub fn validate(&self) -> FormErrors {
        let errors = self
            .values
            .with_untracked(|values| validate_product(values, self.mode));
        self.errors.set(errors.clone());
        errors
    }

    fn payload(&self) -> Option<ProductPayload> {
        let images = self.previews.get_untracked();
        self.values.with_untracked(|values| {
            Some(ProductPayload {
                sku: values.sku.clone(),
                name: values.name.clone(),
                price: parse_price(&values.price)?,
                images,
            })
        })
    }

    /// 提交表单
    pub async fn submit<C: HttpClient>(&self, api: &CatalogApi<C>) -> SubmitOutcome {
        if self.loading.get_untracked() {
            debug!("submit ignored: request in flight");
            return SubmitOutcome::Busy;
        }

        self.api_error.set(None);
        self.phase.set(FormPhase::Validating);
        if !self.validate().is_empty() {
            self.phase.set(FormPhase::Ready);
            return SubmitOutcome::Invalid;
        }
        let Some(payload) = self.payload() else {
            self.phase.set(FormPhase::Ready);
            return SubmitOutcome::Invalid;
        };

        self.loading.set(true);
        self.phase.set(FormPhase::Submitting);

        let result = match self.mode {
            FormMode::Edit(id) => api.update_product(id, payload).await,
            FormMode::Create => api.create_product(payload).await,
        };

        // 无论结果如何都要解除锁定
        self.loading.set(false);

        match result {
            Ok(()) => {
                self.phase.set(FormPhase::Saved);
                SubmitOutcome::Saved {
                    redirect: AppRoute::Products,
                }
            }
            Err(e) => {
                warn!("saving product failed: {}", e);
                self.api_error.set(Some(SAVE_FAILED.to_string()));
                self.phase.set(FormPhase::Failed);
                SubmitOutcome::Failed
            }
        }
    }

    /// 销毁：释放仍持有的本地预览
    pub fn teardown(&self) {
        let held = self
            .values
            .try_update(|values| std::mem::take(&mut values.images))
            .unwrap_or_default();
        let _ = self.previews.try_set(Vec::new());
        self.release_all(&held);
    }

    fn release_all(&self, images: &[ImageSelection]) {
        for image in images {
            self.registry.release(&image.preview);
        }
    }
}

#[cfg(test)]
mod tests;
