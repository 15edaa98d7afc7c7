//! 图片预览引用
//!
//! 本地预览（object URL）是需要显式释放的资源：
//! 选择时获取，被新选择替换或表单销毁时释放。
//! 编辑模式下从服务端带回的 URL 不属于本地资源，不做释放。

use log::debug;

use crate::error::PreviewError;

/// 一张已选择的本地图片及其预览引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub file_name: String,
    pub preview: String,
}

/// 预览引用的获取与释放
pub trait PreviewRegistry: Clone + 'static {
    /// 本地文件句柄
    type File;

    fn acquire(&self, file: &Self::File) -> Result<ImageSelection, PreviewError>;

    fn release(&self, preview: &str);
}

/// 基于 `URL.createObjectURL` / `URL.revokeObjectURL` 的实现
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlRegistry;

impl PreviewRegistry for ObjectUrlRegistry {
    type File = web_sys::File;

    fn acquire(&self, file: &Self::File) -> Result<ImageSelection, PreviewError> {
        let preview = web_sys::Url::create_object_url_with_blob(file)
            .map_err(|e| PreviewError(format!("{:?}", e)))?;
        Ok(ImageSelection {
            file_name: file.name(),
            preview,
        })
    }

    fn release(&self, preview: &str) {
        debug!("revoking preview {}", preview);
        let _ = web_sys::Url::revoke_object_url(preview);
    }
}

// =========================================================
// 测试工具: MockPreviews
// =========================================================

#[cfg(test)]
#[derive(Debug, Default)]
struct MockPreviewState {
    next: u32,
    live: Vec<String>,
    released: Vec<String>,
    fail_on: Option<String>,
}

/// 以文件名作为文件句柄，记录存活与已释放的预览
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MockPreviews {
    state: std::rc::Rc<std::cell::RefCell<MockPreviewState>>,
}

#[cfg(test)]
impl MockPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让指定文件名的获取失败
    pub fn fail_on(&self, file_name: &str) {
        self.state.borrow_mut().fail_on = Some(file_name.to_string());
    }

    pub fn live(&self) -> Vec<String> {
        self.state.borrow().live.clone()
    }

    pub fn released(&self) -> Vec<String> {
        self.state.borrow().released.clone()
    }
}

#[cfg(test)]
impl PreviewRegistry for MockPreviews {
    type File = String;

    fn acquire(&self, file: &Self::File) -> Result<ImageSelection, PreviewError> {
        let mut state = self.state.borrow_mut();
        if state.fail_on.as_deref() == Some(file.as_str()) {
            return Err(PreviewError(format!("cannot read {}", file)));
        }
        state.next += 1;
        let preview = format!("blob:mock/{}", state.next);
        state.live.push(preview.clone());
        Ok(ImageSelection {
            file_name: file.clone(),
            preview,
        })
    }

    fn release(&self, preview: &str) {
        let mut state = self.state.borrow_mut();
        state.live.retain(|p| p != preview);
        state.released.push(preview.to_string());
    }
}
