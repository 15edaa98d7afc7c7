//! 错误类型
//!
//! 所有错误都在引发它的操作边界被捕获并转换为用户可见的文本，
//! 这里的类型只负责承载技术细节（写入日志）。

use crate::web::HttpError;

/// API 调用错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// 请求未能完成（构建失败、网络中断等）
    #[error(transparent)]
    Transport(#[from] HttpError),
    /// 服务端返回了非 2xx 状态
    #[error("服务端返回状态码 {status}")]
    Status {
        status: u16,
        /// 失败响应体中的 `message` 字段
        message: Option<String>,
    },
    /// 请求体序列化失败
    #[error("请求体序列化失败: {0}")]
    Encode(String),
    /// 响应体反序列化失败
    #[error("响应体解析失败: {0}")]
    Decode(String),
}

impl ApiError {
    /// 服务端在失败响应中给出的消息
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 请求是否根本没有得到响应
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// 图片预览引用创建失败
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("无法创建图片预览: {0}")]
pub struct PreviewError(pub String);
