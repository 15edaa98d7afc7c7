//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，以减小 WASM 二进制体积。

pub mod dialog;
mod http;
pub mod route;
pub mod router;

pub use http::{FetchClient, HttpClient, HttpError, HttpRequest};

#[cfg(test)]
pub use http::MockHttpClient;
