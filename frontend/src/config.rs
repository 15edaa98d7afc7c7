//! 构建期配置
//!
//! 浏览器中没有进程环境变量，所有配置在编译时通过 `option_env!` 注入，
//! 未设置时使用默认值。
//!
//! | 变量 | 说明 | 默认值 |
//! |---|---|---|
//! | `CATALOG_API_BASE` | API 基础地址 | `""`（同源） |
//! | `CATALOG_ADMIN_USERNAME` | 管理员用户名 | 未设置 |
//! | `CATALOG_ADMIN_PASSWORD` | 管理员密码 | 未设置 |
//! | `CATALOG_LOG_LEVEL` | 日志级别 | `info` |

use leptos::prelude::*;
use log::Level;

use crate::auth::AdminIdentity;

const DEFAULT_API_BASE: &str = "";
const DEFAULT_LOG_LEVEL: Level = Level::Info;

/// 应用配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub admin: AdminIdentity,
    pub log_level: Level,
}

impl AppConfig {
    /// 读取编译时注入的配置
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CATALOG_API_BASE"),
            option_env!("CATALOG_ADMIN_USERNAME"),
            option_env!("CATALOG_ADMIN_PASSWORD"),
            option_env!("CATALOG_LOG_LEVEL"),
        )
    }

    fn from_values(
        api_base: Option<&str>,
        admin_username: Option<&str>,
        admin_password: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            api_base: api_base.unwrap_or(DEFAULT_API_BASE).to_string(),
            admin: AdminIdentity::new(
                admin_username.map(str::to_string),
                admin_password.map(str::to_string),
            ),
            log_level: log_level
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

/// 从 Context 获取应用配置
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}
