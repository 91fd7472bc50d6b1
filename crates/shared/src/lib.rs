//! 共享库
//!
//! 包含各 crate 共用的配置加载、错误处理与日志初始化代码。

pub mod config;
pub mod error;
pub mod observability;

pub use config::{ApiConfig, RallyConfig};
pub use error::{RallyError, Result};
