//! 奖励平台 REST API 客户端
//!
//! - `client`: 携带 Bearer Token 的 HTTP 调用封装，原样返回解码后的 JSON
//! - `endpoints`: 固定的接口路径
//! - `payloads`: 各创建接口的固定结构请求体
//! - `envelope`: 读取响应信封（`data` / `message` / `_id`）的辅助函数

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod payloads;

pub use client::ApiClient;
pub use envelope::{ACK_ADD_OR_UPDATE, ACK_CREATED};
