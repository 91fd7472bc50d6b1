//! Rally Mock Services
//!
//! 在内存中模拟奖励平台 REST API 的 crate，用于开发和测试环境。
//!
//! # 主要模块
//!
//! - `models`: 平台资源的模拟数据模型（项目、应用、游戏动作、用户、奖励目录）
//! - `store`: 内存存储实现
//! - `services`: axum 路由与 Handler，含 Bearer Token 校验
//! - `server`: 在随机端口上启动服务，供测试使用
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rally_mock::server::MockServer;
//! use rally_mock::services::RewardApiState;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let state = Arc::new(RewardApiState::new(Some("token".to_string())));
//! let server = MockServer::spawn(state).await?;
//! println!("mock api at {}", server.base_url());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod models;
pub mod server;
pub mod services;
pub mod store;
