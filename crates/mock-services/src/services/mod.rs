//! Mock 服务模块
//!
//! 提供模拟的奖励平台 REST API，路径和响应信封与真实平台保持一致。

pub mod application_service;
pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod project_service;
pub mod state;


use axum::{Router, middleware};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use application_service::application_routes;
pub use catalog_service::catalog_routes;
pub use error::ApiError;
pub use project_service::project_routes;
pub use state::RewardApiState;

/// 项目创建/更新成功时的确认字面量
pub const ACK_ADD_OR_UPDATE: &str = "AddorUpdate";
/// 其他资源创建成功时的确认字面量
pub const ACK_CREATED: &str = "created";

/// 响应信封：`{ "data": ..., "message": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn new(data: T, message: &str) -> Self {
        Self {
            data,
            message: message.to_string(),
        }
    }

    pub fn created(data: T) -> Self {
        Self::new(data, ACK_CREATED)
    }
}

/// 合并全部业务路由，并挂上 Bearer Token 校验
pub fn reward_api_routes(state: Arc<RewardApiState>) -> Router<Arc<RewardApiState>> {
    Router::new()
        .merge(project_routes())
        .merge(application_routes())
        .merge(catalog_routes())
        .route_layer(middleware::from_fn_with_state(state, auth::require_bearer))
}

/// 拒绝空白名称
pub(crate) fn require_name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("{} is required", field)))
    } else {
        Ok(())
    }
}
