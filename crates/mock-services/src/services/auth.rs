//! Bearer Token 校验中间件

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, RewardApiState};

/// 校验 `Authorization: Bearer <token>`，同时为每个请求计数
pub async fn require_bearer(
    State(state): State<Arc<RewardApiState>>,
    req: Request,
    next: Next,
) -> Response {
    state.record_request();

    if let Some(expected) = state.expected_token() {
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected);

        if !authorized {
            return ApiError::Unauthorized.into_response();
        }
    }

    next.run(req).await
}
