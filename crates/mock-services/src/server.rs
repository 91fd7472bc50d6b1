//! Mock 服务启动
//!
//! `build_app` 组装完整路由；`MockServer::spawn` 在 127.0.0.1 的随机端口上后台运行，
//! 供集成测试把真实的 HTTP 客户端指向它。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::services::{RewardApiState, reward_api_routes};

/// 组装 Mock 平台应用
///
/// 健康检查端点独立于业务路由，不需要认证。
pub fn build_app(state: Arc<RewardApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(reward_api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "rally-mock" }))
}

/// 后台运行的 Mock 服务
///
/// Drop 时终止服务任务。
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<RewardApiState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// 在随机端口上启动
    pub async fn spawn(state: Arc<RewardApiState>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("绑定端口失败")?;
        let addr = listener.local_addr().context("读取监听地址失败")?;
        let app = build_app(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock 服务异常退出");
            }
        });

        tracing::debug!(%addr, "Mock 服务已启动");

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &Arc<RewardApiState> {
        &self.state
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
