//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::server::build_app;
use crate::services::RewardApiState;

/// 模拟的端点清单（方法, 路径）
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/v1/projects/client/{clientId}/{page}/{perPage}"),
    ("PUT", "/v1/projects/client/{clientId}"),
    ("POST", "/v1/applications"),
    ("POST", "/v1/gameAction"),
    ("POST", "/v1/users/addUser"),
    ("POST", "/userCompletedGame/triggerGameAction"),
    ("POST", "/v1/lookupItem"),
    ("POST", "/v1/lookupValue"),
    ("POST", "/v1/privilegeStage"),
    ("POST", "/v1/vipTier"),
    ("POST", "/v1/virtualMoney"),
];

#[derive(Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// 执行 server 命令，直到收到 Ctrl+C
    pub async fn run_server(&self, port: u16, token: Option<String>) -> Result<()> {
        info!(port, auth = token.is_some(), "启动 Mock 奖励平台");

        let state = Arc::new(RewardApiState::new(token));
        let app = build_app(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

        info!("Mock 服务已启动: http://{}", addr);
        info!("按 Ctrl+C 停止服务");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("Mock 服务已停止");
        Ok(())
    }

    /// 执行 routes 命令
    pub fn run_routes(&self) {
        for (method, path) in ROUTES {
            println!("{:<5} {}", method, path);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "安装 CTRL+C 信号处理器失败");
        return;
    }
    info!("收到关闭信号，正在停止服务...");
}
