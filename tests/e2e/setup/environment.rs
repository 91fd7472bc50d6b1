//! 测试环境管理
//!
//! Mock 环境在进程内启动一个带认证的 Mock 平台；Live 环境从配置读取真实地址与 token。

use anyhow::Result;
use std::sync::Arc;

use rally_client::ApiClient;
use rally_mock::server::MockServer;
use rally_mock::services::RewardApiState;
use rally_shared::config::{ApiConfig, RallyConfig};
use rally_shared::observability::{self, ObservabilityConfig};

/// Mock 平台要求的 token
pub const MOCK_TOKEN: &str = "e2e-token";
/// Mock 环境使用的客户标识
pub const MOCK_CLIENT_ID: &str = "e2e-client";

/// 测试环境
pub struct TestEnvironment {
    /// REST API 客户端
    pub api: ApiClient,
    /// 进程内 Mock 平台（Live 环境为空）
    server: Option<MockServer>,
}

impl TestEnvironment {
    /// 启动 Mock 平台，客户端携带正确的 token
    pub async fn mock() -> Result<Self> {
        Self::mock_with_token(Some(MOCK_TOKEN)).await
    }

    /// 启动 Mock 平台，客户端使用指定 token（`None` 表示未配置）
    pub async fn mock_with_token(token: Option<&str>) -> Result<Self> {
        init_logging();

        let state = Arc::new(RewardApiState::new(Some(MOCK_TOKEN.to_string())));
        let server = MockServer::spawn(state).await?;
        let api = ApiClient::new(&ApiConfig {
            base_url: Some(server.base_url()),
            client_id: Some(MOCK_CLIENT_ID.to_string()),
            token: token.map(str::to_string),
            ..Default::default()
        })?;

        Ok(Self {
            api,
            server: Some(server),
        })
    }

    /// 真实平台环境；缺少地址、客户标识或 token 时返回 `None`
    pub fn live() -> Result<Option<Self>> {
        init_logging();

        let config = RallyConfig::load()?;
        if !config.api.is_runnable() {
            tracing::warn!(reason = ?config.api.skip_reason(), "跳过 Live 测试");
            return Ok(None);
        }

        Ok(Some(Self {
            api: ApiClient::new(&config.api)?,
            server: None,
        }))
    }

    /// Mock 平台的状态
    pub fn mock_state(&self) -> &Arc<RewardApiState> {
        match &self.server {
            Some(server) => server.state(),
            None => panic!("Live 环境没有 Mock 状态"),
        }
    }

    /// Mock 平台收到的业务请求数（含被拒绝的）
    pub fn requests(&self) -> u64 {
        self.mock_state().request_count()
    }
}

fn init_logging() {
    observability::init(&ObservabilityConfig::from_env());
}
