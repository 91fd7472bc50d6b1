//! 配置管理模块
//!
//! 支持分层配置文件、`.env` 文件与环境变量覆盖，以及类型安全的配置访问。

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::{RallyError, Result};
use crate::observability::ObservabilityConfig;

/// 目标 API 地址的环境变量名
pub const BASE_URL_VAR: &str = "BASE_URL";
/// 客户（租户）标识的环境变量名
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
/// Bearer Token 的环境变量名
pub const TOKEN_VAR: &str = "BEARER_PROJECT_TOKEN";

fn default_request_timeout_seconds() -> u64 {
    30
}

/// 奖励平台 API 配置
///
/// 三个连接参数都来自外部，允许缺失：缺少 token 时调用方应跳过依赖它的流程，而不是失败。
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// 单个请求的超时上限
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            client_id: None,
            token: None,
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl ApiConfig {
    /// 是否具备发起认证调用的全部条件（地址、客户标识与 token）
    pub fn is_runnable(&self) -> bool {
        self.skip_reason().is_none()
    }

    /// 缺少连接参数时给出的跳过原因
    pub fn skip_reason(&self) -> Option<String> {
        if non_empty(&self.token).is_none() {
            Some(format!("{} not set", TOKEN_VAR))
        } else if non_empty(&self.base_url).is_none() {
            Some(format!("{} not set", BASE_URL_VAR))
        } else if non_empty(&self.client_id).is_none() {
            Some(format!("{} not set", CLIENT_ID_VAR))
        } else {
            None
        }
    }

    /// 获取必填项，缺失时返回 `MissingSetting`
    pub fn required_base_url(&self) -> Result<&str> {
        non_empty(&self.base_url).ok_or_else(|| RallyError::MissingSetting {
            name: BASE_URL_VAR.to_string(),
        })
    }

    pub fn required_client_id(&self) -> Result<&str> {
        non_empty(&self.client_id).ok_or_else(|| RallyError::MissingSetting {
            name: CLIENT_ID_VAR.to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// 直接读取的环境变量覆盖项
///
/// 与原有 `.env` 约定保持一致：`BASE_URL`、`CLIENT_ID`、`BEARER_PROJECT_TOKEN`。
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub token: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_VAR).ok(),
            client_id: std::env::var(CLIENT_ID_VAR).ok(),
            token: std::env::var(TOKEN_VAR).ok(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RallyConfig {
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl RallyConfig {
    /// 从 `.env`、配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. `.env` 文件（仅填充尚未设置的环境变量）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. 环境变量（RALLY__ 前缀，如 RALLY__API__CLIENT_ID -> api.client_id）
    /// 5. BASE_URL / CLIENT_ID / BEARER_PROJECT_TOKEN
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("未加载 .env 文件: {}", e);
        }

        let env = std::env::var("RALLY_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), &env, EnvOverrides::from_env())
    }

    /// 从指定目录加载配置
    pub fn load_from(config_dir: &Path, env: &str, overrides: EnvOverrides) -> Result<Self> {
        let builder = Config::builder()
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                Environment::with_prefix("RALLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", overrides.base_url)?
            .set_override_option("api.client_id", overrides.client_id)?
            .set_override_option("api.token", overrides.token)?;

        let mut config: Self = builder.build()?.try_deserialize()?;

        if let Some(base_url) = config.api.base_url.as_mut() {
            *base_url = base_url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
