//! 统一错误处理模块
//!
//! 定义客户端与流程编排共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum RallyError {
    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("缺少配置项: {name}")]
    MissingSetting { name: String },

    // ==================== 传输错误 ====================
    #[error("HTTP 传输错误: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API 错误 {status}: {body}")]
    Status { status: u16, body: String },

    #[error("响应 JSON 解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    // ==================== 流程错误 ====================
    #[error("前置条件不满足 [{step}]: {message}")]
    Precondition { step: String, message: String },

    #[error("响应结构不符合预期 [{step}]: {message}")]
    UnexpectedResponse { step: String, message: String },

    // ==================== 通用错误 ====================
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, RallyError>;

impl RallyError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::MissingSetting { .. } => "MISSING_SETTING",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Status { .. } => "HTTP_STATUS_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Precondition { .. } => "PRECONDITION_FAILED",
            Self::UnexpectedResponse { .. } => "UNEXPECTED_RESPONSE",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// 是否为前置条件失败（上一步未产出所需标识）
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    /// 是否由远端接口或网络导致
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    pub fn precondition(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Precondition {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn unexpected(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            step: step.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = RallyError::precondition("2. Create Application", "Project ID is required");
        assert_eq!(err.code(), "PRECONDITION_FAILED");
        assert!(err.is_precondition());
        assert!(!err.is_remote());
    }

    #[test]
    fn test_status_is_remote() {
        let err = RallyError::Status {
            status: 401,
            body: "{\"message\":\"Unauthorized\"}".to_string(),
        };
        assert!(err.is_remote());
        assert_eq!(err.code(), "HTTP_STATUS_ERROR");
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_decode_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: RallyError = parse_err.into();
        assert_eq!(err.code(), "DECODE_ERROR");
    }
}
