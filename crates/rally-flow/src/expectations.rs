//! 响应结构断言
//!
//! 只检查响应形状与确认字面量，不校验业务语义。

use serde_json::Value;

use rally_client::envelope;
use rally_shared::error::{RallyError, Result};

/// `data` 字段必须为真值
pub fn expect_data<'a>(step: &str, resp: &'a Value) -> Result<&'a Value> {
    envelope::data(resp)
        .filter(|data| envelope::is_truthy(data))
        .ok_or_else(|| RallyError::unexpected(step, "response data should be truthy"))
}

/// `message` 必须等于给定的确认字面量
pub fn expect_message(step: &str, resp: &Value, expected: &str) -> Result<()> {
    match envelope::message(resp) {
        Some(message) if message == expected => Ok(()),
        other => Err(RallyError::unexpected(
            step,
            format!("message should be {:?}, got {:?}", expected, other),
        )),
    }
}

/// 新建资源的标识必须非空
pub fn expect_created_id(step: &str, resp: &Value) -> Result<String> {
    envelope::created_id(resp)
        .ok_or_else(|| RallyError::unexpected(step, "created resource id should be present"))
}

/// 标准“已创建”响应：真值 data + `created` + 非空标识
pub fn expect_created(step: &str, resp: &Value) -> Result<String> {
    expect_data(step, resp)?;
    expect_message(step, resp, envelope::ACK_CREATED)?;
    expect_created_id(step, resp)
}

/// `data.<field>` 必须存在且不为 null
pub fn expect_data_field<'a>(step: &str, resp: &'a Value, field: &str) -> Result<&'a Value> {
    envelope::data(resp)
        .and_then(|data| data.get(field))
        .filter(|v| !v.is_null())
        .ok_or_else(|| RallyError::unexpected(step, format!("data.{} should be present", field)))
}

/// 整个响应必须为真值
pub fn expect_truthy(step: &str, resp: &Value) -> Result<()> {
    if envelope::is_truthy(resp) {
        Ok(())
    } else {
        Err(RallyError::unexpected(step, "response should be truthy"))
    }
}
