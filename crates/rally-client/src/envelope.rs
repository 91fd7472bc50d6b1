//! 响应信封读取
//!
//! 平台的响应统一包在 `{ data, message }` 中。客户端本身不做任何校验，
//! 这里只提供读取字段的辅助函数，供流程编排和测试断言使用。

use serde_json::Value;

/// 项目创建/更新成功时的确认字面量
pub const ACK_ADD_OR_UPDATE: &str = "AddorUpdate";
/// 其他资源创建成功时的确认字面量
pub const ACK_CREATED: &str = "created";

pub fn message(resp: &Value) -> Option<&str> {
    resp.get("message").and_then(Value::as_str)
}

pub fn data(resp: &Value) -> Option<&Value> {
    resp.get("data")
}

/// 提取新建资源的标识
///
/// 优先取 `data._id`，其次取顶层 `_id`；空字符串视为缺失。
pub fn created_id(resp: &Value) -> Option<String> {
    resp.pointer("/data/_id")
        .and_then(Value::as_str)
        .or_else(|| resp.get("_id").and_then(Value::as_str))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// 项目列表：`data.Items[0].projects`，缺失时返回空
pub fn project_entries(resp: &Value) -> &[Value] {
    resp.pointer("/data/Items/0/projects")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// 按 JavaScript 语义判断取值是否为真
///
/// null、false、0、NaN 与空字符串为假；对象和数组（包括空的）为真。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `data` 字段存在且为真
pub fn has_data(resp: &Value) -> bool {
    data(resp).is_some_and(is_truthy)
}
