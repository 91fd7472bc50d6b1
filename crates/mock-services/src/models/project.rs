//! 模拟项目模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 模拟项目
///
/// 同一客户下按名称唯一，`sequence` 记录创建顺序，列表接口据此排序。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockProject {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub sequence: u64,
}
