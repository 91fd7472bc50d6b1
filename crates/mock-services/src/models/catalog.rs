//! 模拟奖励目录模型
//!
//! 查找项聚合查找值（如徽章图片）；特权阶段把查找值绑定到积分门槛；
//! VIP 等级聚合特权阶段并附带数值权益；虚拟货币可与积分换算。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockLookupItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub application: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockLookupValue {
    #[serde(rename = "_id")]
    pub id: String,
    pub lookup_item: String,
    pub value: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockPrivilegeStage {
    #[serde(rename = "_id")]
    pub id: String,
    pub lookup_value: String,
    pub points: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockVipTier {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub tier_level: i64,
    pub badges: Vec<String>,
    pub benefits: Value,
    pub application: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockVirtualMoney {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub value: i64,
    pub application: String,
    pub created_at: DateTime<Utc>,
}
