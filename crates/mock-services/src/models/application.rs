//! 模拟应用、游戏动作与用户模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockApplication {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub domain: String,
    pub privilege_name: String,
    pub coin_conversion_rate: i64,
    pub project_id: String,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
}

/// 模拟游戏动作（完成一次可获得 `points` 积分）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockGameAction {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub points: i64,
    pub description: String,
    pub game_count_per_day: i64,
    pub application: String,
    pub created_at: DateTime<Utc>,
}

/// 模拟平台用户
///
/// `user_id` 由调用方指定，`id` 由平台生成；`total_points` 随触发游戏动作累加。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub custom_attributes: Value,
    pub application: Vec<String>,
    pub total_points: i64,
    pub created_at: DateTime<Utc>,
}

/// 一次游戏动作触发记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockTrigger {
    #[serde(rename = "_id")]
    pub id: String,
    pub game_action_id: String,
    pub user_id: String,
    pub point: i64,
    pub total_points: i64,
    pub triggered_at: DateTime<Utc>,
}
