//! 请求体定义
//!
//! 各创建接口的请求体结构固定，大部分字段取默认值，字段名按平台约定使用 camelCase。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
}

/// 创建应用请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub name: String,
    pub email_id: String,
    pub description: String,
    pub is_special_day_points: bool,
    pub domain: String,
    pub recognition_limit: i64,
    pub coin_conversion_rate: i64,
    pub privilege_name: String,
    pub app_specific_id: Vec<String>,
    pub project_id: String,
    pub client_id: String,
}

impl ApplicationPayload {
    pub fn new(project_id: &str, client_id: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            email_id: String::new(),
            description: "Created for automation testing".to_string(),
            is_special_day_points: false,
            domain: "it".to_string(),
            recognition_limit: 0,
            coin_conversion_rate: 1,
            privilege_name: "Badge".to_string(),
            app_specific_id: Vec::new(),
            project_id: project_id.to_string(),
            client_id: client_id.to_string(),
        }
    }
}

/// 创建游戏动作请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameActionPayload {
    pub name: String,
    pub points: i64,
    pub description: String,
    pub game_count_per_day: i64,
    pub min_points: Option<i64>,
    pub max_points: Option<i64>,
    pub is_decision: bool,
    pub decision_points: i64,
    pub application: String,
}

impl GameActionPayload {
    pub fn new(application_id: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            points: 100,
            description: "Created for testing".to_string(),
            game_count_per_day: 100,
            min_points: None,
            max_points: None,
            is_decision: false,
            decision_points: 0,
            application: application_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomAttributes {
    pub role: Vec<String>,
}

/// 注册用户请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub user_id: String,
    pub user_name: String,
    pub custom_attributes: CustomAttributes,
    pub application: Vec<String>,
}

impl UserPayload {
    pub fn new(application_id: &str, user_id: &str, user_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            custom_attributes: CustomAttributes {
                role: vec!["Employee".to_string()],
            },
            application: vec![application_id.to_string()],
        }
    }
}

/// 触发游戏动作请求体
///
/// `point` 按平台约定以字符串传递。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerGameActionPayload {
    pub game_action_id: String,
    pub user_id: String,
    pub corresponding_user_id: String,
    pub corresponding_user_application_id: String,
    pub point: String,
}

impl TriggerGameActionPayload {
    pub fn new(game_action_id: &str, user_id: &str, points: &str) -> Self {
        Self {
            game_action_id: game_action_id.to_string(),
            user_id: user_id.to_string(),
            corresponding_user_id: String::new(),
            corresponding_user_application_id: String::new(),
            point: points.to_string(),
        }
    }
}

/// 查找项（一组查找值的分组，例如徽章图片）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupItemPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub application: String,
}

impl LookupItemPayload {
    pub fn new(application_id: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: "Image".to_string(),
            description: "Badge images for automation testing".to_string(),
            application: application_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupValuePayload {
    pub lookup_item: String,
    pub value: String,
    pub image_url: String,
}

/// 特权阶段（徽章）：把查找值绑定到积分门槛
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegeStagePayload {
    pub lookup_value: String,
    pub points: i64,
    pub description: String,
}

/// VIP 等级的数值权益参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipBenefits {
    pub points_multiplier: f64,
    pub discount_percent: i64,
    pub bonus_points: i64,
}

impl Default for VipBenefits {
    fn default() -> Self {
        Self {
            points_multiplier: 1.5,
            discount_percent: 10,
            bonus_points: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipTierPayload {
    pub name: String,
    pub tier_level: i64,
    pub badges: Vec<String>,
    pub benefits: VipBenefits,
    pub application: String,
}

/// 虚拟货币：可与积分换算的货币
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMoneyPayload {
    pub name: String,
    pub value: i64,
    pub application: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_application_payload_shape() {
        let payload = ApplicationPayload::new("p1", "c1", "Application X");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Application X",
                "emailId": "",
                "description": "Created for automation testing",
                "isSpecialDayPoints": false,
                "domain": "it",
                "recognitionLimit": 0,
                "coinConversionRate": 1,
                "privilegeName": "Badge",
                "appSpecificId": [],
                "projectId": "p1",
                "clientId": "c1"
            })
        );
    }

    #[test]
    fn test_game_action_nulls_are_sent() {
        let value = serde_json::to_value(GameActionPayload::new("a1", "GA")).unwrap();
        assert!(value["minPoints"].is_null());
        assert!(value.as_object().unwrap().contains_key("maxPoints"));
        assert_eq!(value["gameCountPerDay"], 100);
        assert_eq!(value["application"], "a1");
    }

    #[test]
    fn test_user_payload_custom_attributes() {
        let value = serde_json::to_value(UserPayload::new("a1", "user_x", "User X")).unwrap();
        assert_eq!(value["customAttributes"], json!({ "Role": ["Employee"] }));
        assert_eq!(value["application"], json!(["a1"]));
        assert_eq!(value["userId"], "user_x");
    }

    #[test]
    fn test_trigger_payload_point_is_string() {
        let value =
            serde_json::to_value(TriggerGameActionPayload::new("ga1", "user_x", "100")).unwrap();
        assert_eq!(value["point"], "100");
        assert_eq!(value["correspondingUserApplicationId"], "");
    }

    #[test]
    fn test_lookup_item_type_field() {
        let value = serde_json::to_value(LookupItemPayload::new("a1", "Images")).unwrap();
        assert_eq!(value["type"], "Image");
        assert!(value.get("kind").is_none());
    }
}
