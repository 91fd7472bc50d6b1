//! Mock 应用、游戏动作与用户服务

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, Envelope, RewardApiState, require_name};
use crate::models::{MockApplication, MockGameAction, MockTrigger, MockUser, object_id};

type Created<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

// ============================================================================
// 请求 DTO
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub privilege_name: String,
    #[serde(default)]
    pub coin_conversion_rate: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameActionRequest {
    pub name: String,
    pub points: i64,
    pub application: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub game_count_per_day: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    pub user_id: String,
    pub user_name: String,
    pub application: Vec<String>,
    #[serde(default)]
    pub custom_attributes: Value,
}

/// 触发请求中的 `point` 可以是字符串或数字
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerGameActionRequest {
    pub game_action_id: String,
    pub user_id: String,
    pub point: Value,
}

// ============================================================================
// 路由配置
// ============================================================================

pub fn application_routes() -> Router<Arc<RewardApiState>> {
    Router::new()
        .route("/v1/applications", post(create_application))
        .route("/v1/gameAction", post(create_game_action))
        .route("/v1/users/addUser", post(add_user))
        .route(
            "/userCompletedGame/triggerGameAction",
            post(trigger_game_action),
        )
}

// ============================================================================
// Handler 实现
// ============================================================================

async fn create_application(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreateApplicationRequest>,
) -> Created<MockApplication> {
    require_name("name", &req.name)?;
    if !state.projects.contains(&req.project_id) {
        return Err(ApiError::not_found("Project", &req.project_id));
    }

    let application = MockApplication {
        id: object_id(),
        name: req.name,
        description: req.description,
        domain: req.domain,
        privilege_name: req.privilege_name,
        coin_conversion_rate: req.coin_conversion_rate,
        project_id: req.project_id,
        client_id: req.client_id,
        created_at: Utc::now(),
    };
    state
        .applications
        .insert(&application.id, application.clone());

    tracing::info!(
        application_id = %application.id,
        project_id = %application.project_id,
        "创建应用"
    );

    Ok((StatusCode::CREATED, Json(Envelope::created(application))))
}

async fn create_game_action(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreateGameActionRequest>,
) -> Created<MockGameAction> {
    require_name("name", &req.name)?;
    if !state.applications.contains(&req.application) {
        return Err(ApiError::not_found("Application", &req.application));
    }

    let game_action = MockGameAction {
        id: object_id(),
        name: req.name,
        points: req.points,
        description: req.description,
        game_count_per_day: req.game_count_per_day,
        application: req.application,
        created_at: Utc::now(),
    };
    state
        .game_actions
        .insert(&game_action.id, game_action.clone());

    tracing::info!(game_action_id = %game_action.id, points = game_action.points, "创建游戏动作");

    Ok((StatusCode::CREATED, Json(Envelope::created(game_action))))
}

/// 注册用户，`userId` 在平台内唯一
async fn add_user(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<AddUserRequest>,
) -> Created<MockUser> {
    require_name("userId", &req.user_id)?;
    if req.application.is_empty() {
        return Err(ApiError::BadRequest("application is required".to_string()));
    }
    if let Some(missing) = req
        .application
        .iter()
        .find(|id| !state.applications.contains(id))
    {
        return Err(ApiError::not_found("Application", missing));
    }
    let user = MockUser {
        id: object_id(),
        user_id: req.user_id,
        user_name: req.user_name,
        custom_attributes: req.custom_attributes,
        application: req.application,
        total_points: 0,
        created_at: Utc::now(),
    };
    if !state.users.insert_if_absent(&user.user_id, user.clone()) {
        return Err(ApiError::Conflict(format!(
            "User {} already exists",
            user.user_id
        )));
    }

    tracing::info!(user_id = %user.user_id, "注册用户");

    Ok((StatusCode::CREATED, Json(Envelope::created(user))))
}

/// 记录用户完成游戏动作并累加积分（饱和累加）
///
/// 用户必须属于游戏动作所在的应用。
async fn trigger_game_action(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<TriggerGameActionRequest>,
) -> Result<Json<Envelope<MockTrigger>>, ApiError> {
    let point = parse_point(&req.point)?;

    let game_action = state
        .game_actions
        .get(&req.game_action_id)
        .ok_or_else(|| ApiError::not_found("GameAction", &req.game_action_id))?;
    let user = state
        .users
        .get(&req.user_id)
        .ok_or_else(|| ApiError::not_found("User", &req.user_id))?;

    if !user.application.contains(&game_action.application) {
        return Err(ApiError::BadRequest(format!(
            "User {} is not registered in application {}",
            user.user_id, game_action.application
        )));
    }

    let user = state
        .users
        .update(&req.user_id, |u| u.total_points = u.total_points.saturating_add(point))
        .ok_or_else(|| ApiError::not_found("User", &req.user_id))?;

    let trigger = MockTrigger {
        id: object_id(),
        game_action_id: game_action.id,
        user_id: user.user_id,
        point,
        total_points: user.total_points,
        triggered_at: Utc::now(),
    };
    state.triggers.insert(&trigger.id, trigger.clone());

    tracing::info!(
        game_action_id = %trigger.game_action_id,
        user_id = %trigger.user_id,
        point,
        total_points = trigger.total_points,
        "触发游戏动作"
    );

    Ok(Json(Envelope::new(trigger, "Game action triggered")))
}

fn parse_point(value: &Value) -> Result<i64, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ApiError::BadRequest(format!("invalid point: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point(&json!("100")).unwrap(), 100);
        assert_eq!(parse_point(&json!(25)).unwrap(), 25);
        assert!(parse_point(&json!("abc")).is_err());
        assert!(parse_point(&json!(null)).is_err());
    }
}
