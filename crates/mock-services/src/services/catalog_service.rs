//! Mock 奖励目录服务
//!
//! 查找项 → 查找值 → 特权阶段 → VIP 等级，外加应用级的虚拟货币。
//! 每个创建接口都会校验所引用的上游资源存在。

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, Envelope, RewardApiState, require_name};
use crate::models::{
    MockLookupItem, MockLookupValue, MockPrivilegeStage, MockVipTier, MockVirtualMoney, object_id,
};

type Created<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

// ============================================================================
// 请求 DTO
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateLookupItemRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub application: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLookupValueRequest {
    pub lookup_item: String,
    pub value: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrivilegeStageRequest {
    pub lookup_value: String,
    pub points: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVipTierRequest {
    pub name: String,
    pub tier_level: i64,
    pub application: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub benefits: Value,
}

#[derive(Debug, Deserialize)]
pub struct CreateVirtualMoneyRequest {
    pub name: String,
    pub value: i64,
    pub application: String,
}

// ============================================================================
// 路由配置
// ============================================================================

pub fn catalog_routes() -> Router<Arc<RewardApiState>> {
    Router::new()
        .route("/v1/lookupItem", post(create_lookup_item))
        .route("/v1/lookupValue", post(create_lookup_value))
        .route("/v1/privilegeStage", post(create_privilege_stage))
        .route("/v1/vipTier", post(create_vip_tier))
        .route("/v1/virtualMoney", post(create_virtual_money))
}

// ============================================================================
// Handler 实现
// ============================================================================

async fn create_lookup_item(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreateLookupItemRequest>,
) -> Created<MockLookupItem> {
    require_name("name", &req.name)?;
    if !state.applications.contains(&req.application) {
        return Err(ApiError::not_found("Application", &req.application));
    }

    let item = MockLookupItem {
        id: object_id(),
        name: req.name,
        kind: req.kind,
        description: req.description,
        application: req.application,
        created_at: Utc::now(),
    };
    state.lookup_items.insert(&item.id, item.clone());
    tracing::info!(lookup_item_id = %item.id, "创建查找项");

    Ok((StatusCode::CREATED, Json(Envelope::created(item))))
}

async fn create_lookup_value(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreateLookupValueRequest>,
) -> Created<MockLookupValue> {
    require_name("value", &req.value)?;
    if !state.lookup_items.contains(&req.lookup_item) {
        return Err(ApiError::not_found("LookupItem", &req.lookup_item));
    }

    let value = MockLookupValue {
        id: object_id(),
        lookup_item: req.lookup_item,
        value: req.value,
        image_url: req.image_url,
        created_at: Utc::now(),
    };
    state.lookup_values.insert(&value.id, value.clone());
    tracing::info!(lookup_value_id = %value.id, "创建查找值");

    Ok((StatusCode::CREATED, Json(Envelope::created(value))))
}

async fn create_privilege_stage(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreatePrivilegeStageRequest>,
) -> Created<MockPrivilegeStage> {
    if !state.lookup_values.contains(&req.lookup_value) {
        return Err(ApiError::not_found("LookupValue", &req.lookup_value));
    }
    if req.points < 0 {
        return Err(ApiError::BadRequest("points must not be negative".to_string()));
    }

    let stage = MockPrivilegeStage {
        id: object_id(),
        lookup_value: req.lookup_value,
        points: req.points,
        description: req.description,
        created_at: Utc::now(),
    };
    state.privilege_stages.insert(&stage.id, stage.clone());
    tracing::info!(privilege_stage_id = %stage.id, points = stage.points, "创建特权阶段");

    Ok((StatusCode::CREATED, Json(Envelope::created(stage))))
}

/// 创建 VIP 等级，`badges` 中的每个特权阶段都必须存在
async fn create_vip_tier(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreateVipTierRequest>,
) -> Created<MockVipTier> {
    require_name("name", &req.name)?;
    if !state.applications.contains(&req.application) {
        return Err(ApiError::not_found("Application", &req.application));
    }
    if let Some(missing) = req
        .badges
        .iter()
        .find(|id| !state.privilege_stages.contains(id))
    {
        return Err(ApiError::not_found("PrivilegeStage", missing));
    }

    let tier = MockVipTier {
        id: object_id(),
        name: req.name,
        tier_level: req.tier_level,
        badges: req.badges,
        benefits: req.benefits,
        application: req.application,
        created_at: Utc::now(),
    };
    state.vip_tiers.insert(&tier.id, tier.clone());
    tracing::info!(vip_tier_id = %tier.id, badges = tier.badges.len(), "创建 VIP 等级");

    Ok((StatusCode::CREATED, Json(Envelope::created(tier))))
}

async fn create_virtual_money(
    State(state): State<Arc<RewardApiState>>,
    Json(req): Json<CreateVirtualMoneyRequest>,
) -> Created<MockVirtualMoney> {
    require_name("name", &req.name)?;
    if !state.applications.contains(&req.application) {
        return Err(ApiError::not_found("Application", &req.application));
    }

    let money = MockVirtualMoney {
        id: object_id(),
        name: req.name,
        value: req.value,
        application: req.application,
        created_at: Utc::now(),
    };
    state.virtual_money.insert(&money.id, money.clone());
    tracing::info!(virtual_money_id = %money.id, value = money.value, "创建虚拟货币");

    Ok((StatusCode::CREATED, Json(Envelope::created(money))))
}
