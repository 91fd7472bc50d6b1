//! 各步骤的执行逻辑
//!
//! 每个步骤：检查前置标识 → 用新后缀命名资源并调用接口 → 断言响应结构 → 返回产出的标识。
//! 产出写入上下文与注解历史由流水线负责。

use serde_json::Value;
use tracing::info;

use rally_client::ApiClient;
use rally_client::client::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use rally_client::envelope::{self, ACK_ADD_OR_UPDATE};
use rally_shared::error::{RallyError, Result};

use crate::context::{FlowContext, FlowKey};
use crate::expectations::{
    expect_created, expect_data, expect_data_field, expect_message, expect_truthy,
};
use crate::pipeline::FlowSettings;
use crate::stage::Stage;
use crate::suffix::random_suffix;

/// 步骤产出的标识
pub type Produced = Vec<(FlowKey, String)>;

/// 执行单个步骤
///
/// 所有前置标识在发出任何请求之前检查完毕，缺失时直接返回前置条件错误。
pub async fn execute(
    stage: Stage,
    api: &ApiClient,
    ctx: &FlowContext,
    settings: &FlowSettings,
) -> Result<Produced> {
    for key in stage.requires() {
        ctx.require(stage.label(), *key)?;
    }

    let suffix = random_suffix();
    let step = stage.label();

    match stage {
        Stage::CreateProject => create_project(api, step, &suffix).await,
        Stage::CreateApplication => {
            let project_id = ctx.require(step, FlowKey::ProjectId)?;
            let resp = api
                .create_application(project_id, &format!("Application {}", suffix))
                .await?;
            let id = expect_created(step, &resp)?;
            info!(application_id = %id, "应用已创建");
            Ok(vec![(FlowKey::ApplicationId, id)])
        }
        Stage::CreateGameAction => {
            let application_id = ctx.require(step, FlowKey::ApplicationId)?;
            let resp = api
                .create_game_action(application_id, &format!("Game Action {}", suffix))
                .await?;
            let id = expect_created(step, &resp)?;
            expect_data_field(step, &resp, "points")?;
            info!(game_action_id = %id, "游戏动作已创建");
            Ok(vec![(FlowKey::GameActionId, id)])
        }
        Stage::CreateUser => create_user(api, ctx, step, &suffix).await,
        Stage::CreateLookupItem => {
            let application_id = ctx.require(step, FlowKey::ApplicationId)?;
            let resp = api
                .create_lookup_item(application_id, &format!("Badges {}", suffix))
                .await?;
            let id = expect_created(step, &resp)?;
            info!(lookup_item_id = %id, "查找项已创建");
            Ok(vec![(FlowKey::LookupItemId, id)])
        }
        Stage::CreateLookupValue => {
            let lookup_item_id = ctx.require(step, FlowKey::LookupItemId)?;
            let resp = api
                .create_lookup_value(
                    lookup_item_id,
                    &format!("Gold {}", suffix),
                    &settings.badge_image_url,
                )
                .await?;
            let id = expect_created(step, &resp)?;
            info!(lookup_value_id = %id, "查找值已创建");
            Ok(vec![(FlowKey::LookupValueId, id)])
        }
        Stage::CreatePrivilegeStage => {
            let lookup_value_id = ctx.require(step, FlowKey::LookupValueId)?;
            let resp = api
                .create_privilege_stage(
                    lookup_value_id,
                    settings.privilege_points,
                    &format!("Privilege stage {}", suffix),
                )
                .await?;
            let id = expect_created(step, &resp)?;
            info!(privilege_stage_id = %id, "特权阶段已创建");
            Ok(vec![(FlowKey::PrivilegeStageId, id)])
        }
        Stage::CreateVipTier => {
            let application_id = ctx.require(step, FlowKey::ApplicationId)?;
            let stage_id = ctx.require(step, FlowKey::PrivilegeStageId)?;
            let resp = api
                .create_vip_tier(
                    application_id,
                    &format!("VIP Tier {}", suffix),
                    settings.vip_tier_level,
                    &[stage_id.to_string()],
                    &settings.vip_benefits,
                )
                .await?;
            let id = expect_created(step, &resp)?;
            info!(vip_tier_id = %id, "VIP 等级已创建");
            Ok(vec![(FlowKey::VipTierId, id)])
        }
        Stage::CreateVirtualMoney => {
            let application_id = ctx.require(step, FlowKey::ApplicationId)?;
            let resp = api
                .create_virtual_money(
                    application_id,
                    &format!("Coins {}", suffix),
                    settings.virtual_money_value,
                )
                .await?;
            expect_data(step, &resp)?;
            // 平台不一定返回虚拟货币的标识
            match envelope::created_id(&resp) {
                Some(id) => {
                    info!(virtual_money_id = %id, "虚拟货币已创建");
                    Ok(vec![(FlowKey::VirtualMoneyId, id)])
                }
                None => {
                    info!("虚拟货币已创建（未返回标识）");
                    Ok(Vec::new())
                }
            }
        }
        Stage::TriggerGameAction => {
            let game_action_id = ctx.require(step, FlowKey::GameActionId)?;
            let user_id = ctx.require(step, FlowKey::UserId)?;
            let resp = api
                .trigger_game_action(game_action_id, user_id, &settings.trigger_points)
                .await?;
            expect_truthy(step, &resp)?;
            info!(game_action_id, user_id, points = %settings.trigger_points, "游戏动作已触发");
            Ok(Vec::new())
        }
    }
}

/// 创建项目并通过列表确认它是最新的一个
async fn create_project(api: &ApiClient, step: &str, suffix: &str) -> Result<Produced> {
    let name = format!("Rally automation {}", suffix);
    let resp = api.create_project(&name, &name).await?;
    expect_data(step, &resp)?;
    expect_message(step, &resp, ACK_ADD_OR_UPDATE)?;

    let list = api.list_projects(DEFAULT_PAGE, DEFAULT_PER_PAGE).await?;
    let last = envelope::project_entries(&list)
        .last()
        .ok_or_else(|| RallyError::unexpected(step, "project list should not be empty"))?;

    let last_name = last.get("name").and_then(Value::as_str).unwrap_or_default();
    if last_name != name {
        return Err(RallyError::unexpected(
            step,
            format!("last project should be {:?}, got {:?}", name, last_name),
        ));
    }

    let id = last
        .get("_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RallyError::unexpected(step, "last project should carry an _id"))?
        .to_string();

    info!(project_id = %id, project_name = %name, "项目已创建");
    Ok(vec![(FlowKey::ProjectId, id), (FlowKey::ProjectName, name)])
}

async fn create_user(
    api: &ApiClient,
    ctx: &FlowContext,
    step: &str,
    suffix: &str,
) -> Result<Produced> {
    let application_id = ctx.require(step, FlowKey::ApplicationId)?;
    let user_id = format!("user_{}", suffix);
    let resp = api
        .create_user(application_id, &user_id, &format!("Test User {}", suffix))
        .await?;
    expect_created(step, &resp)?;

    let returned = expect_data_field(step, &resp, "userId")?;
    if returned.as_str() != Some(user_id.as_str()) {
        return Err(RallyError::unexpected(
            step,
            format!("data.userId should be {:?}, got {}", user_id, returned),
        ));
    }

    info!(user_id = %user_id, "用户已创建");
    Ok(vec![(FlowKey::UserId, user_id)])
}
