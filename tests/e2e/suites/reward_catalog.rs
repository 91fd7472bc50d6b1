//! 奖励目录流程测试套件

use rally_flow::{FlowContext, FlowKey, FlowVariant, Pipeline, Stage};

use crate::setup::TestEnvironment;

#[tokio::test]
async fn test_full_pipeline_creates_catalog_chain() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut ctx = FlowContext::new();

    let report = Pipeline::full().run(&env.api, &mut ctx).await;

    assert!(report.is_all_success(), "{}", report.summary());
    assert_eq!(report.step_results.len(), Stage::ALL.len());

    let state = env.mock_state();
    let tier = state
        .vip_tiers
        .get(ctx.get(FlowKey::VipTierId).unwrap())
        .unwrap();
    assert_eq!(tier.badges, vec![ctx.get(FlowKey::PrivilegeStageId).unwrap().to_string()]);
    assert_eq!(tier.application, ctx.get(FlowKey::ApplicationId).unwrap());

    let stage = state
        .privilege_stages
        .get(ctx.get(FlowKey::PrivilegeStageId).unwrap())
        .unwrap();
    assert_eq!(stage.points, 500);
    assert_eq!(stage.lookup_value, ctx.get(FlowKey::LookupValueId).unwrap());

    assert_eq!(state.virtual_money.count(), 1);
    assert_eq!(state.triggers.count(), 1);
}

#[tokio::test]
async fn test_catalog_stages_can_be_toggled_off() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut builder = Pipeline::builder("no-catalog").variant(FlowVariant::Full);
    for stage in Stage::ALL.into_iter().filter(|s| s.is_catalog()) {
        builder = builder.without(stage);
    }
    let pipeline = builder.build();
    assert!(pipeline.missing_inputs(&FlowContext::new()).is_empty());

    let mut ctx = FlowContext::new();
    let report = pipeline.run(&env.api, &mut ctx).await;

    assert!(report.is_all_success(), "{}", report.summary());
    assert_eq!(report.step_results.len(), 6);
    assert!(!ctx.contains(FlowKey::VipTierId));
    assert_eq!(env.mock_state().lookup_items.count(), 0);
}

#[tokio::test]
async fn test_vip_tier_without_privilege_stage_is_flagged_statically() {
    let pipeline = Pipeline::builder("broken")
        .variant(FlowVariant::Full)
        .without(Stage::CreatePrivilegeStage)
        .build();

    let missing = pipeline.missing_inputs(&FlowContext::new());
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].stage, Stage::CreateVipTier);
    assert_eq!(missing[0].key, FlowKey::PrivilegeStageId);
}
