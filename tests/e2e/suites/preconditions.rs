//! 前置条件测试套件
//!
//! 缺少上游标识的步骤必须在发出请求前失败；前面的步骤失败时，后续步骤逐个报告前置条件失败。

use rally_client::ApiClient;
use rally_flow::{FlowContext, FlowKey, FlowVariant, Pipeline, Stage};
use rally_shared::config::ApiConfig;

use crate::setup::TestEnvironment;

fn trigger_only() -> Pipeline {
    Pipeline::builder("trigger").with(Stage::TriggerGameAction).build()
}

#[tokio::test]
async fn test_trigger_without_ids_makes_no_request() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut ctx = FlowContext::new();

    let report = trigger_only().run(&env.api, &mut ctx).await;

    let result = report.step(Stage::TriggerGameAction).unwrap();
    assert!(result.is_precondition_failure());
    assert_eq!(env.requests(), 0);
}

#[tokio::test]
async fn test_trigger_with_only_game_action_makes_no_request() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut ctx = FlowContext::new().with(FlowKey::GameActionId, "ga-1");

    let report = trigger_only().run(&env.api, &mut ctx).await;

    let result = report.step(Stage::TriggerGameAction).unwrap();
    assert!(result.is_precondition_failure());
    assert!(result.error.as_ref().unwrap().contains("User ID"));
    assert_eq!(env.requests(), 0);
}

#[tokio::test]
async fn test_rejected_project_cascades() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut config = ApiConfig {
        base_url: Some(env.api.base_url().to_string()),
        client_id: Some(env.api.client_id().to_string()),
        token: Some("wrong-token".to_string()),
        ..Default::default()
    };
    config.request_timeout_seconds = 5;
    let api = ApiClient::new(&config).unwrap();
    let mut ctx = FlowContext::new();

    let report = Pipeline::basic().run(&api, &mut ctx).await;

    assert_eq!(report.step_results.len(), 5);
    let first = report.first_failure().unwrap();
    assert_eq!(first.stage, Stage::CreateProject);
    assert_eq!(first.error_code, Some("HTTP_STATUS_ERROR"));
    assert!(first.error.as_ref().unwrap().contains("401"));

    for result in &report.step_results[1..] {
        assert!(result.is_precondition_failure(), "{:?}", result);
    }
    // 只有项目创建请求到达了平台
    assert_eq!(env.requests(), 1);
    assert!(report.into_result().is_err());
}

#[tokio::test]
async fn test_missing_inputs_reported_before_running() {
    let pipeline = Pipeline::builder("gap")
        .variant(FlowVariant::Basic)
        .without(Stage::CreateUser)
        .build();

    let missing = pipeline.missing_inputs(&FlowContext::new());
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].stage, Stage::TriggerGameAction);
    assert_eq!(missing[0].key, FlowKey::UserId);

    let seeded = FlowContext::new().with(FlowKey::UserId, "user_existing");
    assert!(pipeline.missing_inputs(&seeded).is_empty());
}
