//! 基础流程测试套件
//!
//! 直接调用客户端走一遍完整场景，再用流水线跑同一流程。

use rally_client::{ACK_ADD_OR_UPDATE, ACK_CREATED, envelope};
use rally_flow::{FlowContext, FlowKey, Pipeline, Stage};

use crate::setup::TestEnvironment;

#[tokio::test]
async fn test_end_to_end_scenario() {
    let env = TestEnvironment::mock().await.unwrap();
    let api = &env.api;

    let project = api.create_project("P1", "D1").await.unwrap();
    assert!(envelope::has_data(&project));
    assert_eq!(envelope::message(&project), Some(ACK_ADD_OR_UPDATE));

    let list = api.list_projects(1, 10000).await.unwrap();
    let last = envelope::project_entries(&list).last().unwrap();
    assert_eq!(last["name"], "P1");
    let project_id = last["_id"].as_str().unwrap().to_string();

    let app = api.create_application(&project_id, "App1").await.unwrap();
    assert_eq!(envelope::message(&app), Some(ACK_CREATED));
    let app_id = envelope::created_id(&app).expect("应用应返回标识");

    let game_action = api.create_game_action(&app_id, "GA1").await.unwrap();
    assert_eq!(envelope::message(&game_action), Some(ACK_CREATED));
    assert!(!game_action["data"]["points"].is_null(), "应返回 points 字段");
    let ga_id = envelope::created_id(&game_action).unwrap();

    let user = api.create_user(&app_id, "user_x", "User X").await.unwrap();
    assert_eq!(envelope::message(&user), Some(ACK_CREATED));
    assert_eq!(user["data"]["userId"], "user_x");

    let triggered = api.trigger_game_action(&ga_id, "user_x", "100").await.unwrap();
    assert!(envelope::is_truthy(&triggered));

    assert_eq!(env.mock_state().users.get("user_x").unwrap().total_points, 100);
}

#[tokio::test]
async fn test_basic_pipeline() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut ctx = FlowContext::new();

    let report = Pipeline::basic().run(&env.api, &mut ctx).await;

    assert!(report.is_all_success(), "{}", report.summary());
    let stages: Vec<_> = report.step_results.iter().map(|r| r.stage).collect();
    assert_eq!(stages, Stage::BASIC.to_vec());

    let name = ctx.get(FlowKey::ProjectName).unwrap();
    assert!(name.starts_with("Rally automation "));
    let state = env.mock_state();
    assert_eq!(state.projects.count(), 1);
    assert_eq!(state.triggers.count(), 1);
}

#[tokio::test]
async fn test_each_run_uses_fresh_names() {
    let env = TestEnvironment::mock().await.unwrap();

    let mut first = FlowContext::new();
    let mut second = FlowContext::new();
    assert!(Pipeline::basic().run(&env.api, &mut first).await.is_all_success());
    assert!(Pipeline::basic().run(&env.api, &mut second).await.is_all_success());

    assert_ne!(first.get(FlowKey::ProjectName), second.get(FlowKey::ProjectName));
    assert_ne!(first.get(FlowKey::UserId), second.get(FlowKey::UserId));
    assert_eq!(env.mock_state().projects.count(), 2);
    assert_eq!(env.mock_state().users.count(), 2);
}

#[tokio::test]
async fn test_custom_trigger_points() {
    let env = TestEnvironment::mock().await.unwrap();
    let mut ctx = FlowContext::new();
    let pipeline = Pipeline::builder("points")
        .variant(rally_flow::FlowVariant::Basic)
        .trigger_points("250")
        .build();

    let report = pipeline.run(&env.api, &mut ctx).await;

    assert!(report.is_all_success(), "{}", report.summary());
    let user = env.mock_state().users.get(ctx.get(FlowKey::UserId).unwrap()).unwrap();
    assert_eq!(user.total_points, 250);
}
