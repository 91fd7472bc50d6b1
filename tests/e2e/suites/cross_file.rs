//! 跨文件标识传递测试套件
//!
//! 两条独立的流水线只通过注解文件共享标识，模拟分开执行的测试文件。

use std::sync::Arc;

use rally_flow::{AnnotationLog, FlowContext, FlowKey, Pipeline, Stage};
use tempfile::TempDir;

use crate::setup::TestEnvironment;

#[tokio::test]
async fn test_second_pipeline_reads_ids_from_annotation_file() {
    let env = TestEnvironment::mock().await.unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("annotations.jsonl");

    let first = Pipeline::builder("setup")
        .with(Stage::CreateProject)
        .with(Stage::CreateApplication)
        .annotations(Arc::new(AnnotationLog::open(&path).unwrap()))
        .build();
    let mut first_ctx = FlowContext::new();
    let report = first.run(&env.api, &mut first_ctx).await;
    assert!(report.is_all_success(), "{}", report.summary());

    // 新的日志实例，从文件重新加载
    let second = Pipeline::builder("rewards")
        .with(Stage::CreateGameAction)
        .with(Stage::CreateUser)
        .with(Stage::TriggerGameAction)
        .annotations(Arc::new(AnnotationLog::open(&path).unwrap()))
        .build();
    assert_eq!(second.external_inputs(), vec![FlowKey::ApplicationId]);

    let mut second_ctx = FlowContext::new();
    let report = second.run(&env.api, &mut second_ctx).await;
    assert!(report.is_all_success(), "{}", report.summary());
    assert_eq!(
        second_ctx.get(FlowKey::ApplicationId),
        first_ctx.get(FlowKey::ApplicationId)
    );

    let history = AnnotationLog::open(&path).unwrap();
    let labels: Vec<_> = history.entries().into_iter().map(|a| a.label).collect();
    assert_eq!(
        labels,
        vec![
            "Project ID",
            "Project Name",
            "Application ID",
            "Game Action ID",
            "User ID"
        ]
    );
}

#[tokio::test]
async fn test_latest_annotation_wins() {
    let env = TestEnvironment::mock().await.unwrap();
    let log = Arc::new(AnnotationLog::in_memory());

    let project_only = Pipeline::builder("project")
        .with(Stage::CreateProject)
        .annotations(log.clone())
        .build();
    project_only.run(&env.api, &mut FlowContext::new()).await;
    project_only.run(&env.api, &mut FlowContext::new()).await;

    let latest = log.latest(FlowKey::ProjectId).unwrap();
    let app_only = Pipeline::builder("application")
        .with(Stage::CreateApplication)
        .annotations(log.clone())
        .build();
    let mut ctx = FlowContext::new();
    let report = app_only.run(&env.api, &mut ctx).await;

    assert!(report.is_all_success(), "{}", report.summary());
    assert_eq!(ctx.get(FlowKey::ProjectId), Some(latest.as_str()));
    let app = env
        .mock_state()
        .applications
        .get(ctx.get(FlowKey::ApplicationId).unwrap())
        .unwrap();
    assert_eq!(app.project_id, latest);
}

#[tokio::test]
async fn test_produced_ids_are_not_replaced_by_history() {
    let env = TestEnvironment::mock().await.unwrap();
    let log = Arc::new(AnnotationLog::in_memory());
    log.record(FlowKey::ApplicationId, "stale-application").unwrap();

    let pipeline = Pipeline::builder("fresh")
        .with(Stage::CreateProject)
        .with(Stage::CreateApplication)
        .with(Stage::CreateGameAction)
        .annotations(log.clone())
        .build();
    let mut ctx = FlowContext::new();
    let report = pipeline.run(&env.api, &mut ctx).await;

    assert!(report.is_all_success(), "{}", report.summary());
    assert_ne!(ctx.get(FlowKey::ApplicationId), Some("stale-application"));
}
