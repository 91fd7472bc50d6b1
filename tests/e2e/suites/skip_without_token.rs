//! 缺少 token 时跳过

use rally_flow::{FlowContext, Pipeline};

use crate::setup::TestEnvironment;

#[tokio::test]
async fn test_pipeline_is_skipped_without_token() {
    let env = TestEnvironment::mock_with_token(None).await.unwrap();
    assert!(!env.api.has_token());

    let mut ctx = FlowContext::new();
    let report = Pipeline::full().run(&env.api, &mut ctx).await;

    assert!(report.is_skipped());
    assert!(report.is_all_success());
    assert!(report.step_results.is_empty());
    assert_eq!(env.requests(), 0);
    assert!(report.into_result().is_ok());
}

#[tokio::test]
async fn test_blank_token_is_treated_as_missing() {
    let env = TestEnvironment::mock_with_token(Some("  ")).await.unwrap();

    let report = Pipeline::basic().run(&env.api, &mut FlowContext::new()).await;

    assert!(report.is_skipped());
    assert_eq!(env.requests(), 0);
}
