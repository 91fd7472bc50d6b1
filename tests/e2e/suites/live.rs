//! 真实平台测试套件
//!
//! 需要 BASE_URL、CLIENT_ID 与 BEARER_PROJECT_TOKEN；缺少时在运行期跳过。

use rally_flow::{FlowContext, FlowKey, Pipeline};

use crate::setup::TestEnvironment;

#[tokio::test]
#[ignore = "需要真实平台"]
async fn test_live_basic_flow() {
    let Some(env) = TestEnvironment::live().unwrap() else {
        return;
    };

    let mut ctx = FlowContext::new();
    let report = Pipeline::basic().run(&env.api, &mut ctx).await;

    println!("{}", report.summary());
    assert!(report.is_all_success(), "{}", report.summary());
    assert!(ctx.contains(FlowKey::UserId));
}

#[tokio::test]
#[ignore = "需要真实平台"]
async fn test_live_full_flow() {
    let Some(env) = TestEnvironment::live().unwrap() else {
        return;
    };

    let mut ctx = FlowContext::new();
    let report = Pipeline::full().run(&env.api, &mut ctx).await;

    println!("{}", report.summary());
    report.into_result().unwrap();
}
