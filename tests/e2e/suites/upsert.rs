//! 项目 upsert 幂等测试

use rally_client::{ACK_ADD_OR_UPDATE, envelope};

use crate::setup::TestEnvironment;

#[tokio::test]
async fn test_create_project_twice_keeps_one_project() {
    let env = TestEnvironment::mock().await.unwrap();

    for _ in 0..2 {
        let resp = env.api.create_project("Idempotent", "same").await.unwrap();
        assert_eq!(envelope::message(&resp), Some(ACK_ADD_OR_UPDATE));
    }

    let list = env.api.list_projects(1, 10000).await.unwrap();
    let projects = envelope::project_entries(&list);
    let matching = projects.iter().filter(|p| p["name"] == "Idempotent").count();
    assert_eq!(matching, 1);
    assert_eq!(env.mock_state().projects.count(), 1);
}

#[tokio::test]
async fn test_upsert_keeps_project_id() {
    let env = TestEnvironment::mock().await.unwrap();

    let first = env.api.create_project("Stable", "v1").await.unwrap();
    let second = env.api.create_project("Stable", "v2").await.unwrap();

    assert_eq!(first["data"]["_id"], second["data"]["_id"]);
    let last = env.api.last_created_project().await.unwrap().unwrap();
    assert_eq!(last["description"], "v2");
}
