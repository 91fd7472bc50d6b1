//! Mock 项目服务
//!
//! 项目按客户隔离：PUT 以名称做 upsert，GET 按创建顺序分页返回。

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ACK_ADD_OR_UPDATE, ApiError, Envelope, RewardApiState, require_name};
use crate::models::{MockProject, object_id};

// ============================================================================
// 请求/响应 DTO
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpsertProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// 项目列表：`data.Items[0].projects`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectListData {
    pub items: Vec<ProjectPage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectPage {
    pub projects: Vec<MockProject>,
    pub total: usize,
}

// ============================================================================
// 路由配置
// ============================================================================

pub fn project_routes() -> Router<Arc<RewardApiState>> {
    Router::new()
        .route("/v1/projects/client/{client_id}", put(upsert_project))
        .route(
            "/v1/projects/client/{client_id}/{page}/{per_page}",
            get(list_projects),
        )
}

// ============================================================================
// Handler 实现
// ============================================================================

/// 创建或更新项目
///
/// 同一客户下名称相同则只更新描述，不会产生重复项目。
async fn upsert_project(
    State(state): State<Arc<RewardApiState>>,
    Path(client_id): Path<String>,
    Json(req): Json<UpsertProjectRequest>,
) -> Result<Json<Envelope<MockProject>>, ApiError> {
    require_name("name", &req.name)?;

    // 名称索引的分片锁覆盖查找与创建，并发 PUT 同名项目只会新建一次
    let key = RewardApiState::project_name_key(&client_id, &req.name);
    let (project_id, created) = state.project_names.get_or_insert_with(&key, || {
        let now = Utc::now();
        let project = MockProject {
            id: object_id(),
            name: req.name.clone(),
            description: req.description.clone(),
            client_id: client_id.clone(),
            created_at: now,
            updated_at: now,
            sequence: state.next_sequence(),
        };
        tracing::info!(project_id = %project.id, name = %project.name, "创建项目");
        let id = project.id.clone();
        state.projects.insert(&id, project);
        id
    });

    let stored = if created {
        state.projects.get(&project_id)
    } else {
        tracing::info!(project_id = %project_id, name = %req.name, "更新项目");
        state.projects.update(&project_id, |p| {
            p.description = req.description.clone();
            p.updated_at = Utc::now();
        })
    };
    let project = stored.ok_or_else(|| ApiError::not_found("Project", &project_id))?;

    Ok(Json(Envelope::new(project, ACK_ADD_OR_UPDATE)))
}

/// 分页列出客户下的项目，按创建顺序排列
async fn list_projects(
    State(state): State<Arc<RewardApiState>>,
    Path((client_id, page, per_page)): Path<(String, usize, usize)>,
) -> (StatusCode, Json<Envelope<ProjectListData>>) {
    let mut projects = state.projects.list_by(|p| p.client_id == client_id);
    projects.sort_by_key(|p| p.sequence);
    let total = projects.len();

    let page = page.max(1);
    let projects: Vec<_> = projects
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    tracing::debug!(client_id = %client_id, page, per_page, total, "列出项目");

    let data = ProjectListData {
        items: vec![ProjectPage { projects, total }],
    };
    (StatusCode::OK, Json(Envelope::new(data, "success")))
}
