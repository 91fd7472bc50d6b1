//! REST API 客户端
//!
//! 封装对奖励平台的 HTTP 调用。每个请求携带 `Authorization: Bearer <token>` 与
//! `Content-Type: application/json`，响应体解码为 JSON 后原样返回，不做校验、不重试。

use reqwest::{Client, Method, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use rally_shared::config::ApiConfig;
use rally_shared::error::{RallyError, Result};

use crate::endpoints;
use crate::envelope;
use crate::payloads::{
    ApplicationPayload, GameActionPayload, LookupItemPayload, LookupValuePayload,
    PrivilegeStagePayload, ProjectPayload, TriggerGameActionPayload, UserPayload, VipBenefits,
    VipTierPayload, VirtualMoneyPayload,
};

/// 项目列表默认页码
pub const DEFAULT_PAGE: u32 = 1;
/// 项目列表默认每页条数（足够一次取回全部项目）
pub const DEFAULT_PER_PAGE: u32 = 10000;

/// API 客户端
///
/// 构造时一次性读取地址、客户标识和 token，之后不再变化。
/// token 缺失是合法状态，调用方通过 [`ApiClient::has_token`] 判断是否应跳过。
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    client_id: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("has_token", &self.has_token())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.required_base_url()?;
        let client_id = config.required_client_id()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            token: config
                .token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========== 项目 API ==========

    /// 分页获取客户下的项目列表
    ///
    /// 返回结构中 `data.Items[0].projects` 按创建顺序排列，最后一个为最新创建。
    pub async fn list_projects(&self, page: u32, per_page: u32) -> Result<Value> {
        self.get(&endpoints::client_projects_page(
            &self.client_id,
            page,
            per_page,
        ))
        .await
    }

    /// 创建或更新项目（远端按名称做 upsert）
    pub async fn create_project(&self, name: &str, description: &str) -> Result<Value> {
        let payload = ProjectPayload {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.put(&endpoints::client_projects(&self.client_id), &payload)
            .await
    }

    /// 获取最近创建的项目
    pub async fn last_created_project(&self) -> Result<Option<Value>> {
        let list = self.list_projects(DEFAULT_PAGE, 10).await?;
        Ok(envelope::project_entries(&list).last().cloned())
    }

    // ========== 应用与游戏动作 API ==========

    pub async fn create_application(&self, project_id: &str, name: &str) -> Result<Value> {
        let payload = ApplicationPayload::new(project_id, &self.client_id, name);
        self.post(endpoints::APPLICATIONS, &payload).await
    }

    /// 在应用下定义可获得积分的游戏动作
    pub async fn create_game_action(&self, application_id: &str, name: &str) -> Result<Value> {
        self.post(
            endpoints::GAME_ACTION,
            &GameActionPayload::new(application_id, name),
        )
        .await
    }

    // ========== 用户 API ==========

    pub async fn create_user(
        &self,
        application_id: &str,
        user_id: &str,
        user_name: &str,
    ) -> Result<Value> {
        self.post(
            endpoints::ADD_USER,
            &UserPayload::new(application_id, user_id, user_name),
        )
        .await
    }

    /// 记录用户完成了一次游戏动作
    pub async fn trigger_game_action(
        &self,
        game_action_id: &str,
        user_id: &str,
        points: &str,
    ) -> Result<Value> {
        self.post(
            endpoints::TRIGGER_GAME_ACTION,
            &TriggerGameActionPayload::new(game_action_id, user_id, points),
        )
        .await
    }

    // ========== 奖励目录 API ==========

    pub async fn create_lookup_item(&self, application_id: &str, name: &str) -> Result<Value> {
        self.post(
            endpoints::LOOKUP_ITEM,
            &LookupItemPayload::new(application_id, name),
        )
        .await
    }

    pub async fn create_lookup_value(
        &self,
        lookup_item_id: &str,
        value: &str,
        image_url: &str,
    ) -> Result<Value> {
        let payload = LookupValuePayload {
            lookup_item: lookup_item_id.to_string(),
            value: value.to_string(),
            image_url: image_url.to_string(),
        };
        self.post(endpoints::LOOKUP_VALUE, &payload).await
    }

    /// 创建特权阶段：查找值 + 积分门槛
    pub async fn create_privilege_stage(
        &self,
        lookup_value_id: &str,
        points: i64,
        description: &str,
    ) -> Result<Value> {
        let payload = PrivilegeStagePayload {
            lookup_value: lookup_value_id.to_string(),
            points,
            description: description.to_string(),
        };
        self.post(endpoints::PRIVILEGE_STAGE, &payload).await
    }

    /// 创建 VIP 等级，`badges` 为特权阶段标识列表
    pub async fn create_vip_tier(
        &self,
        application_id: &str,
        name: &str,
        tier_level: i64,
        badges: &[String],
        benefits: &VipBenefits,
    ) -> Result<Value> {
        let payload = VipTierPayload {
            name: name.to_string(),
            tier_level,
            badges: badges.to_vec(),
            benefits: benefits.clone(),
            application: application_id.to_string(),
        };
        self.post(endpoints::VIP_TIER, &payload).await
    }

    pub async fn create_virtual_money(
        &self,
        application_id: &str,
        name: &str,
        value: i64,
    ) -> Result<Value> {
        let payload = VirtualMoneyPayload {
            name: name.to_string(),
            value,
            application: application_id.to_string(),
        };
        self.post(endpoints::VIRTUAL_MONEY, &payload).await
    }

    // ========== 辅助方法 ==========

    async fn get(&self, path: &str) -> Result<Value> {
        let resp = self.request(Method::GET, path).send().await?;
        self.handle_response(resp).await
    }

    async fn post<R: Serialize>(&self, path: &str, body: &R) -> Result<Value> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<R: Serialize>(&self, path: &str, body: &R) -> Result<Value> {
        let resp = self.request(Method::PUT, path).json(body).send().await?;
        self.handle_response(resp).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path, "发送请求");

        let builder = self
            .client
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response(&self, resp: Response) -> Result<Value> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "接口返回非 2xx");
            return Err(RallyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
