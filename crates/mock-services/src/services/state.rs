//! Mock 平台共享状态

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{
    MockApplication, MockGameAction, MockLookupItem, MockLookupValue, MockPrivilegeStage,
    MockProject, MockTrigger, MockUser, MockVipTier, MockVirtualMoney,
};
use crate::store::MemoryStore;

/// 奖励平台服务状态
///
/// 每类资源一个内存存储；用户以调用方指定的 `userId` 为 key，其余资源以 `_id` 为 key。
pub struct RewardApiState {
    token: Option<String>,
    pub projects: MemoryStore<MockProject>,
    pub applications: MemoryStore<MockApplication>,
    pub game_actions: MemoryStore<MockGameAction>,
    pub users: MemoryStore<MockUser>,
    pub triggers: MemoryStore<MockTrigger>,
    pub lookup_items: MemoryStore<MockLookupItem>,
    pub lookup_values: MemoryStore<MockLookupValue>,
    pub privilege_stages: MemoryStore<MockPrivilegeStage>,
    pub vip_tiers: MemoryStore<MockVipTier>,
    pub virtual_money: MemoryStore<MockVirtualMoney>,
    /// (客户标识, 项目名) → 项目 `_id`
    pub(crate) project_names: MemoryStore<String>,
    requests: AtomicU64,
    sequence: AtomicU64,
}

impl RewardApiState {
    /// 创建状态；`token` 为 `None` 时不校验认证头
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            projects: MemoryStore::new(),
            applications: MemoryStore::new(),
            game_actions: MemoryStore::new(),
            users: MemoryStore::new(),
            triggers: MemoryStore::new(),
            lookup_items: MemoryStore::new(),
            lookup_values: MemoryStore::new(),
            privilege_stages: MemoryStore::new(),
            vip_tiers: MemoryStore::new(),
            virtual_money: MemoryStore::new(),
            project_names: MemoryStore::new(),
            requests: AtomicU64::new(0),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn expected_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 已收到的业务请求数（含被拒绝的请求）
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    pub(crate) fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn project_name_key(client_id: &str, name: &str) -> String {
        format!("{}\u{1f}{}", client_id, name)
    }

    /// 单调递增的创建序号
    pub(crate) fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for RewardApiState {
    fn default() -> Self {
        Self::new(None)
    }
}
