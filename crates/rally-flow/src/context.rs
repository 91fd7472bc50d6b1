//! 流程上下文
//!
//! 单次运行内，各步骤通过 [`FlowContext`] 传递上一步产出的标识。
//! 每个标识由 [`FlowKey`] 区分，标签同时用作注解（annotation）的类型名。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use rally_shared::error::{RallyError, Result};

use crate::annotations::AnnotationLog;

/// 步骤之间传递的标识种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlowKey {
    ProjectId,
    ProjectName,
    ApplicationId,
    GameActionId,
    UserId,
    LookupItemId,
    LookupValueId,
    PrivilegeStageId,
    VipTierId,
    VirtualMoneyId,
}

impl FlowKey {
    pub const ALL: [FlowKey; 10] = [
        FlowKey::ProjectId,
        FlowKey::ProjectName,
        FlowKey::ApplicationId,
        FlowKey::GameActionId,
        FlowKey::UserId,
        FlowKey::LookupItemId,
        FlowKey::LookupValueId,
        FlowKey::PrivilegeStageId,
        FlowKey::VipTierId,
        FlowKey::VirtualMoneyId,
    ];

    /// 人类可读标签，也是注解的类型名
    pub fn label(self) -> &'static str {
        match self {
            FlowKey::ProjectId => "Project ID",
            FlowKey::ProjectName => "Project Name",
            FlowKey::ApplicationId => "Application ID",
            FlowKey::GameActionId => "Game Action ID",
            FlowKey::UserId => "User ID",
            FlowKey::LookupItemId => "Lookup Item ID",
            FlowKey::LookupValueId => "Lookup Value ID",
            FlowKey::PrivilegeStageId => "Privilege Stage ID",
            FlowKey::VipTierId => "VIP Tier ID",
            FlowKey::VirtualMoneyId => "Virtual Money ID",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.label() == label)
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单次运行内共享的标识
///
/// 标识一旦写入即视为不可变；同一 key 再次写入只发生在重新运行产出它的步骤时。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowContext {
    values: BTreeMap<FlowKey, String>,
}

impl FlowContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个标识（构造时使用）
    pub fn with(mut self, key: FlowKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: FlowKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// 获取标识，空字符串视为不存在
    pub fn get(&self, key: FlowKey) -> Option<&str> {
        self.values
            .get(&key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: FlowKey) -> bool {
        self.get(key).is_some()
    }

    /// 获取步骤必需的标识，缺失时返回前置条件错误
    pub fn require(&self, step: &str, key: FlowKey) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            RallyError::precondition(step, format!("{} from previous step is required", key))
        })
    }

    /// 已存在的 key（按枚举顺序）
    pub fn keys(&self) -> impl Iterator<Item = FlowKey> + '_ {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| *k)
    }

    /// 用注解历史中每个标签的最新值填充上下文，返回填充的数量
    pub fn seed_from(&mut self, log: &AnnotationLog) -> usize {
        self.seed_keys_from(log, &FlowKey::ALL)
    }

    /// 只填充指定的 key，已存在的值不覆盖
    pub fn seed_keys_from(&mut self, log: &AnnotationLog, keys: &[FlowKey]) -> usize {
        let mut seeded = 0;
        for key in keys {
            if self.contains(*key) {
                continue;
            }
            if let Some(value) = log.latest(*key) {
                self.insert(*key, value);
                seeded += 1;
            }
        }
        seeded
    }
}
