//! 流程步骤定义
//!
//! 每个步骤声明自己需要哪些标识、会产出哪些标识，流水线据此做静态依赖检查。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::FlowKey;

/// 流程步骤（按规范顺序排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    CreateProject,
    CreateApplication,
    CreateGameAction,
    CreateUser,
    CreateLookupItem,
    CreateLookupValue,
    CreatePrivilegeStage,
    CreateVipTier,
    CreateVirtualMoney,
    TriggerGameAction,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::CreateProject,
        Stage::CreateApplication,
        Stage::CreateGameAction,
        Stage::CreateUser,
        Stage::CreateLookupItem,
        Stage::CreateLookupValue,
        Stage::CreatePrivilegeStage,
        Stage::CreateVipTier,
        Stage::CreateVirtualMoney,
        Stage::TriggerGameAction,
    ];

    /// 基础流程：项目 → 应用 → 游戏动作 → 用户 → 触发
    pub const BASIC: [Stage; 5] = [
        Stage::CreateProject,
        Stage::CreateApplication,
        Stage::CreateGameAction,
        Stage::CreateUser,
        Stage::TriggerGameAction,
    ];

    /// 命令行使用的名称
    pub fn name(self) -> &'static str {
        match self {
            Stage::CreateProject => "create-project",
            Stage::CreateApplication => "create-application",
            Stage::CreateGameAction => "create-game-action",
            Stage::CreateUser => "create-user",
            Stage::CreateLookupItem => "create-lookup-item",
            Stage::CreateLookupValue => "create-lookup-value",
            Stage::CreatePrivilegeStage => "create-privilege-stage",
            Stage::CreateVipTier => "create-vip-tier",
            Stage::CreateVirtualMoney => "create-virtual-money",
            Stage::TriggerGameAction => "trigger-game-action",
        }
    }

    /// 报告与日志中显示的步骤标题
    pub fn label(self) -> &'static str {
        match self {
            Stage::CreateProject => "1. Create Project",
            Stage::CreateApplication => "2. Create Application",
            Stage::CreateGameAction => "3. Create Game Action",
            Stage::CreateUser => "4. Create User",
            Stage::CreateLookupItem => "5. Create Lookup Item",
            Stage::CreateLookupValue => "6. Create Lookup Value",
            Stage::CreatePrivilegeStage => "7. Create Privilege Stage",
            Stage::CreateVipTier => "8. Create VIP Tier",
            Stage::CreateVirtualMoney => "9. Create Virtual Money",
            Stage::TriggerGameAction => "10. Trigger Game Action",
        }
    }

    /// 执行前必须存在的标识
    pub fn requires(self) -> &'static [FlowKey] {
        match self {
            Stage::CreateProject => &[],
            Stage::CreateApplication => &[FlowKey::ProjectId],
            Stage::CreateGameAction
            | Stage::CreateUser
            | Stage::CreateLookupItem
            | Stage::CreateVirtualMoney => &[FlowKey::ApplicationId],
            Stage::CreateLookupValue => &[FlowKey::LookupItemId],
            Stage::CreatePrivilegeStage => &[FlowKey::LookupValueId],
            Stage::CreateVipTier => &[FlowKey::ApplicationId, FlowKey::PrivilegeStageId],
            Stage::TriggerGameAction => &[FlowKey::GameActionId, FlowKey::UserId],
        }
    }

    /// 成功后产出的标识
    ///
    /// `CreateVirtualMoney` 的标识可能不返回，下游不依赖它。
    pub fn produces(self) -> &'static [FlowKey] {
        match self {
            Stage::CreateProject => &[FlowKey::ProjectId, FlowKey::ProjectName],
            Stage::CreateApplication => &[FlowKey::ApplicationId],
            Stage::CreateGameAction => &[FlowKey::GameActionId],
            Stage::CreateUser => &[FlowKey::UserId],
            Stage::CreateLookupItem => &[FlowKey::LookupItemId],
            Stage::CreateLookupValue => &[FlowKey::LookupValueId],
            Stage::CreatePrivilegeStage => &[FlowKey::PrivilegeStageId],
            Stage::CreateVipTier => &[FlowKey::VipTierId],
            Stage::CreateVirtualMoney => &[FlowKey::VirtualMoneyId],
            Stage::TriggerGameAction => &[],
        }
    }

    /// 是否属于奖励目录子链（查找项 → 查找值 → 特权阶段 → VIP 等级）
    pub fn is_catalog(self) -> bool {
        matches!(
            self,
            Stage::CreateLookupItem
                | Stage::CreateLookupValue
                | Stage::CreatePrivilegeStage
                | Stage::CreateVipTier
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == normalized)
            .ok_or_else(|| {
                let names: Vec<_> = Stage::ALL.iter().map(|s| s.name()).collect();
                format!("未知步骤 '{}'，可选: {}", s, names.join(", "))
            })
    }
}
