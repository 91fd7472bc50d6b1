//! 接口路径

pub const APPLICATIONS: &str = "/v1/applications";
pub const GAME_ACTION: &str = "/v1/gameAction";
pub const ADD_USER: &str = "/v1/users/addUser";
pub const TRIGGER_GAME_ACTION: &str = "/userCompletedGame/triggerGameAction";
pub const LOOKUP_ITEM: &str = "/v1/lookupItem";
pub const LOOKUP_VALUE: &str = "/v1/lookupValue";
pub const PRIVILEGE_STAGE: &str = "/v1/privilegeStage";
pub const VIP_TIER: &str = "/v1/vipTier";
pub const VIRTUAL_MONEY: &str = "/v1/virtualMoney";

/// 项目创建/更新路径（按客户隔离）
pub fn client_projects(client_id: &str) -> String {
    format!("/v1/projects/client/{}", client_id)
}

/// 项目分页列表路径
pub fn client_projects_page(client_id: &str, page: u32, per_page: u32) -> String {
    format!("/v1/projects/client/{}/{}/{}", client_id, page, per_page)
}
