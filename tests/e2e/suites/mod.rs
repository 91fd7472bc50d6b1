//! 测试套件模块
//!
//! 按场景组织的测试用例集合。

pub mod complete_flow;
pub mod cross_file;
pub mod live;
pub mod preconditions;
pub mod reward_catalog;
pub mod skip_without_token;
pub mod upsert;
