//! 模拟数据模型
//!
//! 平台资源的模拟数据结构。序列化形状与真实平台一致：标识字段为 `_id`，其余字段 camelCase。

pub mod application;
pub mod catalog;
pub mod project;

pub use application::{MockApplication, MockGameAction, MockTrigger, MockUser};
pub use catalog::{MockLookupItem, MockLookupValue, MockPrivilegeStage, MockVipTier, MockVirtualMoney};
pub use project::MockProject;

use uuid::Uuid;

/// 生成 24 位十六进制标识（与平台的 ObjectId 长度一致）
pub fn object_id() -> String {
    Uuid::new_v4().simple().to_string()[..24].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_shape() {
        let id = object_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, object_id());
    }
}
