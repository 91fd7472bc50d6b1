//! 内存存储
//!
//! 使用 DashMap 实现的内存存储，保存 Mock 平台创建的各类资源。

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// 通用内存存储
///
/// 以资源标识为 key。克隆后共享同一份数据，便于在 Handler 与测试之间传递。
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, T>>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// 插入或覆盖
    pub fn insert(&self, id: &str, value: T) {
        self.data.insert(id.to_string(), value);
    }

    /// key 不存在时才插入，返回是否插入成功
    ///
    /// 检查与写入在同一个分片锁内完成。
    pub fn insert_if_absent(&self, id: &str, value: T) -> bool {
        match self.data.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// 取已有数据，不存在时用 `f` 生成并插入；第二个值表示是否新建
    ///
    /// `f` 在持有分片锁时执行，不能再访问同一个存储。
    pub fn get_or_insert_with<F>(&self, id: &str, f: F) -> (T, bool)
    where
        F: FnOnce() -> T,
    {
        match self.data.entry(id.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(slot) => {
                let value = f();
                slot.insert(value.clone());
                (value, true)
            }
        }
    }

    /// 获取数据的克隆，不持有锁
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.get(id).map(|v| v.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    /// 原地修改已存在的数据，返回修改后的克隆
    pub fn update<F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        self.data.get_mut(id).map(|mut entry| {
            f(entry.value_mut());
            entry.value().clone()
        })
    }

    /// 查找第一个满足条件的数据
    pub fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.data
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    /// 按条件筛选数据（顺序不保证）
    pub fn list_by<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.data
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn clear(&self) {
        self.data.clear();
    }
}

impl<T: Clone> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
