//! 注解历史
//!
//! 跨文件传递标识：每个步骤把产出的标识以 `{type, description}` 形式追加到历史中，
//! 后续独立执行的流程从历史里取对应标签的最新值。
//!
//! 历史可以只在内存中，也可以落到 JSON Lines 文件，供多个进程/测试文件共享。

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rally_shared::error::Result;

use crate::context::FlowKey;

/// 一条注解
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub label: String,
    #[serde(rename = "description")]
    pub value: String,
    pub recorded_at: DateTime<Utc>,
}

/// 只追加的注解历史
#[derive(Debug, Default)]
pub struct AnnotationLog {
    entries: Mutex<Vec<Annotation>>,
    path: Option<PathBuf>,
}

impl AnnotationLog {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 打开（或新建）文件支持的注解历史，已有内容会被加载
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = Vec::new();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                entries.push(serde_json::from_str::<Annotation>(line)?);
            }
        }

        tracing::debug!(path = %path.display(), loaded = entries.len(), "注解历史已打开");

        Ok(Self {
            entries: Mutex::new(entries),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, key: FlowKey, value: &str) -> Result<()> {
        self.record_label(key.label(), value)
    }

    /// 按原始标签追加一条注解
    pub fn record_label(&self, label: &str, value: &str) -> Result<()> {
        let annotation = Annotation {
            label: label.to_string(),
            value: value.to_string(),
            recorded_at: Utc::now(),
        };

        // 持锁写文件，保证文件顺序与内存顺序一致
        let mut entries = self.entries.lock();
        if let Some(path) = &self.path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", serde_json::to_string(&annotation)?)?;
        }
        entries.push(annotation);
        Ok(())
    }

    pub fn latest(&self, key: FlowKey) -> Option<String> {
        self.latest_label(key.label())
    }

    /// 取指定标签最近一次记录的值
    pub fn latest_label(&self, label: &str) -> Option<String> {
        self.entries
            .lock()
            .iter()
            .rev()
            .find(|a| a.label == label)
            .map(|a| a.value.clone())
    }

    pub fn entries(&self) -> Vec<Annotation> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
