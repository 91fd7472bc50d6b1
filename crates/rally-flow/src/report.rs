//! 运行结果汇总

use serde::Serialize;
use thiserror::Error;

use rally_shared::error::RallyError;

use crate::context::FlowKey;
use crate::stage::Stage;

/// 单个步骤的执行结果
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub stage: Stage,
    pub success: bool,
    pub error: Option<String>,
    pub error_code: Option<&'static str>,
    pub produced: Vec<(FlowKey, String)>,
    pub duration_ms: u64,
}

impl StepResult {
    pub fn passed(stage: Stage, produced: Vec<(FlowKey, String)>, duration_ms: u64) -> Self {
        Self {
            stage,
            success: true,
            error: None,
            error_code: None,
            produced,
            duration_ms,
        }
    }

    pub fn failed(stage: Stage, error: &RallyError, duration_ms: u64) -> Self {
        Self {
            stage,
            success: false,
            error: Some(error.to_string()),
            error_code: Some(error.code()),
            produced: Vec::new(),
            duration_ms,
        }
    }

    /// 是否因为上游标识缺失而失败
    pub fn is_precondition_failure(&self) -> bool {
        self.error_code == Some("PRECONDITION_FAILED")
    }
}

/// 一次流程运行的报告
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    pub flow_name: String,
    /// 跳过原因；跳过时不会发出任何请求
    pub skipped: Option<String>,
    pub step_results: Vec<StepResult>,
    pub duration_ms: u64,
}

impl FlowReport {
    pub fn new(flow_name: impl Into<String>) -> Self {
        Self {
            flow_name: flow_name.into(),
            skipped: None,
            step_results: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn skipped(flow_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            skipped: Some(reason.into()),
            ..Self::new(flow_name)
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }

    /// 没有任何失败步骤（跳过也算）
    pub fn is_all_success(&self) -> bool {
        self.step_results.iter().all(|r| r.success)
    }

    pub fn first_failure(&self) -> Option<&StepResult> {
        self.step_results.iter().find(|r| !r.success)
    }

    pub fn failed_steps(&self) -> Vec<Stage> {
        self.step_results
            .iter()
            .filter(|r| !r.success)
            .map(|r| r.stage)
            .collect()
    }

    pub fn step(&self, stage: Stage) -> Option<&StepResult> {
        self.step_results.iter().find(|r| r.stage == stage)
    }

    /// 成功率（百分比），没有执行任何步骤时为 100
    pub fn success_rate(&self) -> f64 {
        if self.step_results.is_empty() {
            return 100.0;
        }
        let passed = self.step_results.iter().filter(|r| r.success).count();
        passed as f64 / self.step_results.len() as f64 * 100.0
    }

    /// 全部通过或被跳过时返回 `Ok`
    pub fn into_result(self) -> Result<Self, FlowFailure> {
        let failure = self.first_failure().map(|first| FlowFailure {
            flow_name: self.flow_name.clone(),
            failed: self.failed_steps().len(),
            total: self.step_results.len(),
            first_stage: first.stage,
            first_error: first.error.clone().unwrap_or_default(),
        });

        match failure {
            Some(failure) => Err(failure),
            None => Ok(self),
        }
    }

    /// 输出人类可读的摘要
    pub fn summary(&self) -> String {
        if let Some(reason) = &self.skipped {
            return format!("[{}] 已跳过: {}", self.flow_name, reason);
        }

        let mut lines = vec![format!(
            "[{}] {}/{} 步骤通过 ({:.1}%), 耗时 {}ms",
            self.flow_name,
            self.step_results.iter().filter(|r| r.success).count(),
            self.step_results.len(),
            self.success_rate(),
            self.duration_ms
        )];
        for r in &self.step_results {
            let status = if r.success { "PASS" } else { "FAIL" };
            let mut line = format!("  {} {} ({}ms)", status, r.stage, r.duration_ms);
            if let Some(err) = &r.error {
                line.push_str(&format!(" - {}", err));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

/// 流程存在失败步骤
#[derive(Debug, Error)]
#[error("流程 {flow_name} 失败: {failed}/{total} 个步骤失败，首个失败 [{first_stage}]: {first_error}")]
pub struct FlowFailure {
    pub flow_name: String,
    pub failed: usize,
    pub total: usize,
    pub first_stage: Stage,
    pub first_error: String,
}
