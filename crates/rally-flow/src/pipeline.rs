//! 参数化流水线
//!
//! 同一条流水线通过开关步骤得到不同的流程变体，步骤顺序始终保持规范顺序。
//! 运行前可用 [`Pipeline::missing_inputs`] 静态检查依赖是否闭合。

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, instrument, warn};

use rally_client::ApiClient;
use rally_client::payloads::VipBenefits;
use rally_shared::config::TOKEN_VAR;
use rally_shared::error::RallyError;

use crate::annotations::AnnotationLog;
use crate::context::{FlowContext, FlowKey};
use crate::report::{FlowReport, StepResult};
use crate::stage::Stage;
use crate::steps;

/// 默认触发积分（接口以字符串接收）
pub const DEFAULT_TRIGGER_POINTS: &str = "100";

/// 流程变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowVariant {
    /// 项目 → 应用 → 游戏动作 → 用户 → 触发
    #[default]
    Basic,
    /// 全部十个步骤
    Full,
}

impl FlowVariant {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            FlowVariant::Basic => &Stage::BASIC,
            FlowVariant::Full => &Stage::ALL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlowVariant::Basic => "basic",
            FlowVariant::Full => "full",
        }
    }
}

impl fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlowVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(FlowVariant::Basic),
            "full" => Ok(FlowVariant::Full),
            other => Err(format!("未知流程变体 '{}'，可选: basic, full", other)),
        }
    }
}

/// 步骤使用的固定参数
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    pub trigger_points: String,
    pub privilege_points: i64,
    pub vip_tier_level: i64,
    pub vip_benefits: VipBenefits,
    pub virtual_money_value: i64,
    pub badge_image_url: String,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            trigger_points: DEFAULT_TRIGGER_POINTS.to_string(),
            privilege_points: 500,
            vip_tier_level: 1,
            vip_benefits: VipBenefits::default(),
            virtual_money_value: 1,
            badge_image_url: "https://static.example.com/badges/gold.png".to_string(),
        }
    }
}

/// 某个步骤缺少的输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingInput {
    pub stage: Stage,
    pub key: FlowKey,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 需要 {}", self.stage, self.key)
    }
}

/// 流水线构建器
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    name: String,
    stages: BTreeSet<Stage>,
    settings: FlowSettings,
    annotations: Option<Arc<AnnotationLog>>,
}

impl PipelineBuilder {
    /// 从空流水线开始
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: BTreeSet::new(),
            settings: FlowSettings::default(),
            annotations: None,
        }
    }

    /// 使用预置变体的步骤集合（覆盖之前的选择）
    pub fn variant(mut self, variant: FlowVariant) -> Self {
        self.stages = variant.stages().iter().copied().collect();
        self
    }

    pub fn with(mut self, stage: Stage) -> Self {
        self.stages.insert(stage);
        self
    }

    pub fn without(mut self, stage: Stage) -> Self {
        self.stages.remove(&stage);
        self
    }

    pub fn trigger_points(mut self, points: impl Into<String>) -> Self {
        self.settings.trigger_points = points.into();
        self
    }

    pub fn settings(mut self, settings: FlowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 绑定注解历史：运行前读取外部输入，运行中记录产出
    pub fn annotations(mut self, log: Arc<AnnotationLog>) -> Self {
        self.annotations = Some(log);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            stages: self.stages.into_iter().collect(),
            settings: self.settings,
            annotations: self.annotations,
        }
    }
}

/// 按规范顺序串行执行的流水线
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
    settings: FlowSettings,
    annotations: Option<Arc<AnnotationLog>>,
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    pub fn basic() -> Self {
        Self::builder("basic").variant(FlowVariant::Basic).build()
    }

    pub fn full() -> Self {
        Self::builder("full").variant(FlowVariant::Full).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// 静态依赖检查
    ///
    /// 对每个启用的步骤，列出既不在上下文中、也不由更早启用步骤产出的必需标识。
    pub fn missing_inputs(&self, ctx: &FlowContext) -> Vec<MissingInput> {
        let mut available: HashSet<FlowKey> = ctx.keys().collect();
        let mut missing = Vec::new();

        for stage in &self.stages {
            for key in stage.requires() {
                if !available.contains(key) {
                    missing.push(MissingInput { stage: *stage, key: *key });
                }
            }
            available.extend(stage.produces().iter().copied());
        }
        missing
    }

    /// 需要从流水线外部获得的标识（不由任何更早启用的步骤产出）
    pub fn external_inputs(&self) -> Vec<FlowKey> {
        let mut produced: HashSet<FlowKey> = HashSet::new();
        let mut external: BTreeSet<FlowKey> = BTreeSet::new();

        for stage in &self.stages {
            for key in stage.requires() {
                if !produced.contains(key) {
                    external.insert(*key);
                }
            }
            produced.extend(stage.produces().iter().copied());
        }
        external.into_iter().collect()
    }

    /// 执行流水线
    ///
    /// 缺少 token 时不发出任何请求，直接返回跳过报告。
    /// 某一步失败后继续执行后续步骤，它们会在各自的前置检查处失败。
    #[instrument(skip(self, api, ctx), fields(flow = %self.name))]
    pub async fn run(&self, api: &ApiClient, ctx: &mut FlowContext) -> FlowReport {
        if !api.has_token() {
            let reason = format!("{} not set", TOKEN_VAR);
            warn!(reason = %reason, "缺少 token，跳过流程");
            return FlowReport::skipped(&self.name, reason);
        }

        let started = Instant::now();
        let mut report = FlowReport::new(&self.name);

        if let Some(log) = &self.annotations {
            // 只读取外部输入，流水线自己产出的标识不能用历史值顶替
            let seeded = ctx.seed_keys_from(log, &self.external_inputs());
            if seeded > 0 {
                info!(seeded, "已从注解历史读取外部输入");
            }
        }

        info!(stages = self.stages.len(), "开始执行流程");

        for stage in &self.stages {
            let stage_started = Instant::now();
            let executed = steps::execute(*stage, api, ctx, &self.settings).await;
            let outcome = match executed {
                Ok(produced) => self.publish(ctx, &produced).map(|_| produced),
                Err(e) => Err(e),
            };
            let elapsed = stage_started.elapsed().as_millis() as u64;

            let result = match outcome {
                Ok(produced) => {
                    info!(stage = %stage, duration_ms = elapsed, "步骤通过");
                    StepResult::passed(*stage, produced, elapsed)
                }
                Err(e) => {
                    if e.is_precondition() {
                        warn!(stage = %stage, error = %e, "步骤前置条件不满足");
                    } else {
                        error!(stage = %stage, error = %e, code = e.code(), "步骤失败");
                    }
                    StepResult::failed(*stage, &e, elapsed)
                }
            };
            report.step_results.push(result);
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            success_rate = report.success_rate(),
            duration_ms = report.duration_ms,
            "流程执行完成"
        );
        report
    }

    /// 先追加到注解历史，全部写入成功后才放进上下文
    ///
    /// 记录失败时步骤判为失败，产出不会流向后续步骤。
    fn publish(&self, ctx: &mut FlowContext, produced: &[(FlowKey, String)]) -> Result<(), RallyError> {
        if let Some(log) = &self.annotations {
            for (key, value) in produced {
                log.record(*key, value)?;
            }
        }
        for (key, value) in produced {
            ctx.insert(*key, value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rally_shared::config::ApiConfig;

    fn client(token: Option<&str>) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            client_id: Some("client-1".to_string()),
            token: token.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_variants_keep_canonical_order() {
        assert_eq!(Pipeline::basic().stages(), &Stage::BASIC);
        assert_eq!(Pipeline::full().stages(), &Stage::ALL);

        let custom = Pipeline::builder("custom")
            .with(Stage::TriggerGameAction)
            .with(Stage::CreateProject)
            .with(Stage::CreateUser)
            .build();
        assert_eq!(
            custom.stages(),
            &[Stage::CreateProject, Stage::CreateUser, Stage::TriggerGameAction]
        );
    }

    #[test]
    fn test_complete_variants_have_no_missing_inputs() {
        let ctx = FlowContext::new();
        assert!(Pipeline::basic().missing_inputs(&ctx).is_empty());
        assert!(Pipeline::full().missing_inputs(&ctx).is_empty());
    }

    #[test]
    fn test_missing_inputs_after_disabling_stage() {
        let pipeline = Pipeline::builder("no-game-action")
            .variant(FlowVariant::Basic)
            .without(Stage::CreateGameAction)
            .build();

        let missing = pipeline.missing_inputs(&FlowContext::new());
        assert_eq!(
            missing,
            vec![MissingInput {
                stage: Stage::TriggerGameAction,
                key: FlowKey::GameActionId
            }]
        );

        let ctx = FlowContext::new().with(FlowKey::GameActionId, "ga-1");
        assert!(pipeline.missing_inputs(&ctx).is_empty());
    }

    #[test]
    fn test_external_inputs() {
        let trigger_only = Pipeline::builder("trigger")
            .with(Stage::TriggerGameAction)
            .build();
        assert_eq!(
            trigger_only.external_inputs(),
            vec![FlowKey::GameActionId, FlowKey::UserId]
        );
        assert!(Pipeline::full().external_inputs().is_empty());
    }

    #[test]
    fn test_builder_settings() {
        let pipeline = Pipeline::builder("p").trigger_points("250").build();
        assert_eq!(pipeline.settings().trigger_points, "250");
        assert_eq!(Pipeline::basic().settings().trigger_points, DEFAULT_TRIGGER_POINTS);
        assert_eq!("FULL".parse::<FlowVariant>().unwrap(), FlowVariant::Full);
        assert!("partial".parse::<FlowVariant>().is_err());
    }

    #[test]
    fn test_run_without_token_is_skipped() {
        let api = client(None);
        let mut ctx = FlowContext::new();

        let report = tokio_test::block_on(Pipeline::full().run(&api, &mut ctx));

        assert!(report.is_skipped());
        assert!(report.step_results.is_empty());
        assert!(report.is_all_success());
        assert!(report.skipped.unwrap().contains("BEARER_PROJECT_TOKEN"));
        assert_eq!(ctx.keys().count(), 0);
    }

    #[test]
    fn test_precondition_failures_make_no_requests() {
        // 端口 9 上没有服务；前置条件失败时不会触达网络
        let api = client(Some("t"));
        let mut ctx = FlowContext::new();
        let pipeline = Pipeline::builder("trigger").with(Stage::TriggerGameAction).build();

        let report = tokio_test::block_on(pipeline.run(&api, &mut ctx));

        let result = report.step(Stage::TriggerGameAction).unwrap();
        assert!(!result.success);
        assert!(result.is_precondition_failure());
        assert!(result.error.as_ref().unwrap().contains("Game Action ID"));
    }
}
