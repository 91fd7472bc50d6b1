//! 命令执行器

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use rally_client::ApiClient;
use rally_shared::config::RallyConfig;

use crate::annotations::AnnotationLog;
use crate::cli::commands::RunArgs;
use crate::context::FlowContext;
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::stage::Stage;

pub struct CommandRunner {
    config: RallyConfig,
}

impl CommandRunner {
    pub fn new(config: RallyConfig) -> Self {
        Self { config }
    }

    /// 根据参数组装流水线
    pub fn build_pipeline(args: &RunArgs, annotations: Option<Arc<AnnotationLog>>) -> Pipeline {
        let mut builder = if args.only.is_empty() {
            PipelineBuilder::new(args.variant.name()).variant(args.variant)
        } else {
            args.only
                .iter()
                .fold(PipelineBuilder::new("custom"), |b, stage| b.with(*stage))
        };

        for stage in &args.without {
            builder = builder.without(*stage);
        }
        builder = builder.trigger_points(args.points.clone());

        match annotations {
            Some(log) => builder.annotations(log).build(),
            None => builder.build(),
        }
    }

    /// 执行 run 命令
    ///
    /// 缺少 token、地址或客户标识时视为跳过，正常退出。
    pub async fn run_flow(&self, args: &RunArgs) -> Result<()> {
        if !self.config.api.is_runnable() {
            let reason = self.config.api.skip_reason().unwrap_or_default();
            warn!(reason = %reason, "跳过流程");
            println!("已跳过: {}", reason);
            return Ok(());
        }

        let api = ApiClient::new(&self.config.api).context("创建 API 客户端失败")?;

        let annotations = match &args.annotations {
            Some(path) => Some(Arc::new(
                AnnotationLog::open(path)
                    .with_context(|| format!("打开注解文件失败: {}", path.display()))?,
            )),
            None => None,
        };

        let pipeline = Self::build_pipeline(args, annotations.clone());
        if pipeline.stages().is_empty() {
            bail!("没有启用任何步骤");
        }

        let mut ctx = FlowContext::new();
        if let Some(log) = &annotations {
            ctx.seed_keys_from(log, &pipeline.external_inputs());
        }

        let missing = pipeline.missing_inputs(&ctx);
        if !missing.is_empty() {
            for m in &missing {
                warn!(stage = %m.stage, key = %m.key, "缺少输入");
            }
            let details: Vec<_> = missing.iter().map(ToString::to_string).collect();
            bail!("流程依赖不完整: {}", details.join("; "));
        }

        info!(
            flow = pipeline.name(),
            stages = pipeline.stages().len(),
            base_url = api.base_url(),
            "开始运行"
        );
        let report = pipeline.run(&api, &mut ctx).await;

        println!("{}", report.summary());
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        report.into_result()?;
        Ok(())
    }

    /// 执行 stages 命令
    pub fn run_stages(&self) {
        for stage in Stage::ALL {
            let requires: Vec<_> = stage.requires().iter().map(|k| k.label()).collect();
            let produces: Vec<_> = stage.produces().iter().map(|k| k.label()).collect();
            println!(
                "{:<26} {:<24} 需要: [{}]  产出: [{}]",
                stage.label(),
                stage.name(),
                requires.join(", "),
                produces.join(", ")
            );
        }
    }
}
