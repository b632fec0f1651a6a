// ==========================================
// 飞行排班消冲系统 - 运行管线
// ==========================================
// 流程: 页面文本 -> 排班行 -> 航班 -> 消冲结果 -> 汇总
// ==========================================

use crate::config::{ConfigError, ResourceConfig};
use crate::domain::assignment::DeconflictionOutcome;
use crate::domain::schedule::{Flight, ScheduleLine};
use crate::engine::DeconflictionEngine;
use crate::importer::{FlightGrouper, ImportError, LineExtractor, PageTextProvider};
use crate::report::RunSummary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("未在排班文本中识别到任何航班")]
    NoFlightsFound,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;

/// 单次运行的完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub lines: Vec<ScheduleLine>,
    pub flights: Vec<Flight>,
    pub outcome: DeconflictionOutcome,
    pub summary: RunSummary,
}

// ==========================================
// DeconflictionPipeline - 运行管线
// ==========================================
pub struct DeconflictionPipeline {
    config: Arc<ResourceConfig>,
    extractor: LineExtractor,
    grouper: FlightGrouper,
    engine: DeconflictionEngine,
}

impl DeconflictionPipeline {
    /// 创建管线 (配置先行校验)
    pub fn new(config: Arc<ResourceConfig>) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            extractor: LineExtractor::new(&config)?,
            grouper: FlightGrouper::new(&config),
            engine: DeconflictionEngine::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// 执行完整流程
    ///
    /// # 返回
    /// - Err(NoFlightsFound): 没有提取到任何排班行
    pub fn run<S: AsRef<str>>(&self, pages: &[S]) -> PipelineResult<PipelineReport> {
        let lines = self.extractor.parse_pages(pages);
        if lines.is_empty() {
            return Err(PipelineError::NoFlightsFound);
        }
        info!(lines = lines.len(), "排班行提取完成");

        let flights = self.grouper.group(lines.clone());
        info!(flights = flights.len(), "航班分组完成");

        let outcome = self.engine.run(&flights);
        let summary = RunSummary::build(lines.len(), &outcome, &self.config);

        Ok(PipelineReport {
            lines,
            flights,
            outcome,
            summary,
        })
    }

    /// 从页面文本来源读取后执行
    pub fn run_provider(&self, provider: &dyn PageTextProvider) -> PipelineResult<PipelineReport> {
        let pages = provider.pages()?;
        self.run(pages.as_slice())
    }
}
