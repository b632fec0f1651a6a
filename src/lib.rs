// ==========================================
// 飞行排班消冲系统 - 核心库
// ==========================================
// 输入: 排班文档页面文本 + 资源配置表
// 输出: 每航班的空域 / TACAN / 频率分配 + 冲突清单
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 资源配置表
pub mod config;

// 导入层 - 文本提取与编队分组
pub mod importer;

// 引擎层 - 资源分配
pub mod engine;

// 报告层 - 汇总与导出
pub mod report;

// 运行管线
pub mod pipeline;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AirspaceId, ConflictKind, FlightType, Frequency};

// 领域实体
pub use domain::{
    AirspaceAssignment, ClockTime, Conflict, DeconflictResult, DeconflictionOutcome, Flight,
    FrequencyAssignment, ScheduleLine, TacanAssignment,
};

// 配置
pub use config::{ConfigManager, ResourceConfig};

// 导入
pub use importer::{FlightGrouper, LineExtractor, PageTextProvider, TextFilePageSource};

// 引擎
pub use engine::DeconflictionEngine;

// 管线
pub use pipeline::{DeconflictionPipeline, PipelineError, PipelineReport};

// 报告
pub use report::RunSummary;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "飞行排班消冲系统";
