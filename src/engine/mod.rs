// ==========================================
// 飞行排班消冲系统 - 引擎层
// ==========================================
// 职责: 空域 / TACAN / 频率三类资源的贪心分配
// 红线: 分配器只读已提交结果, 只有编排器追加结果
// ==========================================

pub mod airspace;
pub mod context;
pub mod frequency;
pub mod orchestrator;
pub mod tacan;

// 重导出核心引擎
pub use airspace::AirspaceAllocator;
pub use context::{Allocation, AllocationContext};
pub use frequency::FrequencyAllocator;
pub use orchestrator::DeconflictionEngine;
pub use tacan::TacanAllocator;
