// ==========================================
// 飞行排班消冲系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含解析逻辑, 不含分配逻辑
// ==========================================

pub mod assignment;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use assignment::{
    AirspaceAssignment, Conflict, DeconflictResult, DeconflictionOutcome, FrequencyAssignment,
    TacanAssignment,
};
pub use schedule::{ClockTime, Flight, ScheduleLine, TimeWindow, SWAP_MARKER};
pub use types::{AirspaceId, ConflictKind, FlightType, Frequency};
