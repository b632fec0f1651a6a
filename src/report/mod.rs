// ==========================================
// 飞行排班消冲系统 - 报告层
// ==========================================
// 职责: 运行汇总 + CSV/JSON 导出
// ==========================================

pub mod error;
pub mod export;
pub mod summary;

pub use error::{ExportError, ExportResult};
pub use export::{
    assignment_rows, export_assignment_csv, export_json, write_assignment_csv, write_json,
    AssignmentRow,
};
pub use summary::{PoolUtilization, RunSummary};
