// ==========================================
// 飞行排班消冲系统 - 导入层
// ==========================================
// 职责: 页面文本 -> 排班行 -> 航班
// 红线: 行级问题只跳过, 不中断
// ==========================================

// 模块声明
pub mod callsign;
pub mod error;
pub mod event_code;
pub mod flight_grouper;
pub mod line_extractor;
pub mod page_source;

// 重导出核心类型
pub use callsign::{expand_callsign, normalize_callsign};
pub use error::{ImportError, ImportResult};
pub use event_code::{EventCodeTable, EventMatch};
pub use flight_grouper::FlightGrouper;
pub use line_extractor::{join_pages, LineExtractor};
pub use page_source::{split_pages, PageTextProvider, TextFilePageSource, PAGE_BREAK};
