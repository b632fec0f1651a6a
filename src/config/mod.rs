// ==========================================
// 飞行排班消冲系统 - 配置层
// ==========================================
// 职责: 资源配置表 (科目规则 / 空域 / TACAN / 频率)
// 存储: JSON 文件, 缺省为内置中队配置
// ==========================================

pub mod config_manager;
pub mod error;
pub mod resource_config;

// 重导出核心配置类型
pub use config_manager::{ConfigManager, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
pub use resource_config::{
    AirspacePool, ContestedPreference, EventTypeRule, ResourceConfig, TacanPreset,
};
