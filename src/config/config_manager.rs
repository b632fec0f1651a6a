// ==========================================
// 飞行排班消冲系统 - 配置管理器
// ==========================================
// 职责: 资源配置表的定位 / 加载 / 校验 / 保存
// 查找顺序: 显式路径 > 环境变量 > 用户配置目录 > 内置默认
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::resource_config::ResourceConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "SORTIE_DECONFLICT_CONFIG";

/// 用户配置目录下的应用子目录
const APP_CONFIG_DIR: &str = "sortie-deconflict";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "resource_config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    explicit_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用显式指定的配置文件 (文件必须存在)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit_path: Some(path.into()),
        }
    }

    /// 用户配置目录下的默认配置路径
    ///
    /// 例: ~/.config/sortie-deconflict/resource_config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// 按查找顺序加载配置
    ///
    /// 显式路径与环境变量指向的文件不存在时报错;
    /// 默认路径下没有文件时回退到内置配置
    pub fn load(&self) -> ConfigResult<ResourceConfig> {
        if let Some(path) = &self.explicit_path {
            return Self::load_from_path(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            if !env_path.trim().is_empty() {
                debug!(path = %env_path, "使用环境变量指定的配置文件");
                return Self::load_from_path(Path::new(&env_path));
            }
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        info!("未找到配置文件, 使用内置资源配置");
        let config = ResourceConfig::default();
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn load_from_path(path: &Path) -> ConfigResult<ResourceConfig> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let config: ResourceConfig = serde_json::from_str(&content)?;
        config.validate()?;

        info!(
            path = %path.display(),
            event_types = config.event_types.len(),
            "资源配置加载完成"
        );
        Ok(config)
    }

    /// 保存配置为格式化 JSON (自动创建父目录)
    pub fn save(config: &ResourceConfig, path: &Path) -> ConfigResult<()> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::FileWriteError(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json).map_err(|e| ConfigError::FileWriteError(e.to_string()))?;

        debug!(path = %path.display(), "资源配置已保存");
        Ok(())
    }
}
