// ==========================================
// 飞行排班消冲系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级问题不报错 (跳过), 此处仅覆盖基础设施错误
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件编码错误 (需要 UTF-8): {0}")]
    InvalidEncoding(String),

    // ===== 解析器构建错误 =====
    #[error("排班行模式构建失败: {0}")]
    PatternError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::InvalidData => ImportError::InvalidEncoding(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<regex::Error>
impl From<regex::Error> for ImportError {
    fn from(err: regex::Error) -> Self {
        ImportError::PatternError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
