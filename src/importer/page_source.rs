// ==========================================
// 飞行排班消冲系统 - 页面文本来源
// ==========================================
// 职责: 提供按阅读顺序排列的页面文本
// 说明: PDF 获取与文本抽取由外部工具完成, 此处只读取其输出
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 分页符 (pdftotext 等工具的默认页分隔)
pub const PAGE_BREAK: char = '\x0c';

// ==========================================
// PageTextProvider Trait
// ==========================================
// 用途: 页面文本来源接口
// 实现者: TextFilePageSource / Vec<String>
pub trait PageTextProvider {
    /// 返回页面文本 (保持阅读顺序)
    fn pages(&self) -> ImportResult<Vec<String>>;
}

impl PageTextProvider for Vec<String> {
    fn pages(&self) -> ImportResult<Vec<String>> {
        Ok(self.clone())
    }
}

// ==========================================
// TextFilePageSource - UTF-8 文本文件, 以分页符分页
// ==========================================
#[derive(Debug, Clone)]
pub struct TextFilePageSource {
    path: PathBuf,
}

impl TextFilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageTextProvider for TextFilePageSource {
    fn pages(&self) -> ImportResult<Vec<String>> {
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(self.path.display().to_string()));
        }

        let content = fs::read_to_string(&self.path)?;
        let pages = split_pages(&content);

        debug!(path = %self.path.display(), pages = pages.len(), "页面文本读取完成");
        Ok(pages)
    }
}

/// 按分页符切分, 去掉末尾的空页
pub fn split_pages(content: &str) -> Vec<String> {
    let mut pages: Vec<String> = content.split(PAGE_BREAK).map(str::to_string).collect();
    while pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}
