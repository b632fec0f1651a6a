// ==========================================
// 飞行排班消冲系统 - 排班行提取器
// ==========================================
// 输入: 按阅读顺序排列的页面文本
// 输出: ScheduleLine 惰性序列 (顺序不保证, 下游排序)
// 失败策略: 从不报错, 无法识别的行直接跳过
// ==========================================
// 行结构:
//   行号 呼号 简令 起飞 落地 <中间字段> 飞行时长 [备注]
//   101  BT21/22 0600 0730 0900 SMITH JONES BFM4601 1.3 RTB
// ==========================================

use crate::config::ResourceConfig;
use crate::domain::schedule::{ClockTime, ScheduleLine};
use crate::importer::callsign::expand_callsign;
use crate::importer::error::ImportResult;
use crate::importer::event_code::EventCodeTable;
use regex::{Captures, Regex};
use tracing::{debug, trace};

/// 页面拼接分隔符 (保持行结构)
pub const PAGE_SEPARATOR: &str = "\n";

/// 拼接页面文本
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// 构建排班行正则
///
/// 字段间只允许水平空白, 一行的匹配不会跨越换行
fn build_row_pattern(prefix: &str) -> ImportResult<Regex> {
    let h = r"[^\S\n]";
    let pattern = format!(
        concat!(
            r"\b(\d{{3,4}}){h}+",
            r"({prefix}{h}*\d{h}*\d(?:{h}*/{h}*\d(?:{h}*\d)?)*){h}+",
            r"(\d{{2}}{h}*\d{{2}}){h}+",
            r"(\d{{2}}{h}*\d{{2}}){h}+",
            r"(\d{{2}}{h}*\d{{2}}){h}+",
            r"([^\n]*?){h}+",
            r"(\d+\.\d)\b",
        ),
        h = h,
        prefix = regex::escape(prefix),
    );
    Ok(Regex::new(&pattern)?)
}

// ==========================================
// LineExtractor - 排班行提取器
// ==========================================
#[derive(Debug, Clone)]
pub struct LineExtractor {
    row_pattern: Regex,
    event_codes: EventCodeTable,
    squadron_prefix: String,
    role_markers: Vec<String>,
    remark_keywords: Vec<String>,
    remark_window_chars: usize,
}

impl LineExtractor {
    pub fn new(config: &ResourceConfig) -> ImportResult<Self> {
        Ok(Self {
            row_pattern: build_row_pattern(&config.squadron_prefix)?,
            event_codes: EventCodeTable::from_config(config),
            squadron_prefix: config.squadron_prefix.clone(),
            role_markers: config.role_markers.clone(),
            remark_keywords: config.remark_keywords.clone(),
            remark_window_chars: config.remark_window_chars,
        })
    }

    /// 从拼接后的全文中惰性提取排班行
    pub fn extract_lines<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ScheduleLine> + 'a {
        self.row_pattern
            .captures_iter(text)
            .flat_map(move |caps| self.lines_from_match(text, &caps))
    }

    /// 提取全部页面中的排班行
    pub fn parse_pages<S: AsRef<str>>(&self, pages: &[S]) -> Vec<ScheduleLine> {
        let text = join_pages(pages);
        let lines: Vec<ScheduleLine> = self.extract_lines(&text).collect();
        debug!(pages = pages.len(), lines = lines.len(), "排班行提取完成");
        lines
    }

    /// 单次匹配 -> 0..n 条排班行 (组合呼号展开)
    fn lines_from_match(&self, text: &str, caps: &Captures<'_>) -> Vec<ScheduleLine> {
        let Some(whole) = caps.get(0) else {
            return Vec::new();
        };
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let times = (
            ClockTime::parse(field(3)),
            ClockTime::parse(field(4)),
            ClockTime::parse(field(5)),
        );
        let (Some(brief_time), Some(takeoff_time), Some(land_time)) = times else {
            trace!(row = whole.as_str(), "时刻非法, 跳过");
            return Vec::new();
        };

        let Some(event) = self.event_codes.find_event(field(6), &self.role_markers) else {
            trace!(row = whole.as_str(), "未识别科目, 跳过");
            return Vec::new();
        };

        let Ok(line_number) = field(1).parse::<u32>() else {
            return Vec::new();
        };
        let flight_hours = field(7).parse::<f64>().unwrap_or(0.0);
        let remarks = self.extract_remarks(&text[whole.end()..]);

        expand_callsign(field(2), &self.squadron_prefix)
            .into_iter()
            .map(|callsign| ScheduleLine {
                line_number,
                callsign,
                brief_time,
                takeoff_time,
                land_time,
                event_type: event.event_type.clone(),
                full_event_code: event.full_code.clone(),
                flight_hours,
                remarks: remarks.clone(),
                raw_text: whole.as_str().to_string(),
            })
            .collect()
    }

    /// 扫描匹配之后的固定窗口, 按关键字顺序输出
    fn extract_remarks(&self, after: &str) -> String {
        let window: String = after.chars().take(self.remark_window_chars).collect();
        self.remark_keywords
            .iter()
            .filter(|kw| window.contains(kw.as_str()))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
