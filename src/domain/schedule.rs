// ==========================================
// 飞行排班消冲系统 - 排班领域模型
// ==========================================
// 职责: 时刻 / 排班行 / 编队(航班)
// 红线: ScheduleLine 生成后不可变 (仅学员互换标记可追加)
// ==========================================

use crate::domain::types::FlightType;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 学员互换标记
pub const SWAP_MARKER: &str = "SWAP";

// ==========================================
// ClockTime - 24 小时制时刻 (HHMM)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ClockTime(u16);

impl ClockTime {
    /// 从 HHMM 整数构造, 小时 > 23 或分钟 > 59 时返回 None
    pub fn from_hhmm(hhmm: u16) -> Option<Self> {
        let (hour, minute) = (hhmm / 100, hhmm % 100);
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(ClockTime(hhmm))
    }

    /// 解析 PDF 抽取出的时刻文本
    ///
    /// 允许内部空白: "06 15" -> 0615, "0815" -> 0815
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.is_empty() || cleaned.len() > 4 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        cleaned.parse::<u16>().ok().and_then(Self::from_hhmm)
    }

    pub fn hhmm(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 100
    }

    pub fn minute(&self) -> u16 {
        self.0 % 100
    }

    /// 距午夜的分钟数
    pub fn minutes_since_midnight(&self) -> i32 {
        i32::from(self.hour()) * 60 + i32::from(self.minute())
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // from_hhmm 已保证范围合法
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl TryFrom<u16> for ClockTime {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_hhmm(value).ok_or_else(|| format!("无效时刻: {:04}", value))
    }
}

impl From<ClockTime> for u16 {
    fn from(time: ClockTime) -> Self {
        time.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive_time().format("%H%M"))
    }
}

// ==========================================
// TimeWindow - 活动窗口 [起飞, 落地]
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_min: i32,
    pub end_min: i32,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start_min: start.minutes_since_midnight(),
            end_min: end.minutes_since_midnight(),
        }
    }

    /// 带容差的重叠判定
    ///
    /// start(a) < end(b) - buffer 且 start(b) < end(a) - buffer
    pub fn overlaps(&self, other: &TimeWindow, buffer_minutes: i32) -> bool {
        self.start_min < other.end_min - buffer_minutes
            && other.start_min < self.end_min - buffer_minutes
    }

    /// 某一时刻是否处于有效占用区间 [起飞, 落地 - 容差)
    ///
    /// 两窗口重叠 <=> 两有效占用区间相交
    pub fn active_at(&self, minute: i32, buffer_minutes: i32) -> bool {
        self.start_min <= minute && minute < self.end_min - buffer_minutes
    }
}

// ==========================================
// ScheduleLine - 排班行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleLine {
    pub line_number: u32,        // 行号
    pub callsign: String,        // 呼号 (如 BT21)
    pub brief_time: ClockTime,   // 简令时刻
    pub takeoff_time: ClockTime, // 计划起飞
    pub land_time: ClockTime,    // 计划落地
    pub event_type: String,      // 科目类别 (如 BFM)
    pub full_event_code: String, // 完整科目代码 (如 BFM4601)
    pub flight_hours: f64,       // 飞行时长
    pub remarks: String,         // 备注
    pub raw_text: String,        // 原始匹配文本
}

impl ScheduleLine {
    /// 追加备注标记 ("; " 分隔)
    pub fn append_remark(&mut self, marker: &str) {
        if self.remarks.is_empty() {
            self.remarks = marker.to_string();
        } else {
            self.remarks = format!("{}; {}", self.remarks, marker);
        }
    }

    pub fn has_remark(&self, marker: &str) -> bool {
        self.remarks.split("; ").any(|r| r == marker)
    }

    pub fn is_swap(&self) -> bool {
        self.has_remark(SWAP_MARKER)
    }

    /// 原始文本中是否带长机标记
    pub fn is_lead(&self, lead_markers: &[String]) -> bool {
        lead_markers
            .iter()
            .any(|marker| self.raw_text.contains(marker.as_str()))
    }

    /// 编队号 (前缀后第 1 位)
    pub fn family_digit(&self, prefix_len: usize) -> Option<char> {
        self.callsign.chars().nth(prefix_len)
    }

    /// 僚机位号 (前缀后第 2 位)
    pub fn position_digit(&self, prefix_len: usize) -> Option<char> {
        self.callsign.chars().nth(prefix_len + 1)
    }
}

// ==========================================
// Flight - 航班 (单机/双机/四机编队)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,               // 稳定标识: 编队呼号-起飞时刻 (如 BT2-0730)
    pub callsign: String,         // 编队呼号 (如 BT2)
    pub lines: Vec<ScheduleLine>, // 组成行
    pub event_type: String,       // 代表科目类别
    pub full_event_code: String,  // 代表完整科目代码
    pub brief_time: ClockTime,    // 最早简令
    pub takeoff_time: ClockTime,  // 最早起飞
    pub land_time: ClockTime,     // 最晚落地
    pub flight_type: FlightType,  // 编队类型
    pub is_student_swap: bool,    // 是否含学员互换
}

impl Flight {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.takeoff_time, self.land_time)
    }

    pub fn overlaps(&self, other: &Flight, buffer_minutes: i32) -> bool {
        self.window().overlaps(&other.window(), buffer_minutes)
    }

    pub fn line_numbers(&self) -> Vec<u32> {
        self.lines.iter().map(|l| l.line_number).collect()
    }

    /// 去重排序后的两位机位号 (BT11, BT12 -> ["11", "12"])
    pub fn position_labels(&self, prefix_len: usize) -> Vec<String> {
        let mut positions: Vec<String> = self
            .lines
            .iter()
            .map(|l| l.callsign.chars().skip(prefix_len).collect::<String>())
            .filter(|p| !p.is_empty())
            .collect();
        positions.sort();
        positions.dedup();
        positions
    }
}
