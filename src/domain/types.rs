// ==========================================
// 飞行排班消冲系统 - 领域类型定义
// ==========================================
// 职责: 空域池标识 / 编队类型 / 冲突类型 / 频率
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 空域池标识 (Airspace Pool)
// ==========================================
// 顺序: Area4 < Moa2 (影响利用率报告的输出顺序)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirspaceId {
    Area4, // 4 号训练区
    Moa2,  // MOA 2
}

impl AirspaceId {
    /// 全部空域池（固定顺序）
    pub const ALL: [AirspaceId; 2] = [AirspaceId::Area4, AirspaceId::Moa2];

    pub fn as_str(&self) -> &'static str {
        match self {
            AirspaceId::Area4 => "area4",
            AirspaceId::Moa2 => "moa2",
        }
    }
}

impl fmt::Display for AirspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 编队类型 (Flight Type)
// ==========================================
// 由不同僚机位编号的数量决定, 而非行数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightType {
    Single,   // 单机
    Section,  // 双机
    Division, // 四机
}

impl FlightType {
    /// 根据不同僚机位数量判定编队类型
    pub fn from_position_count(distinct_positions: usize) -> Self {
        if distinct_positions >= 4 {
            FlightType::Division
        } else if distinct_positions >= 2 {
            FlightType::Section
        } else {
            FlightType::Single
        }
    }

    pub fn is_single(&self) -> bool {
        *self == FlightType::Single
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightType::Single => write!(f, "single"),
            FlightType::Section => write!(f, "section"),
            FlightType::Division => write!(f, "division"),
        }
    }
}

// ==========================================
// 冲突类型 (Conflict Kind)
// ==========================================
// 序列化格式: snake_case (下游展示层直接使用)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    AirspaceFull,             // 空域已满
    TacanExhausted,           // TACAN 频道耗尽
    DtfSequentialUnavailable, // 无连续 TACAN 频道对
    CmExhausted,              // 辅助频率池耗尽
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::AirspaceFull => "airspace_full",
            ConflictKind::TacanExhausted => "tacan_exhausted",
            ConflictKind::DtfSequentialUnavailable => "dtf_sequential_unavailable",
            ConflictKind::CmExhausted => "cm_exhausted",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 频率 (Frequency)
// ==========================================
// 以 kHz 整数存储, 保证可哈希/精确比较
// 序列化格式: MHz 浮点数 (如 265.9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Frequency(u32);

impl Frequency {
    /// 从 kHz 构造
    pub const fn from_khz(khz: u32) -> Self {
        Frequency(khz)
    }

    pub fn khz(&self) -> u32 {
        self.0
    }

    pub fn mhz(&self) -> f64 {
        f64::from(self.0) / 1000.0
    }
}

impl TryFrom<f64> for Frequency {
    type Error = String;

    fn try_from(mhz: f64) -> Result<Self, Self::Error> {
        if !mhz.is_finite() || mhz <= 0.0 || mhz > 4_000_000.0 {
            return Err(format!("无效频率: {} MHz", mhz));
        }
        Ok(Frequency((mhz * 1000.0).round() as u32))
    }
}

impl From<Frequency> for f64 {
    fn from(freq: Frequency) -> Self {
        freq.mhz()
    }
}

impl fmt::Display for Frequency {
    // 265900 -> "265.9", 261350 -> "261.35", 357000 -> "357.0"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let frac = format!("{:03}", self.0 % 1000);
        let trimmed = frac.trim_end_matches('0');
        if trimmed.is_empty() {
            write!(f, "{}.0", whole)
        } else {
            write!(f, "{}.{}", whole, trimmed)
        }
    }
}
