// ==========================================
// 飞行排班消冲系统 - 资源分配结果模型
// ==========================================
// 职责: 空域 / TACAN / 频率分配 + 冲突 + 单机结果
// ==========================================

use crate::domain::schedule::Flight;
use crate::domain::types::{AirspaceId, ConflictKind, Frequency};
use serde::{Deserialize, Serialize};

// ==========================================
// AirspaceAssignment - 空域分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirspaceAssignment {
    pub airspace: AirspaceId,   // 空域池
    pub block_units: u32,       // 占用块单位
    pub physical_block: String, // 展示用物理块标签
    pub flexed_down: bool,      // 是否降级占用
}

// ==========================================
// TacanAssignment - TACAN 频道对
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacanAssignment {
    pub base: u32,
    pub paired: u32,
    pub preset_name: Option<String>,
    pub preset_freq: Option<Frequency>,
    pub is_overflow: bool, // 临时分配 (非专用预设)
}

// ==========================================
// FrequencyAssignment - 频率分配
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyAssignment {
    pub preset: Option<Frequency>,
    pub preset_name: Option<String>,
    pub cms: Vec<Frequency>, // 辅助频率 (ChatterMark)
}

// ==========================================
// Conflict - 冲突
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub involved_flight_ids: Vec<String>,
}

impl Conflict {
    /// 构造冲突: 当前航班在前, 其后为所有时间重叠航班
    pub fn new(kind: ConflictKind, message: String, flight: &Flight, overlapping: &[&Flight]) -> Self {
        let mut involved_flight_ids = Vec::with_capacity(overlapping.len() + 1);
        involved_flight_ids.push(flight.id.clone());
        involved_flight_ids.extend(overlapping.iter().map(|f| f.id.clone()));
        Self {
            kind,
            message,
            involved_flight_ids,
        }
    }
}

// ==========================================
// DeconflictResult - 单航班消冲结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeconflictResult {
    pub flight: Flight,
    pub airspace: Option<AirspaceAssignment>,
    pub tacan: Vec<TacanAssignment>,
    pub frequencies: FrequencyAssignment,
    pub conflicts: Vec<Conflict>,
}

impl DeconflictResult {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

// ==========================================
// DeconflictionOutcome - 全量消冲结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeconflictionOutcome {
    pub results: Vec<DeconflictResult>,
    pub conflicts: Vec<Conflict>,
}

impl DeconflictionOutcome {
    pub fn result_for(&self, flight_id: &str) -> Option<&DeconflictResult> {
        self.results.iter().find(|r| r.flight.id == flight_id)
    }
}
