// ==========================================
// 飞行排班消冲系统 - 运行汇总
// ==========================================
// 职责: 统计行数 / 航班数 / 无冲突航班数 / 冲突数
//       冲突类型分布 / 各空域池峰值占用
// ==========================================

use crate::config::ResourceConfig;
use crate::domain::assignment::DeconflictionOutcome;
use crate::domain::schedule::ClockTime;
use crate::domain::types::{AirspaceId, ConflictKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 空域池峰值占用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolUtilization {
    pub label: String,
    pub capacity: u32,
    pub peak_units: u32,
    /// 峰值首次出现的时刻
    pub peak_at: Option<ClockTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub lines_parsed: usize,
    pub flights: usize,
    pub assigned: usize,
    pub conflicts: usize,
    pub conflicts_by_kind: BTreeMap<ConflictKind, usize>,
    pub airspace_utilization: BTreeMap<AirspaceId, PoolUtilization>,
}

impl RunSummary {
    pub fn build(lines_parsed: usize, outcome: &DeconflictionOutcome, config: &ResourceConfig) -> Self {
        let mut conflicts_by_kind = BTreeMap::new();
        for conflict in &outcome.conflicts {
            *conflicts_by_kind.entry(conflict.kind).or_insert(0) += 1;
        }

        let airspace_utilization = config
            .airspace_pools
            .iter()
            .map(|(&id, pool)| {
                let (peak_units, peak_at) = peak_usage(outcome, id, config.overlap_buffer_minutes);
                (
                    id,
                    PoolUtilization {
                        label: pool.label.clone(),
                        capacity: pool.block_units,
                        peak_units,
                        peak_at,
                    },
                )
            })
            .collect();

        Self {
            lines_parsed,
            flights: outcome.results.len(),
            assigned: outcome.results.iter().filter(|r| r.is_clean()).count(),
            conflicts: outcome.conflicts.len(),
            conflicts_by_kind,
            airspace_utilization,
        }
    }
}

/// 空域池峰值占用: 在每个起飞时刻采样有效占用区间内的块单位之和
fn peak_usage(outcome: &DeconflictionOutcome, airspace: AirspaceId, buffer: i32) -> (u32, Option<ClockTime>) {
    let mut occupants: Vec<_> = outcome
        .results
        .iter()
        .filter_map(|r| {
            r.airspace
                .as_ref()
                .filter(|a| a.airspace == airspace)
                .map(|a| (r.flight.window(), r.flight.takeoff_time, a.block_units))
        })
        .collect();
    occupants.sort_by_key(|(window, _, _)| window.start_min);

    let mut peak = (0, None);
    for &(window, takeoff, _) in &occupants {
        let units: u32 = occupants
            .iter()
            .filter(|(other, _, _)| other.active_at(window.start_min, buffer))
            .map(|(_, _, units)| units)
            .sum();
        if units > peak.0 {
            peak = (units, Some(takeoff));
        }
    }
    peak
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Lines parsed: {} | Flights: {} | Assigned: {} | Conflicts: {}",
            self.lines_parsed, self.flights, self.assigned, self.conflicts
        )?;
        for (kind, count) in &self.conflicts_by_kind {
            writeln!(f, "  {}: {}", kind, count)?;
        }
        for pool in self.airspace_utilization.values() {
            match pool.peak_at {
                Some(at) => writeln!(
                    f,
                    "  {} peak: {}/{} at {}",
                    pool.label, pool.peak_units, pool.capacity, at
                )?,
                None => writeln!(f, "  {} peak: 0/{}", pool.label, pool.capacity)?,
            }
        }
        Ok(())
    }
}
