// ==========================================
// 飞行排班消冲系统 - 频率分配引擎
// ==========================================
// 规则:
// 1) 门控与 TACAN 相同
// 2) 预设频率继承自第一个 TACAN 频道对
// 3) 每个临时频道对额外需要 1 个辅助频率; 全部为临时时清空预设
// 4) 按池声明顺序分配未被重叠航班占用的辅助频率
// 5) 不足时保留已分配部分并报 cm_exhausted
// ==========================================

use crate::config::ResourceConfig;
use crate::domain::assignment::{FrequencyAssignment, TacanAssignment};
use crate::domain::types::{ConflictKind, Frequency};
use crate::engine::context::{Allocation, AllocationContext};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct FrequencyAllocator {
    config: Arc<ResourceConfig>,
}

impl FrequencyAllocator {
    pub fn new(config: Arc<ResourceConfig>) -> Self {
        Self { config }
    }

    pub fn allocate(
        &self,
        ctx: &AllocationContext<'_>,
        tacan: &[TacanAssignment],
    ) -> Allocation<FrequencyAssignment> {
        let Some(rule) = ctx.rule.filter(|_| ctx.needs_comms()) else {
            return Allocation::ok(FrequencyAssignment::default());
        };

        let (mut preset, mut preset_name) = match tacan.first() {
            Some(first) if first.preset_freq.is_some() => (first.preset_freq, first.preset_name.clone()),
            _ => (None, None),
        };

        let overflow_pairs = tacan.iter().filter(|t| t.is_overflow).count() as u32;
        let needed = rule.needs_cm + overflow_pairs;
        if overflow_pairs > 0 && tacan.iter().all(|t| t.is_overflow) {
            preset = None;
            preset_name = None;
        }

        let used: HashSet<Frequency> = ctx
            .committed
            .iter()
            .flat_map(|r| r.frequencies.cms.iter().copied())
            .collect();

        let cms: Vec<Frequency> = self
            .config
            .cm_pool
            .iter()
            .copied()
            .filter(|cm| !used.contains(cm))
            .take(needed as usize)
            .collect();

        let granted = cms.len();
        let assignment = FrequencyAssignment {
            preset,
            preset_name,
            cms,
        };

        if granted < needed as usize {
            let message = format!(
                "ChatterMark pool exhausted for {} ({}). Needed {} CM(s), only {} available.",
                ctx.flight.id,
                ctx.event_type(),
                needed,
                granted
            );
            return Allocation::failed(assignment, ctx.conflict(ConflictKind::CmExhausted, message));
        }

        debug!(
            flight_id = %ctx.flight.id,
            preset = ?assignment.preset.map(|p| p.to_string()),
            cms = granted,
            "频率已分配"
        );
        Allocation::ok(assignment)
    }
}
