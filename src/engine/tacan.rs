// ==========================================
// 飞行排班消冲系统 - TACAN 频道对分配引擎
// ==========================================
// 规则:
// 1) 仅非单机且规则需要 TACAN 的航班
// 2) 占用 = 时间重叠的已提交航班使用的基频道
// 3) 单对: 专用预设优先, 其后临时基频道 1..=偏移 (跳过保留/占用)
// 4) 连续两对 (DTF): 相邻且基频道差 1 的专用预设, 其后临时 (b, b+1)
// ==========================================

use crate::config::{ResourceConfig, TacanPreset};
use crate::domain::assignment::TacanAssignment;
use crate::domain::types::ConflictKind;
use crate::engine::context::{Allocation, AllocationContext};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct TacanAllocator {
    config: Arc<ResourceConfig>,
}

impl TacanAllocator {
    pub fn new(config: Arc<ResourceConfig>) -> Self {
        Self { config }
    }

    pub fn allocate(&self, ctx: &AllocationContext<'_>) -> Allocation<Vec<TacanAssignment>> {
        let Some(rule) = ctx.rule.filter(|_| ctx.needs_comms()) else {
            return Allocation::ok(Vec::new());
        };

        let used = self.used_bases(ctx);

        if rule.needs_sequential_pairs() {
            return match self.find_sequential_pairs(&used) {
                Some(pairs) => {
                    debug!(flight_id = %ctx.flight.id, bases = ?bases(&pairs), "连续 TACAN 频道对已分配");
                    Allocation::ok(pairs)
                }
                None => {
                    let message = format!(
                        "No sequential TACAN pair available for {} ({}). All sequential pairs are in use.",
                        ctx.flight.id,
                        ctx.event_type()
                    );
                    Allocation::failed(
                        Vec::new(),
                        ctx.conflict(ConflictKind::DtfSequentialUnavailable, message),
                    )
                }
            };
        }

        match self.find_pair(&used) {
            Some(pair) => {
                debug!(flight_id = %ctx.flight.id, base = pair.base, paired = pair.paired, "TACAN 频道对已分配");
                Allocation::ok(vec![pair])
            }
            None => {
                let message = format!(
                    "No TACAN pair available for {} ({}). All pairs in use.",
                    ctx.flight.id,
                    ctx.event_type()
                );
                Allocation::failed(Vec::new(), ctx.conflict(ConflictKind::TacanExhausted, message))
            }
        }
    }

    pub fn used_bases(&self, ctx: &AllocationContext<'_>) -> HashSet<u32> {
        ctx.committed
            .iter()
            .flat_map(|r| r.tacan.iter().map(|t| t.base))
            .collect()
    }

    /// 单对: 专用优先, 其后临时
    pub fn find_pair(&self, used: &HashSet<u32>) -> Option<TacanAssignment> {
        if let Some(preset) = self
            .config
            .dedicated_tacan
            .iter()
            .find(|p| !used.contains(&p.base))
        {
            return Some(dedicated(preset));
        }

        (1..=self.config.tacan_pair_offset)
            .find(|&base| self.overflow_base_free(base, used))
            .map(|base| self.overflow(base))
    }

    /// 连续两对
    pub fn find_sequential_pairs(&self, used: &HashSet<u32>) -> Option<Vec<TacanAssignment>> {
        let presets = &self.config.dedicated_tacan;
        for window in presets.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            if a.base.checked_add(1) == Some(b.base) && !used.contains(&a.base) && !used.contains(&b.base) {
                return Some(vec![dedicated(a), dedicated(b)]);
            }
        }

        (1..self.config.tacan_pair_offset)
            .find(|&base| {
                self.overflow_base_free(base, used) && self.overflow_base_free(base + 1, used)
            })
            .map(|base| vec![self.overflow(base), self.overflow(base + 1)])
    }

    fn overflow_base_free(&self, base: u32, used: &HashSet<u32>) -> bool {
        !self.config.is_reserved(base)
            && !used.contains(&base)
            && base + self.config.tacan_pair_offset <= self.config.tacan_max_channel
    }

    fn overflow(&self, base: u32) -> TacanAssignment {
        TacanAssignment {
            base,
            paired: base + self.config.tacan_pair_offset,
            preset_name: None,
            preset_freq: None,
            is_overflow: true,
        }
    }
}

fn dedicated(preset: &TacanPreset) -> TacanAssignment {
    TacanAssignment {
        base: preset.base,
        paired: preset.paired,
        preset_name: preset.preset_name.clone(),
        preset_freq: preset.preset_freq,
        is_overflow: false,
    }
}

fn bases(pairs: &[TacanAssignment]) -> Vec<u32> {
    pairs.iter().map(|p| p.base).collect()
}
