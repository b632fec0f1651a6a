// ==========================================
// 飞行排班消冲系统 - 空域分配引擎
// ==========================================
// 规则:
// 1) 无规则 / 0 块单位 / 免空域科目 -> 不分配, 不冲突
// 2) 占用 = 时间重叠的已提交航班在各空域池的块单位之和
// 3) 偏好顺序 = 声明顺序 (或争用顺序) + 未声明空域池依次追加
// 4) 先以理想块单位遍历偏好, 再以最小块单位遍历 (降级)
// 5) 全部失败 -> airspace_full
// ==========================================

use crate::config::{EventTypeRule, ResourceConfig};
use crate::domain::assignment::AirspaceAssignment;
use crate::domain::types::{AirspaceId, ConflictKind};
use crate::engine::context::{Allocation, AllocationContext};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;

pub struct AirspaceAllocator {
    config: Arc<ResourceConfig>,
}

impl AirspaceAllocator {
    pub fn new(config: Arc<ResourceConfig>) -> Self {
        Self { config }
    }

    pub fn allocate(&self, ctx: &AllocationContext<'_>) -> Allocation<Option<AirspaceAssignment>> {
        let Some(rule) = ctx.rule else {
            return Allocation::ok(None);
        };
        if rule.block_units == 0 || self.config.is_no_airspace_event(&ctx.flight.full_event_code) {
            return Allocation::ok(None);
        }

        let used = self.usage(ctx);
        let available = |airspace: AirspaceId| -> i64 {
            let capacity = self.config.pool(airspace).map_or(0, |p| p.block_units);
            i64::from(capacity) - i64::from(used.get(&airspace).copied().unwrap_or(0))
        };

        let preference = self.effective_preference(rule, ctx);

        for units in rule.block_unit_options() {
            for &airspace in &preference {
                if available(airspace) >= i64::from(units) {
                    let assignment = AirspaceAssignment {
                        airspace,
                        block_units: units,
                        physical_block: self.pick_physical_block(airspace, ctx),
                        flexed_down: units < rule.block_units,
                    };
                    debug!(
                        flight_id = %ctx.flight.id,
                        airspace = %airspace,
                        block_units = units,
                        physical_block = %assignment.physical_block,
                        flexed_down = assignment.flexed_down,
                        "空域已分配"
                    );
                    return Allocation::ok(Some(assignment));
                }
            }
        }

        let best_available = preference.iter().map(|&a| available(a)).max().unwrap_or(0);
        let utilization = self
            .config
            .airspace_pools
            .iter()
            .map(|(id, pool)| {
                format!(
                    "{}: {}/{} used",
                    pool.label,
                    used.get(id).copied().unwrap_or(0),
                    pool.block_units
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let message = format!(
            "Airspace full for {} ({}): needs {}+ block units, only {} available in any single airspace. {}.",
            ctx.flight.id,
            ctx.event_type(),
            rule.minimum_block_units(),
            best_available,
            utilization
        );
        Allocation::failed(None, ctx.conflict(ConflictKind::AirspaceFull, message))
    }

    /// 各空域池已占用块单位
    pub fn usage(&self, ctx: &AllocationContext<'_>) -> BTreeMap<AirspaceId, u32> {
        let mut used = BTreeMap::new();
        for result in &ctx.committed {
            if let Some(assignment) = &result.airspace {
                *used.entry(assignment.airspace).or_insert(0) += assignment.block_units;
            }
        }
        used
    }

    /// 实际偏好顺序
    pub fn effective_preference(
        &self,
        rule: &EventTypeRule,
        ctx: &AllocationContext<'_>,
    ) -> Vec<AirspaceId> {
        let declared = match &rule.contested_preference {
            Some(contested) if ctx.any_overlapping_event(&contested.trigger_event_types) => {
                &contested.preferred_airspace
            }
            _ => &rule.preferred_airspace,
        };

        let mut order: Vec<AirspaceId> = Vec::new();
        let spill_over = self.config.airspace_pools.keys();
        for &airspace in declared.iter().chain(spill_over) {
            if self.config.pool(airspace).is_some() && !order.contains(&airspace) {
                order.push(airspace);
            }
        }
        order
    }

    /// 展示用物理块: 第一个未被重叠航班占用的标签, 否则溢出标签 / 第一个标签
    fn pick_physical_block(&self, airspace: AirspaceId, ctx: &AllocationContext<'_>) -> String {
        let Some(pool) = self.config.pool(airspace) else {
            return airspace.to_string();
        };

        let taken: HashSet<&str> = ctx
            .committed
            .iter()
            .filter_map(|r| r.airspace.as_ref())
            .filter(|a| a.airspace == airspace)
            .map(|a| a.physical_block.as_str())
            .collect();

        pool.physical_blocks
            .iter()
            .find(|block| !taken.contains(block.as_str()))
            .or(pool.overflow_block.as_ref())
            .or(pool.physical_blocks.first())
            .cloned()
            .unwrap_or_else(|| pool.label.clone())
    }
}
