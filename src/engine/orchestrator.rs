// ==========================================
// 飞行排班消冲系统 - 消冲引擎编排器
// ==========================================
// 用途: 按起飞时刻顺序贪心分配三类资源
// 顺序: 空域 -> TACAN -> 频率 (频率依赖 TACAN 输出)
// 红线: 分配失败只记录冲突, 不中断运行
// ==========================================

use crate::config::ResourceConfig;
use crate::domain::assignment::{DeconflictResult, DeconflictionOutcome};
use crate::domain::schedule::Flight;
use crate::engine::airspace::AirspaceAllocator;
use crate::engine::context::AllocationContext;
use crate::engine::frequency::FrequencyAllocator;
use crate::engine::tacan::TacanAllocator;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// DeconflictionEngine - 消冲引擎
// ==========================================
pub struct DeconflictionEngine {
    config: Arc<ResourceConfig>,
    airspace: AirspaceAllocator,
    tacan: TacanAllocator,
    frequency: FrequencyAllocator,
}

impl DeconflictionEngine {
    /// 创建新的引擎实例
    ///
    /// # 参数
    /// - config: 资源配置 (单次运行内只读)
    pub fn new(config: Arc<ResourceConfig>) -> Self {
        Self {
            airspace: AirspaceAllocator::new(config.clone()),
            tacan: TacanAllocator::new(config.clone()),
            frequency: FrequencyAllocator::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// 执行消冲
    ///
    /// 按起飞时刻稳定排序后逐个分配; 每个分配器只读取已提交的结果
    ///
    /// # 返回
    /// 每个航班一条结果 (排序后顺序) + 全部冲突
    #[instrument(skip_all, fields(flights = flights.len()))]
    pub fn run(&self, flights: &[Flight]) -> DeconflictionOutcome {
        // 稳定排序: 同一起飞时刻保持输入顺序 (分组器按行号排好)
        let mut sorted = flights.to_vec();
        sorted.sort_by_key(|f| f.takeoff_time);

        let buffer = self.config.overlap_buffer_minutes;
        let mut results: Vec<DeconflictResult> = Vec::with_capacity(sorted.len());

        for index in 0..sorted.len() {
            let result = {
                let rule = sorted
                    .get(index)
                    .and_then(|f| self.config.rule(&f.event_type));
                let Some(ctx) = AllocationContext::build(index, &sorted, &results, rule, buffer)
                else {
                    continue;
                };

                if rule.is_none() {
                    debug!(flight_id = %ctx.flight.id, event_type = %ctx.event_type(), "无科目规则, 不分配资源");
                }

                let airspace = self.airspace.allocate(&ctx);
                let tacan = self.tacan.allocate(&ctx);
                let frequencies = self.frequency.allocate(&ctx, &tacan.assignment);

                let conflicts: Vec<_> = [airspace.conflict, tacan.conflict, frequencies.conflict]
                    .into_iter()
                    .flatten()
                    .collect();
                for conflict in &conflicts {
                    warn!(
                        flight_id = %ctx.flight.id,
                        kind = %conflict.kind,
                        "{}",
                        conflict.message
                    );
                }

                DeconflictResult {
                    flight: ctx.flight.clone(),
                    airspace: airspace.assignment,
                    tacan: tacan.assignment,
                    frequencies: frequencies.assignment,
                    conflicts,
                }
            };
            results.push(result);
        }

        let conflicts: Vec<_> = results
            .iter()
            .flat_map(|r| r.conflicts.iter().cloned())
            .collect();

        info!(
            flights = results.len(),
            clean = results.iter().filter(|r| r.is_clean()).count(),
            conflicts = conflicts.len(),
            "消冲完成"
        );

        DeconflictionOutcome { results, conflicts }
    }
}
