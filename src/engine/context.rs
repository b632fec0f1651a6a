// ==========================================
// 飞行排班消冲系统 - 分配上下文
// ==========================================
// 职责: 为单个航班收集时间重叠信息
// - overlapping: 本次运行中全部时间重叠航班 (冲突归属 / 争用判定)
// - committed:   已提交且时间重叠的结果 (资源占用)
// ==========================================

use crate::config::EventTypeRule;
use crate::domain::assignment::{Conflict, DeconflictResult};
use crate::domain::schedule::Flight;
use crate::domain::types::ConflictKind;

#[derive(Debug, Clone)]
pub struct AllocationContext<'a> {
    pub flight: &'a Flight,
    pub rule: Option<&'a EventTypeRule>,
    pub overlapping: Vec<&'a Flight>,
    pub committed: Vec<&'a DeconflictResult>,
}

impl<'a> AllocationContext<'a> {
    /// 构建上下文
    ///
    /// # 参数
    /// - index: 当前航班在 all_flights 中的位置 (自身按位置排除)
    /// - all_flights: 本次运行的全部航班
    /// - committed: 已提交结果
    pub fn build(
        index: usize,
        all_flights: &'a [Flight],
        committed: &'a [DeconflictResult],
        rule: Option<&'a EventTypeRule>,
        buffer_minutes: i32,
    ) -> Option<Self> {
        let flight = all_flights.get(index)?;

        let overlapping = all_flights
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != index && flight.overlaps(other, buffer_minutes))
            .map(|(_, other)| other)
            .collect();

        let committed = committed
            .iter()
            .filter(|r| flight.overlaps(&r.flight, buffer_minutes))
            .collect();

        Some(Self {
            flight,
            rule,
            overlapping,
            committed,
        })
    }

    /// 任一时间重叠航班的科目属于给定集合
    pub fn any_overlapping_event(&self, event_types: &[String]) -> bool {
        self.overlapping
            .iter()
            .any(|f| event_types.iter().any(|e| *e == f.event_type))
    }

    /// 冲突: 当前航班 + 全部时间重叠航班
    pub fn conflict(&self, kind: ConflictKind, message: String) -> Conflict {
        Conflict::new(kind, message, self.flight, &self.overlapping)
    }

    pub fn event_type(&self) -> &str {
        &self.flight.event_type
    }

    /// TACAN / 频率分配门控: 规则需要 TACAN 且非单机
    pub fn needs_comms(&self) -> bool {
        self.rule.is_some_and(|r| r.needs_tacan) && !self.flight.flight_type.is_single()
    }
}

/// 单个分配器的输出
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<T> {
    pub assignment: T,
    pub conflict: Option<Conflict>,
}

impl<T> Allocation<T> {
    pub fn ok(assignment: T) -> Self {
        Self {
            assignment,
            conflict: None,
        }
    }

    pub fn failed(assignment: T, conflict: Conflict) -> Self {
        Self {
            assignment,
            conflict: Some(conflict),
        }
    }
}
