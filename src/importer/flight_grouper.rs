// ==========================================
// 飞行排班消冲系统 - 编队分组器
// ==========================================
// 步骤:
// 1. 按起飞时刻排序 (同时刻按行号)
// 2. 学员互换标记: 连续且呼号/起飞/落地均相同的行
// 3. 按 前缀+编队号+起飞时刻 分组
// 4. 按不同僚机位数量判定编队类型
// 5. 窗口 = 最早简令/最早起飞/最晚落地, 科目取长机行
// ==========================================

use crate::config::ResourceConfig;
use crate::domain::schedule::{Flight, ScheduleLine, SWAP_MARKER};
use crate::domain::types::FlightType;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FlightGrouper {
    squadron_prefix: String,
    lead_markers: Vec<String>,
}

impl FlightGrouper {
    pub fn new(config: &ResourceConfig) -> Self {
        Self {
            squadron_prefix: config.squadron_prefix.clone(),
            lead_markers: config.lead_markers.clone(),
        }
    }

    fn prefix_len(&self) -> usize {
        self.squadron_prefix.chars().count()
    }

    /// 排班行 -> 航班 (按起飞时刻升序)
    pub fn group(&self, mut lines: Vec<ScheduleLine>) -> Vec<Flight> {
        lines.sort_by(|a, b| {
            a.takeoff_time
                .cmp(&b.takeoff_time)
                .then(a.line_number.cmp(&b.line_number))
        });

        mark_student_swaps(&mut lines);

        // 保持首次出现顺序
        let mut groups: Vec<(String, Vec<ScheduleLine>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for line in lines {
            let family = self.family_callsign(&line);
            let key = format!("{}-{}", family, line.takeoff_time);
            match index.get(&key) {
                Some(&i) => groups[i].1.push(line),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![line]));
                }
            }
        }

        let mut flights: Vec<Flight> = groups
            .into_iter()
            .filter_map(|(id, group)| self.build_flight(id, group))
            .collect();
        flights.sort_by_key(|f| f.takeoff_time);

        debug!(flights = flights.len(), "编队分组完成");
        flights
    }

    fn family_callsign(&self, line: &ScheduleLine) -> String {
        match line.family_digit(self.prefix_len()) {
            Some(digit) => format!("{}{}", self.squadron_prefix, digit),
            None => line.callsign.clone(),
        }
    }

    fn build_flight(&self, id: String, lines: Vec<ScheduleLine>) -> Option<Flight> {
        let first = lines.first()?;
        let prefix_len = self.prefix_len();

        let positions: BTreeSet<char> = lines
            .iter()
            .filter_map(|l| l.position_digit(prefix_len))
            .collect();
        let flight_type = FlightType::from_position_count(positions.len());

        let representative = lines
            .iter()
            .find(|l| l.is_lead(&self.lead_markers))
            .unwrap_or(first);

        let brief_time = lines.iter().map(|l| l.brief_time).min()?;
        let takeoff_time = lines.iter().map(|l| l.takeoff_time).min()?;
        let land_time = lines.iter().map(|l| l.land_time).max()?;

        Some(Flight {
            callsign: self.family_callsign(first),
            event_type: representative.event_type.clone(),
            full_event_code: representative.full_event_code.clone(),
            brief_time,
            takeoff_time,
            land_time,
            flight_type,
            is_student_swap: lines.iter().any(ScheduleLine::is_swap),
            id,
            lines,
        })
    }
}

/// 标记学员互换: 连续的相同 (呼号, 起飞, 落地) 段长度 > 1 时, 段内每行追加 SWAP
fn mark_student_swaps(lines: &mut [ScheduleLine]) {
    let mut start = 0;
    while start < lines.len() {
        let mut end = start + 1;
        while end < lines.len()
            && lines[end].callsign == lines[start].callsign
            && lines[end].takeoff_time == lines[start].takeoff_time
            && lines[end].land_time == lines[start].land_time
        {
            end += 1;
        }
        if end - start > 1 {
            for line in &mut lines[start..end] {
                line.append_remark(SWAP_MARKER);
            }
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::ClockTime;

    fn line(num: u32, callsign: &str, to: u16, land: u16, raw: &str) -> ScheduleLine {
        ScheduleLine {
            line_number: num,
            callsign: callsign.to_string(),
            brief_time: ClockTime::from_hhmm(to - 100).unwrap(),
            takeoff_time: ClockTime::from_hhmm(to).unwrap(),
            land_time: ClockTime::from_hhmm(land).unwrap(),
            event_type: "FRM".to_string(),
            full_event_code: "FRM4101".to_string(),
            flight_hours: 1.3,
            remarks: String::new(),
            raw_text: raw.to_string(),
        }
    }

    #[test]
    fn test_section_grouping() {
        let grouper = FlightGrouper::new(&ResourceConfig::default());
        let flights = grouper.group(vec![
            line(102, "BT22", 730, 900, ""),
            line(101, "BT21", 730, 900, ""),
        ]);
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].id, "BT2-0730");
        assert_eq!(flights[0].callsign, "BT2");
        assert_eq!(flights[0].flight_type, FlightType::Section);
        assert_eq!(flights[0].line_numbers(), vec![101, 102]);
    }

    #[test]
    fn test_lead_line_sets_event() {
        let grouper = FlightGrouper::new(&ResourceConfig::default());
        let mut wing = line(101, "BT21", 730, 900, "");
        wing.event_type = "DIV".to_string();
        let mut lead = line(102, "BT22", 730, 900, "102 BT22 ... FRM LEAD 1.3");
        lead.full_event_code = "FRM LEAD".to_string();
        let flights = grouper.group(vec![wing, lead]);
        assert_eq!(flights[0].event_type, "FRM");
        assert_eq!(flights[0].full_event_code, "FRM LEAD");
    }

    #[test]
    fn test_swap_run_marked() {
        let mut lines = vec![
            line(101, "BT31", 800, 930, ""),
            line(102, "BT31", 800, 930, ""),
            line(103, "BT32", 800, 930, ""),
        ];
        lines[1].remarks = "RTB".to_string();
        mark_student_swaps(&mut lines);
        assert_eq!(lines[0].remarks, "SWAP");
        assert_eq!(lines[1].remarks, "RTB; SWAP");
        assert_eq!(lines[2].remarks, "");
    }

    #[test]
    fn test_different_takeoff_splits_family() {
        let grouper = FlightGrouper::new(&ResourceConfig::default());
        let flights = grouper.group(vec![
            line(101, "BT21", 730, 900, ""),
            line(102, "BT22", 1030, 1200, ""),
        ]);
        assert_eq!(flights.len(), 2);
        assert!(flights.iter().all(|f| f.flight_type == FlightType::Single));
        assert_eq!(flights[1].id, "BT2-1030");
    }
}
