// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造排班文本行 / 航班 / 配置
// ==========================================

#![allow(dead_code)]

use sortie_deconflict::config::ResourceConfig;
use sortie_deconflict::domain::{ClockTime, DeconflictionOutcome, Flight, FlightType};
use std::sync::Arc;

/// 构造一行排班文本
///
/// 例: row(101, "BT11", "0600", "0730", "0900", "SMITH JONES FRM4101", "1.3", "RTB")
#[allow(clippy::too_many_arguments)]
pub fn row(
    line: u32,
    callsign: &str,
    brief: &str,
    takeoff: &str,
    land: &str,
    middle: &str,
    hours: &str,
    remarks: &str,
) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        line, callsign, brief, takeoff, land, middle, hours, remarks
    )
    .trim_end()
    .to_string()
}

pub fn t(hhmm: u16) -> ClockTime {
    ClockTime::from_hhmm(hhmm).expect("valid clock time")
}

pub fn default_config() -> Arc<ResourceConfig> {
    Arc::new(ResourceConfig::default())
}

/// 构造航班 (无组成行, 引擎测试用)
pub fn flight(id: &str, event: &str, takeoff: u16, land: u16, flight_type: FlightType) -> Flight {
    Flight {
        id: id.to_string(),
        callsign: id.split('-').next().unwrap_or(id).to_string(),
        lines: Vec::new(),
        event_type: event.to_string(),
        full_event_code: format!("{}4101", event),
        brief_time: t(takeoff.saturating_sub(100)),
        takeoff_time: t(takeoff),
        land_time: t(land),
        flight_type,
        is_student_swap: false,
    }
}

pub fn section(id: &str, event: &str, takeoff: u16, land: u16) -> Flight {
    flight(id, event, takeoff, land, FlightType::Section)
}

/// 一天的典型排班文本 (两页)
///
/// 第 205 行科目无法识别, 应被跳过
pub fn sample_schedule_pages() -> Vec<String> {
    let page_one = vec![
        "VT-9 FRONT PAGE   FLIGHT SCHEDULE".to_string(),
        "LINE C/S BRIEF T/O LAND INSTRUCTOR STUDENT EVENT HRS REMARKS".to_string(),
        row(101, "BT11", "0600", "0730", "0900", "SMITH JONES FRM4101 LEAD", "1.3", "RTB"),
        row(102, "BT12", "0600", "0730", "0900", "BAKER COLE FRM4101", "1.3", ""),
        row(103, "BT21/22", "0615", "0745", "0915", "MILLER WEST BFM4601", "1.5", "MB"),
        row(104, "BT31", "0630", "0800", "0930", "KELLY PRICE TAC4201", "1.4", ""),
        row(105, "BT32", "0630", "0800", "0930", "HUNT PRICE TAC4201", "1.4", ""),
    ];

    let page_two = vec![
        row(201, "BT81/82/83/84", "0700", "0830", "1000", "GRAY FOX DIV4301", "1.5", "CRM-F"),
        row(202, "BT51", "0700", "0830", "0945", "SMITH BAKER DTF4501", "1.3", ""),
        row(203, "BT52", "0700", "0830", "0945", "COLE WEST DTF4501", "1.3", ""),
        row(204, "BT61", "0800", "0930", "1030", "KELLY HUNT TR4301", "1.0", ""),
        row(205, "BT71", "1200", "1330", "1500", "MILLER GRAY SIM1", "1.3", ""),
    ];

    vec![page_one.join("\n"), page_two.join("\n")]
}

/// 任意两个时间重叠 (含容差) 的航班, 其 TACAN 基频道与辅助频率不相交
pub fn assert_no_shared_channels(outcome: &DeconflictionOutcome, buffer: i32) {
    for (i, a) in outcome.results.iter().enumerate() {
        for b in outcome.results.iter().skip(i + 1) {
            if !a.flight.overlaps(&b.flight, buffer) {
                continue;
            }
            for ta in &a.tacan {
                for tb in &b.tacan {
                    assert_ne!(
                        ta.base, tb.base,
                        "{} 与 {} 共用 TACAN 基频道",
                        a.flight.id, b.flight.id
                    );
                }
            }
            for cm in &a.frequencies.cms {
                assert!(
                    !b.frequencies.cms.contains(cm),
                    "{} 与 {} 共用辅助频率 {}",
                    a.flight.id,
                    b.flight.id,
                    cm
                );
            }
        }
    }
}
