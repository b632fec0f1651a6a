// ==========================================
// FlightGrouper 集成测试
// ==========================================
// 测试目标: 验证排班行到航班的分组
// 覆盖范围: 单机/双机/四机、学员互换、长机科目、排序
// ==========================================

mod test_helpers;

use sortie_deconflict::config::ResourceConfig;
use sortie_deconflict::domain::FlightType;
use sortie_deconflict::importer::{FlightGrouper, LineExtractor};
use sortie_deconflict::Flight;
use test_helpers::{row, sample_schedule_pages};

fn group_text(pages: &[String]) -> Vec<Flight> {
    let config = ResourceConfig::default();
    let lines = LineExtractor::new(&config).unwrap().parse_pages(pages);
    FlightGrouper::new(&config).group(lines)
}

// ==========================================
// 测试用例 1: 典型排班文本
// ==========================================

#[test]
fn test_group_sample_schedule() {
    println!("\n=== 测试：典型排班分组 ===");

    let flights = group_text(&sample_schedule_pages());

    for f in &flights {
        println!(
            "  - {} {} {} lines={:?} {}",
            f.id,
            f.flight_type,
            f.full_event_code,
            f.line_numbers(),
            f.window().start_min
        );
    }

    let ids: Vec<&str> = flights.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["BT1-0730", "BT2-0745", "BT3-0800", "BT8-0830", "BT5-0830", "BT6-0930"]
    );

    let types: Vec<FlightType> = flights.iter().map(|f| f.flight_type).collect();
    assert_eq!(
        types,
        vec![
            FlightType::Section,
            FlightType::Section,
            FlightType::Section,
            FlightType::Division,
            FlightType::Section,
            FlightType::Single,
        ]
    );

    // 输出按起飞时刻非降序
    assert!(flights
        .windows(2)
        .all(|w| w[0].takeoff_time <= w[1].takeoff_time));

    println!("=== 测试通过 ===\n");
}

// ==========================================
// 测试用例 2: 学员互换
// ==========================================

#[test]
fn test_three_row_student_swap() {
    println!("\n=== 测试：学员互换 ===");

    let text = [
        row(301, "BT41", "0700", "0830", "1000", "SMITH JONES FRM4101", "1.5", ""),
        row(302, "BT41", "0700", "0830", "1000", "SMITH BAKER FRM4101", "1.5", "RTB"),
        row(303, "BT41", "0700", "0830", "1000", "SMITH COLE FRM4101", "1.5", ""),
    ]
    .join("\n");

    let flights = group_text(&[text]);
    assert_eq!(flights.len(), 1);

    let flight = &flights[0];
    println!("  - {} {} swap={}", flight.id, flight.flight_type, flight.is_student_swap);

    // 只有一个僚机位 -> 单机
    assert_eq!(flight.flight_type, FlightType::Single);
    assert!(flight.is_student_swap);
    assert_eq!(flight.lines.len(), 3);
    assert!(flight.lines.iter().all(|l| l.is_swap()));
    assert_eq!(flight.lines[1].remarks, "RTB; SWAP");

    println!("=== 测试通过 ===\n");
}

#[test]
fn test_swap_inside_section() {
    let text = [
        row(311, "BT51", "0700", "0830", "1000", "SMITH JONES BFM4601", "1.5", ""),
        row(312, "BT51", "0700", "0830", "1000", "SMITH BAKER BFM4601", "1.5", ""),
        row(313, "BT52", "0700", "0830", "1000", "COLE WEST BFM4601", "1.5", ""),
    ]
    .join("\n");

    let flights = group_text(&[text]);
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0].flight_type, FlightType::Section);
    assert!(flights[0].is_student_swap);
    assert!(!flights[0].lines[2].is_swap());
}

#[test]
fn test_same_callsign_different_land_not_swap() {
    let text = [
        row(321, "BT61", "0700", "0830", "1000", "SMITH FRM4101", "1.5", ""),
        row(322, "BT61", "0700", "0830", "1030", "SMITH FRM4101", "1.5", ""),
    ]
    .join("\n");

    let flights = group_text(&[text]);
    assert_eq!(flights.len(), 1);
    assert!(!flights[0].is_student_swap);
    // 窗口取最晚落地
    assert_eq!(flights[0].land_time.hhmm(), 1030);
}

// ==========================================
// 测试用例 3: 长机科目
// ==========================================

#[test]
fn test_lead_line_sets_event() {
    let text = [
        row(331, "BT71", "0700", "0830", "1000", "SMITH OCF4101", "1.3", ""),
        row(332, "BT72", "0700", "0830", "1000", "JONES FRM4201 LEAD", "1.3", ""),
    ]
    .join("\n");

    let flights = group_text(&[text]);
    assert_eq!(flights[0].event_type, "FRM");
    assert_eq!(flights[0].full_event_code, "FRM4201");
}

#[test]
fn test_first_line_event_without_lead() {
    let text = [
        row(341, "BT72", "0700", "0830", "1000", "JONES FRM4201", "1.3", ""),
        row(340, "BT71", "0700", "0830", "1000", "SMITH OCF4101", "1.3", ""),
    ]
    .join("\n");

    // 同一起飞时刻按行号排序, 340 在前
    let flights = group_text(&[text]);
    assert_eq!(flights[0].event_type, "OCF");
    assert_eq!(flights[0].line_numbers(), vec![340, 341]);
}

// ==========================================
// 测试用例 4: 窗口聚合
// ==========================================

#[test]
fn test_window_aggregation() {
    let text = [
        row(351, "BT81", "0640", "0830", "1000", "SMITH DIV4301", "1.3", ""),
        row(352, "BT82", "0700", "0830", "1015", "JONES DIV4301", "1.3", ""),
        row(353, "BT83", "0700", "0830", "0945", "BAKER DIV4301", "1.3", ""),
        row(354, "BT84", "0700", "0830", "1000", "COLE DIV4301", "1.3", ""),
    ]
    .join("\n");

    let flights = group_text(&[text]);
    let flight = &flights[0];
    assert_eq!(flight.flight_type, FlightType::Division);
    assert_eq!(flight.brief_time.hhmm(), 640);
    assert_eq!(flight.land_time.hhmm(), 1015);
    assert_eq!(flight.position_labels(2), vec!["81", "82", "83", "84"]);
}
