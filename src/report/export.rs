// ==========================================
// 飞行排班消冲系统 - 结果导出
// ==========================================
// CSV: 分配表 (每航班一行)
// JSON: 汇总 + 全部结果 + 全部冲突
// ==========================================

use crate::domain::assignment::{Conflict, DeconflictResult, DeconflictionOutcome};
use crate::report::error::ExportResult;
use crate::report::summary::RunSummary;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 空值占位
const EMPTY_CELL: &str = "-";

// ==========================================
// AssignmentRow - 分配表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    #[serde(rename = "LINE")]
    pub line: String,
    #[serde(rename = "CALLSIGN")]
    pub callsign: String,
    #[serde(rename = "EVENT")]
    pub event: String,
    #[serde(rename = "T/O")]
    pub takeoff: String,
    #[serde(rename = "LAND")]
    pub land: String,
    #[serde(rename = "AIRSPACE")]
    pub airspace: String,
    #[serde(rename = "TACAN")]
    pub tacan: String,
    #[serde(rename = "FREQ")]
    pub freq: String,
    #[serde(rename = "CM")]
    pub cm: String,
    #[serde(rename = "CONFLICTS")]
    pub conflicts: usize,
}

impl AssignmentRow {
    pub fn from_result(result: &DeconflictResult, squadron_prefix: &str) -> Self {
        let flight = &result.flight;
        let line = flight
            .line_numbers()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let positions = flight.position_labels(squadron_prefix.chars().count());
        let callsign = if positions.is_empty() {
            flight.callsign.clone()
        } else {
            format!("{} {}", squadron_prefix, positions.join("/"))
        };

        let airspace = result
            .airspace
            .as_ref()
            .map_or_else(|| EMPTY_CELL.to_string(), |a| a.physical_block.clone());

        let tacan = or_empty(
            result
                .tacan
                .iter()
                .map(|t| format!("{}/{}", t.base, t.paired))
                .collect::<Vec<_>>()
                .join(", "),
        );

        let freq = match (&result.frequencies.preset_name, result.frequencies.preset) {
            (Some(name), _) => name.clone(),
            (None, Some(preset)) => preset.to_string(),
            (None, None) => EMPTY_CELL.to_string(),
        };

        let cm = or_empty(
            result
                .frequencies
                .cms
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        );

        Self {
            line,
            callsign,
            event: flight.full_event_code.clone(),
            takeoff: flight.takeoff_time.to_string(),
            land: flight.land_time.to_string(),
            airspace,
            tacan,
            freq,
            cm,
            conflicts: result.conflicts.len(),
        }
    }
}

fn or_empty(value: String) -> String {
    if value.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value
    }
}

pub fn assignment_rows(outcome: &DeconflictionOutcome, squadron_prefix: &str) -> Vec<AssignmentRow> {
    outcome
        .results
        .iter()
        .map(|r| AssignmentRow::from_result(r, squadron_prefix))
        .collect()
}

// ==========================================
// CSV 导出
// ==========================================

pub fn write_assignment_csv<W: Write>(
    outcome: &DeconflictionOutcome,
    squadron_prefix: &str,
    writer: W,
) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in assignment_rows(outcome, squadron_prefix) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_assignment_csv(
    outcome: &DeconflictionOutcome,
    squadron_prefix: &str,
    path: &Path,
) -> ExportResult<()> {
    let file = File::create(path)?;
    write_assignment_csv(outcome, squadron_prefix, BufWriter::new(file))?;
    info!(path = %path.display(), rows = outcome.results.len(), "分配表 CSV 已导出");
    Ok(())
}

// ==========================================
// JSON 导出
// ==========================================

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a RunSummary,
    results: &'a [DeconflictResult],
    conflicts: &'a [Conflict],
}

pub fn write_json<W: Write>(
    outcome: &DeconflictionOutcome,
    summary: &RunSummary,
    writer: W,
) -> ExportResult<()> {
    let report = JsonReport {
        summary,
        results: &outcome.results,
        conflicts: &outcome.conflicts,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

pub fn export_json(outcome: &DeconflictionOutcome, summary: &RunSummary, path: &Path) -> ExportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(outcome, summary, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), "消冲结果 JSON 已导出");
    Ok(())
}
