// 📤 Output - Governor records → CSV reports
//
// Every number is written in floating-point form ("100000000.0"), the way the
// downstream spreadsheets have always received it.

use crate::governor::Governor;
use crate::tiers::{required_deaths, required_kills};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const STATS_HEADERS: [&str; 9] = [
    "Governor ID",
    "Name",
    "Power",
    "T4 Kills",
    "T5 Kills",
    "Deads",
    "Total Score",
    "Requirements",
    "Troops to delete",
];

pub const REQUIREMENT_HEADERS: [&str; 5] = [
    "Governor ID",
    "Name",
    "Power",
    "Dead Requirements",
    "Kill Requirements",
];

/// Decimal form of a number; whole values keep a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// Delta row with derived score columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRow {
    pub governor_id: String,
    pub name: String,
    pub power: String,
    pub t4_kills: String,
    pub t5_kills: String,
    pub deads: String,
    pub total_score: String,
    pub requirements: String,
    pub troops_to_delete: String,
}

impl From<&Governor> for StatsRow {
    fn from(gov: &Governor) -> Self {
        StatsRow {
            governor_id: format_number(gov.id.0 as f64),
            name: gov.name.clone(),
            power: format_number(gov.power),
            t4_kills: format_number(gov.t4_kills),
            t5_kills: format_number(gov.t5_kills),
            deads: format_number(gov.deads),
            total_score: format_number(gov.score()),
            requirements: format_number(gov.requirement()),
            troops_to_delete: format_number(gov.troops_to_delete()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementRow {
    pub governor_id: String,
    pub name: String,
    pub power: String,
    pub dead_requirements: String,
    pub kill_requirements: String,
}

impl From<&Governor> for RequirementRow {
    fn from(gov: &Governor) -> Self {
        RequirementRow {
            governor_id: format_number(gov.id.0 as f64),
            name: gov.name.clone(),
            power: format_number(gov.power),
            dead_requirements: format_number(required_deaths(gov.power)),
            kill_requirements: format_number(required_kills(gov.power)),
        }
    }
}

// ============================================================================
// WRITERS
// ============================================================================

fn write_rows<W, R>(writer: W, headers: &[&str], rows: impl IntoIterator<Item = R>) -> Result<()>
where
    W: Write,
    R: Serialize,
{
    // Header is written by hand so an empty report still has one
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

pub fn write_stats<W: Write>(writer: W, deltas: &[Governor]) -> Result<()> {
    write_rows(writer, &STATS_HEADERS, deltas.iter().map(StatsRow::from))
}

pub fn write_requirements<W: Write>(writer: W, governors: &[Governor]) -> Result<()> {
    write_rows(
        writer,
        &REQUIREMENT_HEADERS,
        governors.iter().map(RequirementRow::from),
    )
}

pub fn write_stats_csv(path: &Path, deltas: &[Governor]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_stats(file, deltas)
        .with_context(|| format!("Failed to write stats to {}", path.display()))
}

pub fn write_requirements_csv(path: &Path, governors: &[Governor]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_requirements(file, governors)
        .with_context(|| format!("Failed to write requirements to {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================
