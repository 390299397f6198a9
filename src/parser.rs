// 🏗️ Snapshot Parser - CSV exports → Governor records
//
// Two export layouts are in circulation:
//   Compact: id, power, t4_kills, t5_kills, deads          (no header)
//   Named:   id, name, power, t4_kills, t5_kills, deads    (header row)
//
// Numbers may carry thousands separators ("1,234,567").

use crate::error::SnapshotError;
use crate::governor::{Governor, GovernorId};
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

// ============================================================================
// LAYOUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum RowLayout {
    /// id, power, t4_kills, t5_kills, deads (no header)
    Compact,
    /// id, name, power, t4_kills, t5_kills, deads (header row skipped)
    Named,
}

impl RowLayout {
    pub fn columns(&self) -> usize {
        match self {
            RowLayout::Compact => 5,
            RowLayout::Named => 6,
        }
    }

    pub fn has_header(&self) -> bool {
        matches!(self, RowLayout::Named)
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

/// Strip thousands separators and parse as a float.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").trim().parse::<f64>().ok()
}

fn parse_id(raw: &str) -> Option<GovernorId> {
    let value = parse_number(raw)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(GovernorId(value as u64))
}

// ============================================================================
// ROW → GOVERNOR
// ============================================================================

struct RowContext<'a> {
    path: &'a Path,
    line: u64,
}

impl RowContext<'_> {
    fn number(&self, record: &StringRecord, index: usize, field: &'static str) -> Result<f64, SnapshotError> {
        let raw = record.get(index).unwrap_or("");
        parse_number(raw).ok_or_else(|| self.invalid(field, raw))
    }

    fn invalid(&self, field: &'static str, raw: &str) -> SnapshotError {
        SnapshotError::InvalidNumber {
            path: self.path.to_path_buf(),
            line: self.line,
            field,
            value: raw.to_string(),
        }
    }
}

fn parse_row(
    record: &StringRecord,
    layout: RowLayout,
    ctx: &RowContext<'_>,
) -> Result<Governor, SnapshotError> {
    if record.len() != layout.columns() {
        return Err(SnapshotError::MalformedRow {
            path: ctx.path.to_path_buf(),
            line: ctx.line,
            expected: layout.columns(),
            found: record.len(),
        });
    }

    let raw_id = record.get(0).unwrap_or("");
    let id = parse_id(raw_id).ok_or_else(|| ctx.invalid("id", raw_id))?;

    // Named rows shift every numeric column one to the right
    let (name, offset) = match layout {
        RowLayout::Compact => (String::new(), 1),
        RowLayout::Named => (record.get(1).unwrap_or("").to_string(), 2),
    };

    Ok(Governor {
        id,
        name,
        power: ctx.number(record, offset, "power")?,
        t4_kills: ctx.number(record, offset + 1, "t4_kills")?,
        t5_kills: ctx.number(record, offset + 2, "t5_kills")?,
        deads: ctx.number(record, offset + 3, "deads")?,
    })
}

// ============================================================================
// LOADER
// ============================================================================

/// Load one snapshot. Any missing file, short row or unreadable number
/// aborts the whole load.
pub fn load_snapshot(path: &Path, layout: RowLayout) -> Result<Vec<Governor>, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(layout.has_header())
        .flexible(true)
        .from_reader(file);

    let mut governors = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| SnapshotError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(row as u64 + if layout.has_header() { 2 } else { 1 });

        let ctx = RowContext { path, line };
        governors.push(parse_row(&record, layout, &ctx)?);
    }

    log::debug!(
        "loaded {} governors from {} ({:?})",
        governors.len(),
        path.display(),
        layout
    );

    Ok(governors)
}

// ============================================================================
// TESTS
// ============================================================================
