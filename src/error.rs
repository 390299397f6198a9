// ⚠️ Snapshot errors - everything that stops a run before output is written

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Input path does not exist
    #[error("input file does not exist: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Row does not have the column count the layout expects
    #[error("{}:{line}: expected {expected} columns, found {found}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Numeric cell (or id) that cannot be read as a number
    #[error("{}:{line}: invalid {field} value {value:?}", path.display())]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("failed to read CSV {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
