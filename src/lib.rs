// Governor Stats - Core Library
// Requirement tiers, delta reconciliation and CSV plumbing for the CLI and tests

pub mod tiers;
pub mod score;
pub mod governor;
pub mod reconciliation;
pub mod parser;
pub mod output;
pub mod error;

// Re-export commonly used types
pub use tiers::{required_deaths, required_kills, requirement, Tier};
pub use score::{score, troops_to_delete, DEATH_WEIGHT};
pub use governor::{Governor, GovernorId};
pub use reconciliation::{
    compute_pair_delta, merge_deltas,
    PairDelta, ReconciliationEngine, ReconciliationReport, SnapshotPair, WindowSummary,
};
pub use parser::{load_snapshot, parse_number, RowLayout};
pub use output::{
    format_number, write_requirements, write_requirements_csv, write_stats, write_stats_csv,
    RequirementRow, StatsRow,
};
pub use error::SnapshotError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
