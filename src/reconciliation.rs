// ⚖️ Reconciliation Engine - Match governors across snapshots
//
// For every (before, after) pair:
//   matched   = ids in both snapshots       → one delta each
//   not_found = ids in exactly one snapshot → reported, never output
//
// Deltas from several windows are then folded into one list. Counters add up;
// power and name stay with the window where the governor first appeared.

use crate::governor::{Governor, GovernorId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

// ============================================================================
// INPUT
// ============================================================================

/// One time window: a scan at the start and a scan at the end
#[derive(Debug, Clone, Default)]
pub struct SnapshotPair {
    pub before: Vec<Governor>,
    pub after: Vec<Governor>,
}

impl SnapshotPair {
    pub fn new(before: Vec<Governor>, after: Vec<Governor>) -> Self {
        SnapshotPair { before, after }
    }
}

// ============================================================================
// PER-WINDOW RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PairDelta {
    /// One record per matched id, in the order ids first appear in `before`
    pub deltas: Vec<Governor>,

    /// Ids present in only one of the two snapshots
    pub not_found: BTreeSet<GovernorId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub window: usize,
    pub before_count: usize,
    pub after_count: usize,
    pub matched: usize,
    pub not_found: Vec<GovernorId>,
}

impl WindowSummary {
    pub fn lengths_differ(&self) -> bool {
        self.before_count != self.after_count
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub windows: Vec<WindowSummary>,

    /// Merged deltas, one per id matched in at least one window
    pub deltas: Vec<Governor>,

    /// Union of every window's unmatched ids
    pub not_found: Vec<GovernorId>,

    pub reconciled_at: chrono::DateTime<chrono::Utc>,
}

impl ReconciliationReport {
    pub fn summary(&self) -> String {
        format!(
            "Reconciled {} window(s): {} governors with deltas, {} not found",
            self.windows.len(),
            self.deltas.len(),
            self.not_found.len()
        )
    }
}

// ============================================================================
// CORE OPERATIONS
// ============================================================================

/// First occurrence of each id → its index. Later duplicates are ignored.
fn index_by_id(governors: &[Governor]) -> HashMap<GovernorId, usize> {
    let mut index = HashMap::with_capacity(governors.len());
    for (i, gov) in governors.iter().enumerate() {
        index.entry(gov.id).or_insert(i);
    }
    index
}

/// Deltas for one window.
pub fn compute_pair_delta(before: &[Governor], after: &[Governor]) -> PairDelta {
    let before_index = index_by_id(before);
    let after_index = index_by_id(after);

    let not_found: BTreeSet<GovernorId> = before_index
        .keys()
        .filter(|id| !after_index.contains_key(*id))
        .chain(after_index.keys().filter(|id| !before_index.contains_key(*id)))
        .copied()
        .collect();

    let mut deltas = Vec::with_capacity(before_index.len().min(after_index.len()));
    for (i, earlier) in before.iter().enumerate() {
        // Skip duplicates: only the first occurrence is matched
        if before_index.get(&earlier.id) != Some(&i) {
            continue;
        }
        if let Some(&j) = after_index.get(&earlier.id) {
            deltas.push(earlier.difference(&after[j]));
        }
    }

    PairDelta { deltas, not_found }
}

/// Fold `next` into `accumulated`.
///
/// Records already in `accumulated` are summed with their counterpart in
/// `next` (keeping the accumulated power and name). Records only in `next`
/// are appended unchanged, in their original order.
pub fn merge_deltas(accumulated: Vec<Governor>, next: Vec<Governor>) -> Vec<Governor> {
    let next_index = index_by_id(&next);

    let mut merged: Vec<Governor> = accumulated
        .into_iter()
        .map(|gov| match next_index.get(&gov.id) {
            Some(&j) => gov.sum(&next[j]),
            None => gov,
        })
        .collect();

    let mut seen: HashSet<GovernorId> = merged.iter().map(|gov| gov.id).collect();
    for gov in next {
        if seen.insert(gov.id) {
            merged.push(gov);
        }
    }

    merged
}

// ============================================================================
// RECONCILIATION ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        ReconciliationEngine
    }

    /// Reconcile every window and merge the results.
    ///
    /// Windows are processed in order; a governor first seen in a later
    /// window enters the result with that window's power and name.
    pub fn reconcile(&self, pairs: &[SnapshotPair]) -> ReconciliationReport {
        let mut windows = Vec::with_capacity(pairs.len());
        let mut not_found = BTreeSet::new();
        let mut deltas = Vec::new();

        for (window, pair) in pairs.iter().enumerate() {
            if pair.before.len() != pair.after.len() {
                log::warn!(
                    "window {}: before has {} governors, after has {}; unmatched governors will be skipped",
                    window,
                    pair.before.len(),
                    pair.after.len()
                );
            }

            let result = compute_pair_delta(&pair.before, &pair.after);

            if !result.not_found.is_empty() {
                log::info!(
                    "window {}: {} governor(s) not found in both snapshots: {:?}",
                    window,
                    result.not_found.len(),
                    result.not_found.iter().map(|id| id.0).collect::<Vec<_>>()
                );
            }
            log::debug!("window {}: {} matched", window, result.deltas.len());

            windows.push(WindowSummary {
                window,
                before_count: pair.before.len(),
                after_count: pair.after.len(),
                matched: result.deltas.len(),
                not_found: result.not_found.iter().copied().collect(),
            });
            not_found.extend(result.not_found);
            deltas = merge_deltas(deltas, result.deltas);
        }

        ReconciliationReport {
            windows,
            deltas,
            not_found: not_found.into_iter().collect(),
            reconciled_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gov(id: u64, name: &str, power: f64, t4: f64, t5: f64, deads: f64) -> Governor {
        Governor::new(GovernorId(id), name, power, t4, t5, deads)
    }

    fn ids(govs: &[Governor]) -> Vec<u64> {
        govs.iter().map(|g| g.id.0).collect()
    }

    #[test]
    fn test_pair_delta_single_governor() {
        let before = vec![gov(1, "A", 1e8, 100.0, 50.0, 10.0)];
        let after = vec![gov(1, "A2", 1e8, 150.0, 80.0, 15.0)];

        let result = compute_pair_delta(&before, &after);

        assert!(result.not_found.is_empty());
        assert_eq!(result.deltas, vec![gov(1, "A2", 1e8, 50.0, 30.0, 5.0)]);

        let delta = &result.deltas[0];
        assert_eq!(delta.score(), 130.0);
        assert_eq!(delta.requirement(), 44_000_000.0);
        assert_eq!(delta.troops_to_delete(), 4_399_987.0);
    }

    #[test]
    fn test_pair_delta_symmetric_difference_is_not_found() {
        let before = vec![
            gov(1, "A", 1e8, 10.0, 0.0, 0.0),
            gov(2, "B", 1e8, 10.0, 0.0, 0.0),
        ];
        let after = vec![
            gov(1, "A", 1e8, 20.0, 0.0, 0.0),
            gov(3, "C", 1e8, 20.0, 0.0, 0.0),
        ];

        let result = compute_pair_delta(&before, &after);

        assert_eq!(
            result.not_found,
            BTreeSet::from([GovernorId(2), GovernorId(3)])
        );
        assert_eq!(ids(&result.deltas), vec![1]);
        assert_eq!(result.deltas[0].t4_kills, 10.0);
    }

    #[test]
    fn test_pair_delta_follows_before_order() {
        let before = vec![
            gov(30, "C", 0.0, 0.0, 0.0, 0.0),
            gov(10, "A", 0.0, 0.0, 0.0, 0.0),
            gov(20, "B", 0.0, 0.0, 0.0, 0.0),
        ];
        let after = vec![
            gov(10, "A", 0.0, 1.0, 0.0, 0.0),
            gov(20, "B", 0.0, 2.0, 0.0, 0.0),
            gov(30, "C", 0.0, 3.0, 0.0, 0.0),
        ];

        let result = compute_pair_delta(&before, &after);
        assert_eq!(ids(&result.deltas), vec![30, 10, 20]);
    }

    #[test]
    fn test_pair_delta_duplicate_id_uses_first_occurrence() {
        let before = vec![
            gov(1, "A", 0.0, 10.0, 0.0, 0.0),
            gov(1, "A dup", 0.0, 99.0, 0.0, 0.0),
        ];
        let after = vec![
            gov(1, "A", 0.0, 15.0, 0.0, 0.0),
            gov(1, "A dup", 0.0, 500.0, 0.0, 0.0),
        ];

        let result = compute_pair_delta(&before, &after);

        assert_eq!(result.deltas.len(), 1);
        assert_eq!(result.deltas[0].t4_kills, 5.0);
        assert_eq!(result.deltas[0].name, "A");
    }

    #[test]
    fn test_merge_with_same_ids_doubles_counters() {
        let deltas = vec![
            gov(1, "A", 1e8, 50.0, 30.0, 5.0),
            gov(2, "B", 6e7, 1.0, 2.0, 3.0),
        ];

        let merged = merge_deltas(deltas.clone(), deltas.clone());

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], gov(1, "A", 1e8, 100.0, 60.0, 10.0));
        assert_eq!(merged[1], gov(2, "B", 6e7, 2.0, 4.0, 6.0));
    }

    #[test]
    fn test_merge_keeps_first_power_and_name() {
        let first = vec![gov(1, "old", 1e8, 10.0, 0.0, 0.0)];
        let second = vec![gov(1, "new", 2e8, 5.0, 0.0, 0.0)];

        let merged = merge_deltas(first, second);

        assert_eq!(merged, vec![gov(1, "old", 1e8, 15.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_merge_appends_late_arrivals() {
        let first = vec![gov(1, "A", 1e8, 10.0, 0.0, 0.0)];
        let second = vec![
            gov(4, "D", 7e7, 3.0, 0.0, 0.0),
            gov(1, "A", 1e8, 5.0, 0.0, 0.0),
            gov(2, "B", 9e7, 1.0, 0.0, 0.0),
        ];

        let merged = merge_deltas(first, second);

        assert_eq!(ids(&merged), vec![1, 4, 2]);
        assert_eq!(merged[0].t4_kills, 15.0);
        assert_eq!(merged[1], gov(4, "D", 7e7, 3.0, 0.0, 0.0));
    }

    #[test]
    fn test_merge_into_empty() {
        let next = vec![gov(9, "Z", 0.0, 1.0, 1.0, 1.0)];
        assert_eq!(merge_deltas(Vec::new(), next.clone()), next);
    }

    #[test]
    fn test_engine_merges_windows() {
        let engine = ReconciliationEngine::new();

        let week1 = SnapshotPair::new(
            vec![
                gov(1, "A", 1e8, 100.0, 50.0, 10.0),
                gov(2, "B", 6e7, 0.0, 0.0, 0.0),
            ],
            vec![
                gov(1, "A2", 1.1e8, 150.0, 80.0, 15.0),
                gov(3, "C", 5e7, 0.0, 0.0, 0.0),
            ],
        );
        let week2 = SnapshotPair::new(
            vec![
                gov(1, "A2", 1.1e8, 150.0, 80.0, 15.0),
                gov(3, "C", 5e7, 0.0, 0.0, 0.0),
            ],
            vec![
                gov(1, "A3", 1.2e8, 160.0, 80.0, 20.0),
                gov(3, "C2", 5.5e7, 40.0, 0.0, 2.0),
            ],
        );

        let report = engine.reconcile(&[week1, week2]);

        assert_eq!(report.windows.len(), 2);
        assert_eq!(report.windows[0].matched, 1);
        assert_eq!(report.windows[0].not_found, vec![GovernorId(2), GovernorId(3)]);
        assert!(report.windows[1].not_found.is_empty());
        assert_eq!(report.not_found, vec![GovernorId(2), GovernorId(3)]);

        assert_eq!(
            report.deltas,
            vec![
                // Name and power stay with the first window's delta
                gov(1, "A2", 1e8, 60.0, 30.0, 10.0),
                // First appears in window 2
                gov(3, "C2", 5e7, 40.0, 0.0, 2.0),
            ]
        );

        println!("✅ {}", report.summary());
    }

    #[test]
    fn test_engine_length_mismatch_continues() {
        let engine = ReconciliationEngine::new();
        let pair = SnapshotPair::new(
            vec![gov(1, "A", 0.0, 1.0, 0.0, 0.0), gov(2, "B", 0.0, 1.0, 0.0, 0.0)],
            vec![gov(1, "A", 0.0, 4.0, 0.0, 0.0)],
        );

        let report = engine.reconcile(&[pair]);

        assert!(report.windows[0].lengths_differ());
        assert_eq!(ids(&report.deltas), vec![1]);
        assert_eq!(report.deltas[0].t4_kills, 3.0);
    }

    #[test]
    fn test_engine_no_windows() {
        let report = ReconciliationEngine::default().reconcile(&[]);

        assert!(report.deltas.is_empty());
        assert!(report.not_found.is_empty());
        assert_eq!(
            report.summary(),
            "Reconciled 0 window(s): 0 governors with deltas, 0 not found"
        );
    }
}
