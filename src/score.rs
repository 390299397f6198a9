// 🎯 Score Model - kills and deads folded into one number

use crate::governor::Governor;

/// One dead counts as much as this many kills.
pub const DEATH_WEIGHT: f64 = 10.0;

/// `t4 + t5 + deads * 10`
pub fn score(governor: &Governor) -> f64 {
    governor.t4_kills + governor.t5_kills + governor.deads * DEATH_WEIGHT
}

/// Deficit against `requirement`, expressed in kill-equivalent troops.
///
/// Zero once the score meets the requirement. The remainder is rounded down.
pub fn troops_to_delete(score: f64, requirement: f64) -> f64 {
    if score >= requirement {
        return 0.0;
    }

    ((requirement - score) / DEATH_WEIGHT).floor()
}
