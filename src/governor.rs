// 🛡️ Governor - one player's stats at a point in time
//
// Identity is the governor id (stable across snapshots). Everything else is a
// value that can change between snapshots: the name, the power, the counters.
// Records are never mutated in place; `difference` and `sum` build new ones.

use crate::score::{score, troops_to_delete};
use crate::tiers::requirement;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDENTITY
// ============================================================================

/// Join key across snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GovernorId(pub u64);

impl fmt::Display for GovernorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// GOVERNOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Governor {
    pub id: GovernorId,
    pub name: String,
    pub power: f64,
    pub t4_kills: f64,
    pub t5_kills: f64,
    pub deads: f64,
}

impl Governor {
    pub fn new(
        id: GovernorId,
        name: impl Into<String>,
        power: f64,
        t4_kills: f64,
        t5_kills: f64,
        deads: f64,
    ) -> Self {
        Governor {
            id,
            name: name.into(),
            power,
            t4_kills,
            t5_kills,
            deads,
        }
    }

    /// Stat change from `self` (earlier scan) to `later`.
    ///
    /// Counters are `later - self` and are not clamped. Power stays at the
    /// earlier value (power at registration); the name comes from `later`.
    ///
    /// Panics if the ids differ.
    pub fn difference(&self, later: &Governor) -> Governor {
        assert_eq!(
            self.id, later.id,
            "difference requires the same governor on both sides"
        );

        Governor {
            id: self.id,
            name: later.name.clone(),
            power: self.power,
            t4_kills: later.t4_kills - self.t4_kills,
            t5_kills: later.t5_kills - self.t5_kills,
            deads: later.deads - self.deads,
        }
    }

    /// Counters added together; power and name stay with `self`.
    ///
    /// Panics if the ids differ.
    pub fn sum(&self, other: &Governor) -> Governor {
        assert_eq!(
            self.id, other.id,
            "sum requires the same governor on both sides"
        );

        Governor {
            id: self.id,
            name: self.name.clone(),
            power: self.power,
            t4_kills: self.t4_kills + other.t4_kills,
            t5_kills: self.t5_kills + other.t5_kills,
            deads: self.deads + other.deads,
        }
    }

    pub fn same_identity(&self, other: &Governor) -> bool {
        self.id == other.id
    }

    pub fn score(&self) -> f64 {
        score(self)
    }

    /// Score threshold for this governor's power
    pub fn requirement(&self) -> f64 {
        requirement(self.power)
    }

    pub fn troops_to_delete(&self) -> f64 {
        troops_to_delete(self.score(), self.requirement())
    }
}
