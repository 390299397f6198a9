// 📈 Tier Tables - Power → requirement lookups
//
// Two interpolated tables (kills, deaths) and one coarse step table (score).
// The constants are game-balance values and are kept exactly as published,
// including the irregular death tiers between 50M and 70M.

// ============================================================================
// TIER DEFINITION
// ============================================================================

/// One power bracket: `[floor, floor + span)` starting at `base` and moving
/// toward `base + delta` at the next breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub floor: f64,
    pub span: f64,
    pub base: f64,
    pub delta: f64,
}

impl Tier {
    const fn new(floor: f64, span: f64, base: f64, delta: f64) -> Self {
        Tier {
            floor,
            span,
            base,
            delta,
        }
    }

    /// Value inside this bracket.
    ///
    /// Exactly at the floor the base is returned; otherwise the position in
    /// the bracket scales `delta` and the increment is rounded up.
    pub fn value_at(&self, power: f64) -> f64 {
        if power == self.floor {
            return self.base;
        }

        let ratio = (power - self.floor) / self.span;
        self.base + (ratio * self.delta).ceil()
    }
}

// Highest tier first. The top tier has no ceiling: its span is the distance
// used to scale the open-ended increment.
const KILL_TIERS: [Tier; 9] = [
    Tier::new(200_000_000.0, 100_000_000.0, 37_500_000.0, 22_500_000.0),
    Tier::new(150_000_000.0, 50_000_000.0, 33_000_000.0, 4_500_000.0),
    Tier::new(125_000_000.0, 25_000_000.0, 30_000_000.0, 3_000_000.0),
    Tier::new(100_000_000.0, 25_000_000.0, 22_000_000.0, 8_000_000.0),
    Tier::new(90_000_000.0, 10_000_000.0, 18_000_000.0, 4_000_000.0),
    Tier::new(80_000_000.0, 10_000_000.0, 16_000_000.0, 2_000_000.0),
    Tier::new(70_000_000.0, 10_000_000.0, 8_000_000.0, 8_000_000.0),
    Tier::new(60_000_000.0, 10_000_000.0, 8_000_000.0, 0.0),
    Tier::new(50_000_000.0, 10_000_000.0, 5_000_000.0, 3_000_000.0),
];

// No breakpoint at 60M: deaths stay flat from 50M up to 70M.
// The 100M tier climbs 0.9M even though the 125M tier restarts at 3.3M.
const DEATH_TIERS: [Tier; 8] = [
    Tier::new(200_000_000.0, 100_000_000.0, 5_500_000.0, 4_500_000.0),
    Tier::new(150_000_000.0, 50_000_000.0, 4_400_000.0, 1_100_000.0),
    Tier::new(125_000_000.0, 25_000_000.0, 3_300_000.0, 1_100_000.0),
    Tier::new(100_000_000.0, 25_000_000.0, 2_600_000.0, 900_000.0),
    Tier::new(90_000_000.0, 10_000_000.0, 2_000_000.0, 600_000.0),
    Tier::new(80_000_000.0, 10_000_000.0, 1_500_000.0, 500_000.0),
    Tier::new(70_000_000.0, 10_000_000.0, 1_000_000.0, 500_000.0),
    Tier::new(50_000_000.0, 20_000_000.0, 1_000_000.0, 0.0),
];

/// (minimum power, required score)
const SCORE_REQUIREMENTS: [(f64, f64); 9] = [
    (200_000_000.0, 87_500_000.0),
    (150_000_000.0, 73_000_000.0),
    (125_000_000.0, 60_000_000.0),
    (100_000_000.0, 44_000_000.0),
    (90_000_000.0, 36_000_000.0),
    (80_000_000.0, 29_500_000.0),
    (70_000_000.0, 17_500_000.0),
    (60_000_000.0, 12_500_000.0),
    (50_000_000.0, 9_750_000.0),
];

// ============================================================================
// LOOKUPS
// ============================================================================

fn interpolate(tiers: &[Tier], power: f64) -> f64 {
    tiers
        .iter()
        .find(|tier| power >= tier.floor)
        .map(|tier| tier.value_at(power))
        .unwrap_or(0.0)
}

/// Kills a governor of the given power is expected to reach.
pub fn required_kills(power: f64) -> f64 {
    interpolate(&KILL_TIERS, power)
}

/// Deads a governor of the given power is expected to reach.
pub fn required_deaths(power: f64) -> f64 {
    interpolate(&DEATH_TIERS, power)
}

/// Combined score threshold for the given power.
///
/// This is a separate, coarser table; it is not derived from
/// [`required_kills`] and [`required_deaths`].
pub fn requirement(power: f64) -> f64 {
    SCORE_REQUIREMENTS
        .iter()
        .find(|(floor, _)| power >= *floor)
        .map(|(_, required)| *required)
        .unwrap_or(0.0)
}

// ============================================================================
// TESTS
// ============================================================================
