//! Centralized balance and tuning constants for the Courtside match engine.
//!
//! Stat defaults mirror league-average values and are substituted whenever a
//! profile omits a field. Probability weights keep every factor pointing in
//! the same direction: better offense raises make odds, better defense lowers
//! them.

// Raw stat defaults ---------------------------------------------------------
pub(crate) const DEFAULT_POINTS: f64 = 10.0;
pub(crate) const DEFAULT_ASSISTS: f64 = 3.0;
pub(crate) const DEFAULT_REBOUNDS: f64 = 5.0;
pub(crate) const DEFAULT_GUARD_REBOUNDS: f64 = 3.0;
pub(crate) const DEFAULT_WING_REBOUNDS: f64 = 4.0;
pub(crate) const DEFAULT_FG_PCT: f64 = 45.0;
pub(crate) const DEFAULT_THREE_PCT: f64 = 33.0;
pub(crate) const DEFAULT_FT_PCT: f64 = 75.0;
pub(crate) const DEFAULT_TS_PCT: f64 = 55.0;
pub(crate) const DEFAULT_MINUTES: f64 = 25.0;
pub(crate) const DEFAULT_TURNOVERS: f64 = 2.0;
pub(crate) const DEFAULT_HEIGHT_INCHES: u32 = 72;

// Enhancer weights ----------------------------------------------------------
pub(crate) const USAGE_RATE_CAP: f64 = 100.0;
pub(crate) const BIG_BASE_BLOCKS: f64 = 1.2;
pub(crate) const BIG_STEALS: f64 = 0.8;
pub(crate) const BIG_OFFENSIVE_SHARE: f64 = 0.35;
pub(crate) const GUARD_BASE_STEALS: f64 = 1.2;
pub(crate) const GUARD_BLOCKS: f64 = 0.3;
pub(crate) const GUARD_OFFENSIVE_SHARE: f64 = 0.20;
pub(crate) const WING_STEALS: f64 = 1.0;
pub(crate) const WING_BLOCKS: f64 = 0.7;
pub(crate) const WING_OFFENSIVE_SHARE: f64 = 0.25;
pub(crate) const HIGH_THREE_TENDENCY: f64 = 0.6;
pub(crate) const MID_THREE_TENDENCY: f64 = 0.4;
pub(crate) const LOW_THREE_TENDENCY: f64 = 0.2;

// Match rules ---------------------------------------------------------------
pub const DEFAULT_TARGET_SCORE: u32 = 11;
pub const WIN_MARGIN: u32 = 2;
pub const POSSESSION_CAP: u32 = 100;
pub(crate) const INSIDE_POINTS: u32 = 1;
pub(crate) const OUTSIDE_POINTS: u32 = 2;
pub(crate) const CLUTCH_SCORE_WINDOW: u32 = 2;
pub(crate) const CLUTCH_TARGET_WINDOW: u32 = 3;
pub(crate) const OFFENSE_FATIGUE_PER_POSSESSION: f64 = 0.5;
pub(crate) const DEFENSE_FATIGUE_PER_POSSESSION: f64 = 0.3;
pub(crate) const BLOCK_RECOVERY_CHANCE: f64 = 0.5;
pub(crate) const DEFENSE_MENTION_CHANCE: f64 = 0.7;

// Turnovers -----------------------------------------------------------------
pub(crate) const TURNOVER_DIVISOR: f64 = 40.0;
pub(crate) const TURNOVER_RATE_MAX: f64 = 0.15;
pub(crate) const STEAL_DIVISOR: f64 = 40.0;
pub(crate) const STEAL_RATE_MAX: f64 = 0.10;
pub const TURNOVER_PROBABILITY_MAX: f64 = 0.25;

// Blocks --------------------------------------------------------------------
pub(crate) const BLOCK_DIVISOR: f64 = 15.0;
pub(crate) const BLOCK_HEIGHT_BONUS_PER_INCH: f64 = 0.01;
pub const BLOCK_PROBABILITY_MAX: f64 = 0.25;

// Shooting ------------------------------------------------------------------
pub const SHOT_PROBABILITY_MIN: f64 = 0.1;
pub const SHOT_PROBABILITY_MAX: f64 = 0.9;
pub(crate) const HEIGHT_EDGE_PER_INCH: f64 = 0.01;
pub(crate) const HEIGHT_EDGE_LIMIT: f64 = 0.10;
pub(crate) const OUTSIDE_TENDENCY_WEIGHT: f64 = 0.1;
pub(crate) const RATING_FACTOR_BASE: f64 = 0.85;
pub(crate) const RATING_FACTOR_SLOPE: f64 = 0.25;
pub(crate) const RATING_FACTOR_MIN: f64 = 0.9;
pub(crate) const RATING_FACTOR_MAX: f64 = 1.1;
pub(crate) const DEFENSIVE_IMPACT_WEIGHT: f64 = 0.1;
pub(crate) const DEFENSIVE_IMPACT_FLOOR: f64 = 0.8;
pub(crate) const CLUTCH_WEIGHT: f64 = 0.1;
pub(crate) const FATIGUE_WEIGHT: f64 = 0.005;
pub(crate) const FATIGUE_FACTOR_FLOOR: f64 = 0.75;

// Rebounding ----------------------------------------------------------------
pub(crate) const INSIDE_MISS_DEFENSE_WEIGHT: f64 = 1.0;
pub(crate) const OUTSIDE_MISS_DEFENSE_WEIGHT: f64 = 1.5;
pub(crate) const REBOUND_HEIGHT_PER_INCH: f64 = 0.005;
pub const REBOUND_PROBABILITY_MIN: f64 = 0.2;
pub const REBOUND_PROBABILITY_MAX: f64 = 0.8;

// Court ratings -------------------------------------------------------------
pub(crate) const OFFENSIVE_RATING_POINTS_WEIGHT: f64 = 0.4;
pub(crate) const OFFENSIVE_RATING_FG_WEIGHT: f64 = 0.3;
pub(crate) const OFFENSIVE_RATING_THREE_WEIGHT: f64 = 0.3;
pub(crate) const DEFENSIVE_RATING_REBOUND_WEIGHT: f64 = 0.5;
pub(crate) const DEFENSIVE_RATING_HEIGHT_NORM: f64 = 84.0;
pub(crate) const DEFENSIVE_RATING_HEIGHT_SCALE: f64 = 50.0;
