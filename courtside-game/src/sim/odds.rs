//! Probability models for a single possession.
//!
//! Every function returns a value already clamped to its documented bounds so
//! the sampler never sees an out-of-range probability.
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::contender::Contender;
use crate::constants::{
    BLOCK_DIVISOR, BLOCK_HEIGHT_BONUS_PER_INCH, BLOCK_PROBABILITY_MAX, CLUTCH_SCORE_WINDOW,
    CLUTCH_TARGET_WINDOW, CLUTCH_WEIGHT, DEFENSIVE_IMPACT_FLOOR, DEFENSIVE_IMPACT_WEIGHT,
    FATIGUE_FACTOR_FLOOR, FATIGUE_WEIGHT, HEIGHT_EDGE_LIMIT, HEIGHT_EDGE_PER_INCH, INSIDE_POINTS,
    INSIDE_MISS_DEFENSE_WEIGHT, LOW_THREE_TENDENCY, OUTSIDE_MISS_DEFENSE_WEIGHT, OUTSIDE_POINTS,
    OUTSIDE_TENDENCY_WEIGHT, RATING_FACTOR_BASE, RATING_FACTOR_MAX, RATING_FACTOR_MIN,
    RATING_FACTOR_SLOPE, REBOUND_HEIGHT_PER_INCH, REBOUND_PROBABILITY_MAX,
    REBOUND_PROBABILITY_MIN, SHOT_PROBABILITY_MAX, SHOT_PROBABILITY_MIN, STEAL_DIVISOR,
    STEAL_RATE_MAX, TURNOVER_DIVISOR, TURNOVER_PROBABILITY_MAX, TURNOVER_RATE_MAX,
};
use crate::numbers::{clamp_probability, clamp_unit, share, signed_diff};

/// Inside shots are worth one point, outside shots two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotKind {
    Inside,
    Outside,
}

impl ShotKind {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Inside => INSIDE_POINTS,
            Self::Outside => OUTSIDE_POINTS,
        }
    }
}

/// Chance of losing the ball before a shot, and how much of it the defender
/// earns with a steal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnoverOdds {
    pub probability: f64,
    pub steal_share: f64,
}

/// Score context for the clutch and fatigue adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pressure {
    pub offense_score: u32,
    pub defense_score: u32,
    pub target_score: u32,
    pub offense_fatigue: f64,
}

impl Pressure {
    /// Close game near the finish line.
    #[must_use]
    pub fn is_clutch(&self) -> bool {
        let gap = self.offense_score.abs_diff(self.defense_score);
        let leader = self.offense_score.max(self.defense_score);
        gap <= CLUTCH_SCORE_WINDOW && leader.saturating_add(CLUTCH_TARGET_WINDOW) >= self.target_score
    }
}

#[must_use]
pub fn turnover_odds(offense: &Contender, defense: &Contender) -> TurnoverOdds {
    let unforced = clamp_probability(
        offense.profile().turnovers_or_default() / TURNOVER_DIVISOR,
        0.0,
        TURNOVER_RATE_MAX,
    );
    let steal = clamp_probability(
        defense.derived().estimated_steals / STEAL_DIVISOR,
        0.0,
        STEAL_RATE_MAX,
    );
    TurnoverOdds {
        probability: clamp_probability(unforced + steal, 0.0, TURNOVER_PROBABILITY_MAX),
        steal_share: clamp_unit(share(steal, unforced, 0.0)),
    }
}

#[must_use]
pub fn outside_shot_probability(offense: &Contender) -> f64 {
    clamp_unit(offense.derived().three_point_tendency)
}

/// Block chance on an inside attempt; a taller defender gets a bonus.
#[must_use]
pub fn block_probability(offense: &Contender, defense: &Contender) -> f64 {
    let height_bonus = signed_diff(defense.height_inches, offense.height_inches).max(0.0)
        * BLOCK_HEIGHT_BONUS_PER_INCH;
    clamp_probability(
        defense.derived().estimated_blocks / BLOCK_DIVISOR + height_bonus,
        0.0,
        BLOCK_PROBABILITY_MAX,
    )
}

fn rating_factor(offense: &Contender, defense: &Contender) -> f64 {
    if defense.defensive_rating <= 0.0 {
        return RATING_FACTOR_MAX;
    }
    let ratio = offense.offensive_rating / defense.defensive_rating;
    clamp_probability(
        RATING_FACTOR_BASE + RATING_FACTOR_SLOPE * ratio,
        RATING_FACTOR_MIN,
        RATING_FACTOR_MAX,
    )
}

fn defensive_impact_factor(defense: &Contender) -> f64 {
    clamp_probability(
        1.0 - defense.derived().defensive_impact * DEFENSIVE_IMPACT_WEIGHT,
        DEFENSIVE_IMPACT_FLOOR,
        1.0,
    )
}

/// Make probability before game-situation adjustments.
#[must_use]
pub fn base_shot_probability(offense: &Contender, defense: &Contender, shot: ShotKind) -> f64 {
    let profile = offense.profile();
    let (base, shape) = match shot {
        ShotKind::Inside => {
            let edge = (signed_diff(offense.height_inches, defense.height_inches)
                * HEIGHT_EDGE_PER_INCH)
                .clamp(-HEIGHT_EDGE_LIMIT, HEIGHT_EDGE_LIMIT);
            (profile.fg_pct_or_default() / 100.0, 1.0 + edge)
        }
        ShotKind::Outside => {
            let tendency = offense.derived().three_point_tendency - LOW_THREE_TENDENCY;
            (
                profile.three_pct_or_default() / 100.0,
                1.0 + tendency.max(0.0) * OUTSIDE_TENDENCY_WEIGHT,
            )
        }
    };
    clamp_probability(
        base * shape * rating_factor(offense, defense) * defensive_impact_factor(defense),
        SHOT_PROBABILITY_MIN,
        SHOT_PROBABILITY_MAX,
    )
}

/// Apply the clutch boost and the accumulated-fatigue penalty.
#[must_use]
pub fn pressure_adjusted_probability(base: f64, offense: &Contender, pressure: Pressure) -> f64 {
    let derived = offense.derived();
    let clutch = if pressure.is_clutch() {
        1.0 + derived.clutch_rating.max(0.0) * CLUTCH_WEIGHT
    } else {
        1.0
    };
    let fatigue = if derived.stamina > 0.0 {
        clamp_probability(
            1.0 - pressure.offense_fatigue.max(0.0) * FATIGUE_WEIGHT / derived.stamina,
            FATIGUE_FACTOR_FLOOR,
            1.0,
        )
    } else {
        FATIGUE_FACTOR_FLOOR
    };
    clamp_probability(
        base * clutch * fatigue,
        SHOT_PROBABILITY_MIN,
        SHOT_PROBABILITY_MAX,
    )
}

/// Chance the shooter recovers their own miss. Long misses favour the defender.
#[must_use]
pub fn offensive_rebound_probability(
    offense: &Contender,
    defense: &Contender,
    shot: ShotKind,
) -> f64 {
    let defense_weight = match shot {
        ShotKind::Inside => INSIDE_MISS_DEFENSE_WEIGHT,
        ShotKind::Outside => OUTSIDE_MISS_DEFENSE_WEIGHT,
    };
    let base = share(
        offense.derived().offensive_rebounds.max(0.0),
        defense.derived().defensive_rebounds.max(0.0) * defense_weight,
        0.5,
    );
    let height = signed_diff(offense.height_inches, defense.height_inches) * REBOUND_HEIGHT_PER_INCH;
    clamp_probability(base + height, REBOUND_PROBABILITY_MIN, REBOUND_PROBABILITY_MAX)
}

/// Bernoulli draw against an already-clamped probability.
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.r#gen::<f64>() < clamp_unit(probability)
}
