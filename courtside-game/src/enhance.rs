//! Attribute enhancer: derives secondary attributes from a raw profile.
//!
//! The derivation is pure and never touches height; height conversion happens
//! when the simulator builds its contenders.
use serde::{Deserialize, Serialize};

use crate::constants::{
    BIG_BASE_BLOCKS, BIG_OFFENSIVE_SHARE, BIG_STEALS, DEFAULT_GUARD_REBOUNDS, DEFAULT_REBOUNDS,
    DEFAULT_WING_REBOUNDS, GUARD_BASE_STEALS, GUARD_BLOCKS, GUARD_OFFENSIVE_SHARE,
    HIGH_THREE_TENDENCY, LOW_THREE_TENDENCY, MID_THREE_TENDENCY, USAGE_RATE_CAP,
    WING_BLOCKS, WING_OFFENSIVE_SHARE, WING_STEALS,
};
use crate::player::{PlayerProfile, PositionGroup};

/// Attributes computed once per match and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedAttributes {
    pub scoring_efficiency: f64,
    pub usage_rate: f64,
    pub estimated_steals: f64,
    pub estimated_blocks: f64,
    pub offensive_rebounds: f64,
    pub defensive_rebounds: f64,
    pub stamina: f64,
    pub clutch_rating: f64,
    pub three_point_tendency: f64,
    pub defensive_impact: f64,
}

/// Raw profile paired with its derived attributes; serializes flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedProfile {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    #[serde(flatten)]
    pub derived: DerivedAttributes,
}

impl EnhancedProfile {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

struct PositionEstimates {
    steals: f64,
    blocks: f64,
    offensive_rebounds: f64,
    defensive_rebounds: f64,
}

fn position_estimates(profile: &PlayerProfile) -> PositionEstimates {
    match profile.position_group() {
        PositionGroup::Big => {
            let rebounds = profile.rebounds_or(DEFAULT_REBOUNDS);
            PositionEstimates {
                steals: BIG_STEALS,
                blocks: BIG_BASE_BLOCKS + rebounds * 0.1,
                offensive_rebounds: rebounds * BIG_OFFENSIVE_SHARE,
                defensive_rebounds: rebounds * (1.0 - BIG_OFFENSIVE_SHARE),
            }
        }
        PositionGroup::Guard => {
            let rebounds = profile.rebounds_or(DEFAULT_GUARD_REBOUNDS);
            PositionEstimates {
                steals: GUARD_BASE_STEALS + profile.assists_or_default() * 0.1,
                blocks: GUARD_BLOCKS,
                offensive_rebounds: rebounds * GUARD_OFFENSIVE_SHARE,
                defensive_rebounds: rebounds * (1.0 - GUARD_OFFENSIVE_SHARE),
            }
        }
        PositionGroup::Wing => {
            let rebounds = profile.rebounds_or(DEFAULT_WING_REBOUNDS);
            PositionEstimates {
                steals: WING_STEALS,
                blocks: WING_BLOCKS,
                offensive_rebounds: rebounds * WING_OFFENSIVE_SHARE,
                defensive_rebounds: rebounds * (1.0 - WING_OFFENSIVE_SHARE),
            }
        }
    }
}

/// Share of shots taken from outside, keyed on how close 3P% sits to FG%.
#[must_use]
pub fn three_point_tendency(fg_pct: f64, three_pct: f64) -> f64 {
    let gap = fg_pct - three_pct;
    if gap < 8.0 {
        HIGH_THREE_TENDENCY
    } else if gap < 15.0 {
        MID_THREE_TENDENCY
    } else {
        LOW_THREE_TENDENCY
    }
}

/// Derive every secondary attribute for `profile`. Deterministic and
/// side-effect free; the input is cloned into the result.
#[must_use]
pub fn enhance(profile: &PlayerProfile) -> EnhancedProfile {
    let fg = profile.fg_pct_or_default();
    let three = profile.three_pct_or_default();
    let ft = profile.ft_pct_or_default();

    let scoring_efficiency = fg * 0.5 + three * 0.3 + ft * 0.2;
    let usage_rate = (profile.points_or_default() * 2.0 + profile.assists_or_default() * 1.5)
        .min(USAGE_RATE_CAP);
    let estimates = position_estimates(profile);
    let stamina = 0.9 + (profile.minutes_or_default() / 40.0) * 0.2;
    let clutch_rating = (ft * 0.6 + profile.ts_pct_or_default() * 0.4) / 100.0;
    let defensive_impact = (profile.rebounds_or(DEFAULT_REBOUNDS) * 0.5
        + estimates.blocks * 2.0
        + estimates.steals * 1.5)
        / 10.0;

    EnhancedProfile {
        profile: profile.clone(),
        derived: DerivedAttributes {
            scoring_efficiency,
            usage_rate,
            estimated_steals: estimates.steals,
            estimated_blocks: estimates.blocks,
            offensive_rebounds: estimates.offensive_rebounds,
            defensive_rebounds: estimates.defensive_rebounds,
            stamina,
            clutch_rating,
            three_point_tendency: three_point_tendency(fg, three),
            defensive_impact,
        },
    }
}
