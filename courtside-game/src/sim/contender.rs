use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FG_PCT, DEFAULT_POINTS, DEFAULT_REBOUNDS, DEFAULT_THREE_PCT,
    DEFENSIVE_RATING_HEIGHT_NORM, DEFENSIVE_RATING_HEIGHT_SCALE, DEFENSIVE_RATING_REBOUND_WEIGHT,
    OFFENSIVE_RATING_FG_WEIGHT, OFFENSIVE_RATING_POINTS_WEIGHT, OFFENSIVE_RATING_THREE_WEIGHT,
};
use crate::enhance::{DerivedAttributes, EnhancedProfile, enhance};
use crate::player::{HeightParseError, PlayerProfile};

/// Enhanced profile plus the court attributes the simulator derives itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contender {
    #[serde(flatten)]
    pub enhanced: EnhancedProfile,
    pub height_inches: u32,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
}

impl Contender {
    /// Enhance `profile` and resolve its height.
    ///
    /// # Errors
    ///
    /// Returns [`HeightParseError`] when the profile carries a malformed height.
    pub fn from_profile(profile: &PlayerProfile) -> Result<Self, HeightParseError> {
        let height_inches = profile.height_inches()?;
        Ok(Self::with_height(enhance(profile), height_inches))
    }

    #[must_use]
    pub fn with_height(enhanced: EnhancedProfile, height_inches: u32) -> Self {
        let raw = &enhanced.profile;
        let offensive_rating = raw.points.unwrap_or(DEFAULT_POINTS) * OFFENSIVE_RATING_POINTS_WEIGHT
            + raw.fg_pct.unwrap_or(DEFAULT_FG_PCT) * OFFENSIVE_RATING_FG_WEIGHT
            + raw.three_pct.unwrap_or(DEFAULT_THREE_PCT) * OFFENSIVE_RATING_THREE_WEIGHT;
        let defensive_rating = raw.rebounds_or(DEFAULT_REBOUNDS) * DEFENSIVE_RATING_REBOUND_WEIGHT
            + f64::from(height_inches) / DEFENSIVE_RATING_HEIGHT_NORM
                * DEFENSIVE_RATING_HEIGHT_SCALE;
        Self {
            enhanced,
            height_inches,
            offensive_rating,
            defensive_rating,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.enhanced.name()
    }

    #[must_use]
    pub const fn derived(&self) -> &DerivedAttributes {
        &self.enhanced.derived
    }

    #[must_use]
    pub const fn profile(&self) -> &PlayerProfile {
        &self.enhanced.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_use_defaults_and_height() {
        let contender = Contender::from_profile(&PlayerProfile::named("Default")).unwrap();
        assert_eq!(contender.height_inches, 72);
        assert!((contender.offensive_rating - (4.0 + 13.5 + 9.9)).abs() < 1e-9);
        assert!((contender.defensive_rating - (2.5 + 72.0 / 84.0 * 50.0)).abs() < 1e-9);
    }

    #[test]
    fn malformed_height_is_rejected() {
        let mut profile = PlayerProfile::named("Typo");
        profile.height = Some("six foot one".to_string());
        assert!(Contender::from_profile(&profile).is_err());
    }
}
