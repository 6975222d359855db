//! Entry point used by every outer surface: one call per match.
use serde::{Deserialize, Serialize};

use crate::commentary::NarrativeBoundary;
use crate::constants::DEFAULT_TARGET_SCORE;
use crate::player::PlayerProfile;
use crate::roster::{PlayerRepository, RosterError};
use crate::seed::RngBundle;
use crate::sim::{MatchConfig, MatchResult, PossessionRule, SimError, Simulator};

/// Caller-facing match options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub target_score: u32,
    pub make_it_take_it: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            make_it_take_it: true,
        }
    }
}

impl From<MatchSettings> for MatchConfig {
    fn from(settings: MatchSettings) -> Self {
        Self {
            target_score: settings.target_score,
            rule: PossessionRule::from_make_it_take_it(settings.make_it_take_it),
        }
    }
}

/// Play one match and optionally attach commentary.
///
/// `commentary` is `None` when no boundary is supplied; with a boundary it is
/// always present, falling back to local text if the enhancer fails.
///
/// # Errors
///
/// Propagates [`SimError`] from simulator construction.
pub fn simulate(
    player1: &PlayerProfile,
    player2: &PlayerProfile,
    settings: &MatchSettings,
    rngs: &mut RngBundle,
    narrative: Option<&NarrativeBoundary>,
) -> Result<MatchResult, SimError> {
    let mut simulator = Simulator::new(player1, player2, MatchConfig::from(*settings))?;
    let mut result = simulator.run(rngs)?;
    result.commentary = narrative.map(|boundary| boundary.commentary(&result));
    Ok(result)
}

/// Resolve both ids before anything is simulated.
///
/// # Errors
///
/// Returns [`RosterError::PlayerNotFound`] for either unknown id.
pub fn lookup_pair<'a, R: PlayerRepository + ?Sized>(
    repository: &'a R,
    first: &str,
    second: &str,
) -> Result<(&'a PlayerProfile, &'a PlayerProfile), RosterError> {
    Ok((repository.player(first)?, repository.player(second)?))
}
