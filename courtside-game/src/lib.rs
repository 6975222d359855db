//! Courtside Match Engine
//!
//! Platform-agnostic core for stat-driven 1-on-1 basketball matches.
//! This crate derives player attributes, plays seeded possession-by-possession
//! matches and guards the optional narrative enhancer. It performs no I/O.

pub mod commentary;
pub mod constants;
pub mod enhance;
pub mod matchup;
pub mod narration;
pub mod numbers;
pub mod player;
pub mod roster;
pub mod seed;
pub mod sim;

use thiserror::Error;

// Re-export commonly used types
pub use commentary::{
    DEFAULT_NARRATIVE_TIMEOUT, NarrativeBoundary, NarrativeBrief, NarrativeEnhancer,
    NarrativeError, build_prompt, fallback_commentary,
};
pub use enhance::{DerivedAttributes, EnhancedProfile, enhance};
pub use matchup::{MatchSettings, lookup_pair, simulate};
pub use player::{
    HeightParseError, PlayerId, PlayerProfile, Position, PositionCode, PositionGroup,
    parse_height_inches,
};
pub use roster::{PlayerCatalog, PlayerRepository, RosterError};
pub use seed::{CountingRng, RngBundle};
pub use sim::{
    Contender, EventKind, MatchConfig, MatchEvent, MatchPhase, MatchResult, Outcome, PerSlot,
    PossessionRule, SimError, Simulator, Slot,
};

/// Failure of an id-based match request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Match engine bound to a player repository and an optional narrator.
pub struct MatchEngine<R>
where
    R: PlayerRepository,
{
    repository: R,
    narrative: Option<NarrativeBoundary>,
}

impl<R> MatchEngine<R>
where
    R: PlayerRepository,
{
    /// Create an engine without narrative enhancement.
    pub const fn new(repository: R) -> Self {
        Self {
            repository,
            narrative: None,
        }
    }

    /// Attach a narrative boundary used for every subsequent match.
    #[must_use]
    pub fn with_narrative(mut self, boundary: NarrativeBoundary) -> Self {
        self.narrative = Some(boundary);
        self
    }

    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Look up both players and play one match.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Roster`] for an unknown id, before anything is
    /// simulated, and [`EngineError::Sim`] for an unplayable profile.
    pub fn play(
        &self,
        first: &str,
        second: &str,
        settings: &MatchSettings,
        rngs: &mut RngBundle,
    ) -> Result<MatchResult, EngineError> {
        let (player1, player2) = lookup_pair(&self.repository, first, second)?;
        Ok(simulate(
            player1,
            player2,
            settings,
            rngs,
            self.narrative.as_ref(),
        )?)
    }
}
