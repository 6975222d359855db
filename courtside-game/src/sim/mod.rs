//! Game Simulator: turns two profiles into a seeded play-by-play match.
//!
//! A [`Simulator`] is single-shot. It enhances both profiles at construction,
//! plays exactly one match on [`Simulator::run`] and refuses to run again.
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod contender;
mod event;
mod odds;
mod possession;
mod state;

pub use contender::Contender;
pub use event::{EventKind, MatchEvent};
pub use odds::{
    Pressure, ShotKind, TurnoverOdds, base_shot_probability, block_probability,
    offensive_rebound_probability, outside_shot_probability, pressure_adjusted_probability,
    turnover_odds,
};
pub use state::{MatchPhase, MatchState, Outcome, PerSlot, Slot};

use crate::constants::{DEFAULT_TARGET_SCORE, POSSESSION_CAP};
use crate::narration;
use crate::player::{HeightParseError, PlayerProfile};
use crate::seed::RngBundle;
use possession::PossessionPhase;

/// Who gets the ball after a made basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionRule {
    /// The scorer keeps the ball.
    #[default]
    MakeItTakeIt,
    Alternating,
}

impl PossessionRule {
    #[must_use]
    pub const fn from_make_it_take_it(enabled: bool) -> Self {
        if enabled {
            Self::MakeItTakeIt
        } else {
            Self::Alternating
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MakeItTakeIt => "make it, take it",
            Self::Alternating => "alternating possession",
        }
    }
}

const fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

/// Immutable rules for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default)]
    pub rule: PossessionRule,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            rule: PossessionRule::default(),
        }
    }
}

impl MatchConfig {
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTargetScore`] for a zero target.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.target_score == 0 {
            return Err(SimError::InvalidTargetScore);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid height for {player}: {source}")]
    InvalidHeightFormat {
        player: String,
        #[source]
        source: HeightParseError,
    },
    #[error("target score must be a positive integer")]
    InvalidTargetScore,
    #[error("match already played; build a new simulator to replay")]
    AlreadyPlayed,
}

/// Everything a caller needs after a match: log, score, outcome and the
/// contenders the numbers were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player1: Contender,
    pub player2: Contender,
    pub config: MatchConfig,
    pub events: Vec<MatchEvent>,
    pub final_score: PerSlot<u32>,
    pub winner: Option<String>,
    pub winner_slot: Option<Slot>,
    pub outcome: Outcome,
    pub possessions: u32,
    #[serde(default)]
    pub commentary: Option<String>,
}

impl MatchResult {
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        matches!(self.outcome, Outcome::Draw)
    }

    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.final_score.first.abs_diff(self.final_score.second)
    }

    #[must_use]
    pub fn conclusion(&self) -> Option<&MatchEvent> {
        self.events
            .last()
            .filter(|event| event.kind == EventKind::Conclusion)
    }

    #[must_use]
    pub const fn contender(&self, slot: Slot) -> &Contender {
        match slot {
            Slot::First => &self.player1,
            Slot::Second => &self.player2,
        }
    }
}

fn contender_for(profile: &PlayerProfile) -> Result<Contender, SimError> {
    Contender::from_profile(profile).map_err(|source| SimError::InvalidHeightFormat {
        player: profile.name.clone(),
        source,
    })
}

fn names(contenders: &PerSlot<Contender>) -> PerSlot<&str> {
    PerSlot::new(contenders.first.name(), contenders.second.name())
}

#[derive(Debug, Clone)]
pub struct Simulator {
    contenders: PerSlot<Contender>,
    config: MatchConfig,
    phase: MatchPhase,
}

impl Simulator {
    /// Enhance both profiles and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidHeightFormat`] when either height cannot be
    /// parsed and [`SimError::InvalidTargetScore`] for a zero target.
    pub fn new(
        player1: &PlayerProfile,
        player2: &PlayerProfile,
        config: MatchConfig,
    ) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            contenders: PerSlot::new(contender_for(player1)?, contender_for(player2)?),
            config,
            phase: MatchPhase::NotStarted,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn contender(&self, slot: Slot) -> &Contender {
        &self.contenders[slot]
    }

    /// Play the match to a win or the possession cap.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AlreadyPlayed`] if this simulator has already run.
    pub fn run(&mut self, rngs: &mut RngBundle) -> Result<MatchResult, SimError> {
        if self.phase != MatchPhase::NotStarted {
            return Err(SimError::AlreadyPlayed);
        }
        self.phase = MatchPhase::InProgress;

        let (play, narration_rng) = rngs.split();
        let first_possession = if play.gen_bool(0.5) {
            Slot::First
        } else {
            Slot::Second
        };
        let names = names(&self.contenders);
        info!(
            "match start: {} vs {} (target {}, {})",
            names.first,
            names.second,
            self.config.target_score,
            self.config.rule.label()
        );

        let mut state = MatchState::new(first_possession);
        state.push(MatchEvent::new(
            EventKind::Intro,
            narration::intro(
                names,
                self.config.target_score,
                self.config.rule,
                names[first_possession],
            ),
            0,
        ));

        while !state.is_over() && state.possession_count < POSSESSION_CAP {
            state.possession_count += 1;
            PossessionPhase::new(
                &self.contenders,
                &self.config,
                &mut state,
                &mut *play,
                &mut *narration_rng,
            )
            .run();
        }

        let outcome = state.outcome().unwrap_or(Outcome::Draw);
        state.conclude(outcome);
        let conclusion = match outcome {
            Outcome::Win(slot) => {
                narration::conclusion(names[slot], state.score[slot], state.score[slot.other()])
            }
            Outcome::Draw => narration::draw_conclusion(state.possession_count, names, state.score),
        };
        let mut closing = MatchEvent::new(EventKind::Conclusion, conclusion, state.possession_count);
        if let Some(slot) = outcome.winner() {
            closing = closing.by(slot);
        }
        state.push(closing);

        info!(
            "match finished after {} possessions: {} {} - {} {} ({} play draws, {} narration draws)",
            state.possession_count,
            names.first,
            state.score.first,
            names.second,
            state.score.second,
            rngs.play_draws(),
            rngs.narration_draws()
        );
        let winner = outcome.winner().map(|slot| names[slot].to_string());
        self.phase = MatchPhase::Finished(outcome);

        Ok(MatchResult {
            player1: self.contenders.first.clone(),
            player2: self.contenders.second.clone(),
            config: self.config,
            final_score: state.score,
            winner,
            winner_slot: outcome.winner(),
            outcome,
            possessions: state.possession_count,
            events: state.events,
            commentary: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Position;

    fn profile(name: &str) -> PlayerProfile {
        let mut profile = PlayerProfile::named(name).with_position(Position::SmallForward);
        profile.fg_pct = Some(50.0);
        profile.three_pct = Some(35.0);
        profile.rebounds = Some(5.0);
        profile
    }

    fn play(config: MatchConfig, seed: u64) -> MatchResult {
        let mut sim = Simulator::new(&profile("A"), &profile("B"), config).unwrap();
        sim.run(&mut RngBundle::from_user_seed(seed)).unwrap()
    }

    #[test]
    fn phase_moves_to_finished_and_refuses_rerun() {
        let mut sim = Simulator::new(&profile("A"), &profile("B"), MatchConfig::default()).unwrap();
        assert_eq!(sim.phase(), MatchPhase::NotStarted);
        let result = sim.run(&mut RngBundle::from_user_seed(5)).unwrap();
        assert_eq!(sim.phase(), MatchPhase::Finished(result.outcome));
        assert!(sim.phase().is_terminal());
        assert!(matches!(
            sim.run(&mut RngBundle::from_user_seed(5)),
            Err(SimError::AlreadyPlayed)
        ));
    }

    #[test]
    fn zero_target_is_rejected() {
        let config = MatchConfig {
            target_score: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            Simulator::new(&profile("A"), &profile("B"), config),
            Err(SimError::InvalidTargetScore)
        ));
    }

    #[test]
    fn bad_height_names_the_player() {
        let mut tall = profile("Tall");
        tall.height = Some("seven feet".to_string());
        let err = Simulator::new(&profile("A"), &tall, MatchConfig::default()).unwrap_err();
        match err {
            SimError::InvalidHeightFormat { player, .. } => assert_eq!(player, "Tall"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn make_it_take_it_keeps_the_ball_after_a_score() {
        for seed in 0..20 {
            let result = play(MatchConfig::default(), seed);
            for pair in result.events.windows(2) {
                if pair[0].kind == EventKind::ShotMade && pair[1].kind == EventKind::CheckBall {
                    assert_eq!(pair[0].actor, pair[1].actor);
                }
            }
        }
    }

    #[test]
    fn alternating_hands_the_ball_over_after_a_score() {
        let config = MatchConfig {
            rule: PossessionRule::Alternating,
            ..MatchConfig::default()
        };
        for seed in 0..20 {
            let result = play(config, seed);
            for pair in result.events.windows(2) {
                if pair[0].kind == EventKind::ShotMade && pair[1].kind == EventKind::CheckBall {
                    assert_ne!(pair[0].actor, pair[1].actor);
                }
            }
        }
    }

    #[test]
    fn misses_are_followed_by_a_rebound() {
        let result = play(MatchConfig::default(), 11);
        for pair in result.events.windows(2) {
            if pair[0].kind == EventKind::ShotMissed {
                assert_eq!(pair[1].kind, EventKind::Rebound);
            }
        }
    }

    #[test]
    fn tiny_target_still_needs_two_point_margin() {
        let config = MatchConfig {
            target_score: 1,
            ..MatchConfig::default()
        };
        for seed in 0..30 {
            let result = play(config, seed);
            if let Some(slot) = result.winner_slot {
                assert!(result.final_score[slot] >= 1);
                assert!(result.margin() >= 2);
            }
        }
    }
}
