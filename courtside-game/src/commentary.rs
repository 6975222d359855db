//! Narrative enhancement boundary.
//!
//! An external text generator may rewrite the play-by-play as broadcast prose.
//! Whatever it does (fail, hang, panic, return nothing) the caller gets text
//! back: [`NarrativeBoundary`] degrades to [`fallback_commentary`].
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{
    Contender, EventKind, MatchConfig, MatchEvent, MatchResult, PerSlot, PossessionRule,
};

/// Default wait for the external generator.
pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(20);

/// Owned snapshot of a finished match, safe to move to another thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeBrief {
    pub player1: Contender,
    pub player2: Contender,
    pub config: MatchConfig,
    pub events: Vec<String>,
    pub final_score: PerSlot<u32>,
    pub winner: Option<String>,
}

impl NarrativeBrief {
    #[must_use]
    pub fn from_result(result: &MatchResult) -> Self {
        Self {
            player1: result.player1.clone(),
            player2: result.player2.clone(),
            config: result.config,
            events: result.events.iter().map(|event| event.text.clone()).collect(),
            final_score: result.final_score,
            winner: result.winner.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative enhancer is not configured")]
    NotConfigured,
    #[error("narrative request failed: {0}")]
    Request(String),
    #[error("narrative enhancer returned no text")]
    EmptyResponse,
    #[error("narrative enhancer timed out after {0:?}")]
    Timeout(Duration),
    #[error("narrative enhancer panicked")]
    Panicked,
}

/// External prose generator. Implementations may block; the boundary bounds
/// how long anyone waits for them.
pub trait NarrativeEnhancer: Send + Sync {
    /// Produce commentary for a finished match.
    ///
    /// # Errors
    ///
    /// Any [`NarrativeError`]; callers never see it past the boundary.
    fn narrate(&self, brief: &NarrativeBrief) -> Result<String, NarrativeError>;
}

/// Broadcaster prompt for a text-generation model.
#[must_use]
pub fn build_prompt(brief: &NarrativeBrief) -> String {
    let player1 = serde_json::to_string_pretty(&brief.player1).unwrap_or_default();
    let player2 = serde_json::to_string_pretty(&brief.player2).unwrap_or_default();
    let events = serde_json::to_string_pretty(&brief.events).unwrap_or_default();
    let rule = match brief.config.rule {
        PossessionRule::MakeItTakeIt => "Make it, take it: the scorer keeps possession",
        PossessionRule::Alternating => "Possession alternates after made baskets",
    };

    let mut prompt = String::from(
        "You are a basketball commentator calling a 1-on-1 game play by play.\n\n",
    );
    let _ = writeln!(prompt, "Player 1: {player1}\n");
    let _ = writeln!(prompt, "Player 2: {player2}\n");
    prompt.push_str("Rules:\n");
    let _ = writeln!(
        prompt,
        "- First to {} points wins, and the winner must lead by 2",
        brief.config.target_score
    );
    prompt.push_str("- Inside shots are worth 1 point\n");
    prompt.push_str("- Outside shots are worth 2 points\n");
    let _ = writeln!(prompt, "- {rule}\n");
    let _ = writeln!(prompt, "Game log:\n{events}\n");
    prompt.push_str(
        "Write an energetic broadcast of this game: an introduction, the play-by-play with \
         the key moments and each player's strengths and weaknesses, and a conclusion with \
         the final result.",
    );
    prompt
}

/// Readable commentary straight from the event log. The conclusion is set
/// apart so it reads as the headline.
#[must_use]
pub fn fallback_commentary(events: &[MatchEvent]) -> String {
    let mut text = String::new();
    for event in events {
        if !text.is_empty() {
            text.push('\n');
        }
        if event.kind == EventKind::Conclusion {
            text.push_str("\nFINAL: ");
        }
        text.push_str(&event.text);
    }
    text
}

/// Runs an enhancer with a deadline and no retries.
///
/// Every call spawns its own worker thread. A worker that misses the deadline
/// is detached, never joined, and lives until the enhancer returns, so a
/// boundary attached to many matches at once can hold one stuck thread per
/// timed-out call. Give slow enhancers a client-level timeout no longer than
/// the boundary's.
#[derive(Clone)]
pub struct NarrativeBoundary {
    enhancer: Arc<dyn NarrativeEnhancer>,
    timeout: Duration,
}

impl std::fmt::Debug for NarrativeBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeBoundary")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl NarrativeBoundary {
    #[must_use]
    pub fn new(enhancer: Arc<dyn NarrativeEnhancer>, timeout: Duration) -> Self {
        Self { enhancer, timeout }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Enhanced commentary, or the fallback if the enhancer does not deliver
    /// usable text in time.
    #[must_use]
    pub fn commentary(&self, result: &MatchResult) -> String {
        match self.try_narrate(NarrativeBrief::from_result(result)) {
            Ok(text) => text,
            Err(err) => {
                warn!("narrative enhancement unavailable, using local commentary: {err}");
                fallback_commentary(&result.events)
            }
        }
    }

    /// Run the enhancer on a detached worker. A worker that outlives the
    /// deadline is abandoned; its eventual answer is dropped.
    ///
    /// # Errors
    ///
    /// Returns the enhancer's own error, [`NarrativeError::Timeout`],
    /// [`NarrativeError::EmptyResponse`] or [`NarrativeError::Panicked`].
    pub fn try_narrate(&self, brief: NarrativeBrief) -> Result<String, NarrativeError> {
        let (tx, rx) = mpsc::channel();
        let enhancer = Arc::clone(&self.enhancer);
        thread::Builder::new()
            .name("narrative-enhancer".to_string())
            .spawn(move || {
                let _ = tx.send(enhancer.narrate(&brief));
            })
            .map_err(|err| NarrativeError::Request(err.to_string()))?;

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(NarrativeError::EmptyResponse);
                }
                debug!("narrative enhancer returned {} bytes", text.len());
                Ok(text.to_string())
            }
            Ok(Err(err)) => Err(err),
            Err(RecvTimeoutError::Timeout) => Err(NarrativeError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(NarrativeError::Panicked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerProfile;
    use crate::seed::RngBundle;
    use crate::sim::Simulator;

    struct Fixed(&'static str);

    impl NarrativeEnhancer for Fixed {
        fn narrate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
            Ok(self.0.to_string())
        }
    }

    struct Slow;

    impl NarrativeEnhancer for Slow {
        fn narrate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
            thread::sleep(Duration::from_millis(500));
            Ok("too late".to_string())
        }
    }

    struct Explodes;

    impl NarrativeEnhancer for Explodes {
        fn narrate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
            panic!("generator crashed");
        }
    }

    fn result() -> MatchResult {
        let mut sim = Simulator::new(
            &PlayerProfile::named("A"),
            &PlayerProfile::named("B"),
            MatchConfig::default(),
        )
        .unwrap();
        sim.run(&mut RngBundle::from_user_seed(21)).unwrap()
    }

    #[test]
    fn fallback_emphasises_conclusion() {
        let result = result();
        let text = fallback_commentary(&result.events);
        assert!(text.starts_with("Welcome to this 1v1 showdown"));
        let conclusion = result.conclusion().unwrap();
        assert!(text.ends_with(&format!("FINAL: {}", conclusion.text)));
    }

    #[test]
    fn prompt_carries_rules_and_log() {
        let result = result();
        let prompt = build_prompt(&NarrativeBrief::from_result(&result));
        assert!(prompt.contains("First to 11 points"));
        assert!(prompt.contains("Make it, take it"));
        assert!(prompt.contains("checks the ball"));
        assert!(prompt.contains("three_point_tendency"));
    }

    #[test]
    fn successful_enhancer_text_is_trimmed() {
        let boundary = NarrativeBoundary::new(Arc::new(Fixed("  Tip-off!  ")), Duration::from_secs(5));
        assert_eq!(boundary.commentary(&result()), "Tip-off!");
    }

    #[test]
    fn blank_text_falls_back() {
        let boundary = NarrativeBoundary::new(Arc::new(Fixed("   ")), Duration::from_secs(5));
        let result = result();
        assert_eq!(boundary.commentary(&result), fallback_commentary(&result.events));
    }

    #[test]
    fn slow_enhancer_times_out() {
        let boundary = NarrativeBoundary::new(Arc::new(Slow), Duration::from_millis(20));
        let err = boundary
            .try_narrate(NarrativeBrief::from_result(&result()))
            .unwrap_err();
        assert!(matches!(err, NarrativeError::Timeout(_)));
    }

    #[test]
    fn timed_out_workers_are_left_behind() {
        let boundary = NarrativeBoundary::new(Arc::new(Slow), Duration::from_millis(20));
        let result = result();
        let started = std::time::Instant::now();
        for _ in 0..3 {
            assert_eq!(boundary.commentary(&result), fallback_commentary(&result.events));
        }
        assert!(started.elapsed() < Duration::from_millis(450));
    }

    #[test]
    fn panicking_enhancer_is_contained() {
        let boundary = NarrativeBoundary::new(Arc::new(Explodes), Duration::from_secs(5));
        let err = boundary
            .try_narrate(NarrativeBrief::from_result(&result()))
            .unwrap_err();
        assert!(matches!(err, NarrativeError::Panicked));
    }
}
