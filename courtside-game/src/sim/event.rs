use serde::{Deserialize, Serialize};

use super::state::{PerSlot, Slot};

/// Kind of play-by-play entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Intro,
    CheckBall,
    Turnover,
    Block,
    ShotMade,
    ShotMissed,
    Rebound,
    Conclusion,
}

/// Immutable log entry produced by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub kind: EventKind,
    pub text: String,
    /// 1-based possession index; zero for the intro.
    pub possession: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<PerSlot<u32>>,
}

impl MatchEvent {
    #[must_use]
    pub const fn new(kind: EventKind, text: String, possession: u32) -> Self {
        Self {
            kind,
            text,
            possession,
            actor: None,
            points: None,
            score: None,
        }
    }

    #[must_use]
    pub fn by(mut self, actor: Slot) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub fn scoring(mut self, points: u32, score: PerSlot<u32>) -> Self {
        self.points = Some(points);
        self.score = Some(score);
        self
    }
}
