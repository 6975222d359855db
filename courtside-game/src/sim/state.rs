//! Match-scoped state, keyed by participant slot rather than display name.
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::event::MatchEvent;

/// Which side of the matchup a participant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// One value per participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerSlot<T> {
    pub first: T,
    pub second: T,
}

impl<T> PerSlot<T> {
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }
}

impl<T> Index<Slot> for PerSlot<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &T {
        match slot {
            Slot::First => &self.first,
            Slot::Second => &self.second,
        }
    }
}

impl<T> IndexMut<Slot> for PerSlot<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result", content = "slot")]
pub enum Outcome {
    Win(Slot),
    /// Possession cap reached without a winner.
    Draw,
}

impl Outcome {
    #[must_use]
    pub const fn winner(self) -> Option<Slot> {
        match self {
            Self::Win(slot) => Some(slot),
            Self::Draw => None,
        }
    }
}

/// Lifecycle of a simulator. Terminal phases never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    NotStarted,
    InProgress,
    Finished(Outcome),
}

impl MatchPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Mutable state owned by a single `run()` call.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub score: PerSlot<u32>,
    pub possession: Slot,
    pub fatigue: PerSlot<f64>,
    pub events: Vec<MatchEvent>,
    pub possession_count: u32,
    outcome: Option<Outcome>,
}

impl MatchState {
    #[must_use]
    pub fn new(first_possession: Slot) -> Self {
        Self {
            score: PerSlot::default(),
            possession: first_possession,
            fatigue: PerSlot::default(),
            events: Vec::new(),
            possession_count: 0,
            outcome: None,
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record the terminal outcome. Later calls are ignored so the first
    /// decision stands.
    pub fn conclude(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    pub fn flip_possession(&mut self) {
        self.possession = self.possession.other();
    }

    /// Fatigue only ever accumulates.
    pub fn add_fatigue(&mut self, slot: Slot, amount: f64) {
        self.fatigue[slot] += amount.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_index_their_own_values() {
        let mut values = PerSlot::new(1, 2);
        values[Slot::Second] += 5;
        assert_eq!(values[Slot::First], 1);
        assert_eq!(values[Slot::Second], 7);
        assert_eq!(Slot::First.other(), Slot::Second);
    }

    #[test]
    fn outcome_is_set_once() {
        let mut state = MatchState::new(Slot::First);
        state.conclude(Outcome::Win(Slot::Second));
        state.conclude(Outcome::Draw);
        assert_eq!(state.outcome(), Some(Outcome::Win(Slot::Second)));
    }

    #[test]
    fn fatigue_never_decreases() {
        let mut state = MatchState::new(Slot::First);
        state.add_fatigue(Slot::First, 0.5);
        state.add_fatigue(Slot::First, -3.0);
        assert!((state.fatigue[Slot::First] - 0.5).abs() < f64::EPSILON);
    }
}
