//! One possession-resolution step.
//!
//! The phase borrows only the slices of match state it owns; contenders and
//! config stay immutable for the whole match.
use log::debug;
use rand::Rng;

use super::contender::Contender;
use super::event::{EventKind, MatchEvent};
use super::odds::{
    Pressure, ShotKind, base_shot_probability, block_probability, offensive_rebound_probability,
    outside_shot_probability, pressure_adjusted_probability, roll, turnover_odds,
};
use super::state::{MatchState, Outcome, PerSlot, Slot};
use super::{MatchConfig, PossessionRule};
use crate::constants::{
    BLOCK_RECOVERY_CHANCE, DEFENSE_FATIGUE_PER_POSSESSION, OFFENSE_FATIGUE_PER_POSSESSION,
    WIN_MARGIN,
};
use crate::narration;

pub(super) struct PossessionPhase<'a, P: ?Sized, N: ?Sized> {
    contenders: &'a PerSlot<Contender>,
    config: &'a MatchConfig,
    state: &'a mut MatchState,
    play: &'a mut P,
    narration: &'a mut N,
}

impl<'a, P: Rng + ?Sized, N: Rng + ?Sized> PossessionPhase<'a, P, N> {
    pub(super) const fn new(
        contenders: &'a PerSlot<Contender>,
        config: &'a MatchConfig,
        state: &'a mut MatchState,
        play: &'a mut P,
        narration: &'a mut N,
    ) -> Self {
        Self {
            contenders,
            config,
            state,
            play,
            narration,
        }
    }

    pub(super) fn run(&mut self) {
        let offense_slot = self.state.possession;
        let contenders = self.contenders;
        let offense = &contenders[offense_slot];
        let defense = &contenders[offense_slot.other()];

        self.record(
            MatchEvent::new(
                EventKind::CheckBall,
                narration::check_ball(offense.name()),
                self.state.possession_count,
            )
            .by(offense_slot),
        );
        self.state
            .add_fatigue(offense_slot, OFFENSE_FATIGUE_PER_POSSESSION);
        self.state
            .add_fatigue(offense_slot.other(), DEFENSE_FATIGUE_PER_POSSESSION);

        if self.turnover(offense_slot, offense, defense) {
            return;
        }
        let shot = if roll(&mut *self.play, outside_shot_probability(offense)) {
            ShotKind::Outside
        } else {
            ShotKind::Inside
        };
        if shot == ShotKind::Inside && self.block(offense_slot, offense, defense) {
            return;
        }
        self.attempt(offense_slot, offense, defense, shot);
    }

    fn record(&mut self, event: MatchEvent) {
        debug!(
            "possession {} {:?}: {}",
            event.possession, event.kind, event.text
        );
        self.state.push(event);
    }

    fn turnover(&mut self, slot: Slot, offense: &Contender, defense: &Contender) -> bool {
        let odds = turnover_odds(offense, defense);
        if !roll(&mut *self.play, odds.probability) {
            return false;
        }
        let steal = roll(&mut *self.play, odds.steal_share);
        let text = narration::turnover(&mut *self.narration, offense.name(), defense.name(), steal);
        let actor = if steal { slot.other() } else { slot };
        self.record(
            MatchEvent::new(EventKind::Turnover, text, self.state.possession_count).by(actor),
        );
        self.state.flip_possession();
        true
    }

    fn block(&mut self, slot: Slot, offense: &Contender, defense: &Contender) -> bool {
        if !roll(&mut *self.play, block_probability(offense, defense)) {
            return false;
        }
        let defense_recovers = roll(&mut *self.play, BLOCK_RECOVERY_CHANCE);
        let recovered_by = if defense_recovers {
            defense.name()
        } else {
            offense.name()
        };
        let text = narration::block(
            &mut *self.narration,
            offense.name(),
            defense.name(),
            ShotKind::Inside,
            recovered_by,
        );
        self.record(
            MatchEvent::new(EventKind::Block, text, self.state.possession_count).by(slot.other()),
        );
        if defense_recovers {
            self.state.flip_possession();
        }
        true
    }

    fn attempt(&mut self, slot: Slot, offense: &Contender, defense: &Contender, shot: ShotKind) {
        let pressure = Pressure {
            offense_score: self.state.score[slot],
            defense_score: self.state.score[slot.other()],
            target_score: self.config.target_score,
            offense_fatigue: self.state.fatigue[slot],
        };
        let probability = pressure_adjusted_probability(
            base_shot_probability(offense, defense, shot),
            offense,
            pressure,
        );
        let made = roll(&mut *self.play, probability);
        let mut text = narration::shot(
            &mut *self.narration,
            offense.name(),
            defense.name(),
            shot,
            made,
        );
        let possession = self.state.possession_count;

        if made {
            let points = shot.points();
            self.state.score[slot] += points;
            let score = self.state.score;
            text.push(' ');
            text.push_str(&narration::score_line(self.names(), score));
            self.record(
                MatchEvent::new(EventKind::ShotMade, text, possession)
                    .by(slot)
                    .scoring(points, score),
            );
            if self.has_won(slot) {
                self.state.conclude(Outcome::Win(slot));
            } else if self.config.rule == PossessionRule::Alternating {
                self.state.flip_possession();
            }
            return;
        }

        self.record(MatchEvent::new(EventKind::ShotMissed, text, possession).by(slot));
        let offensive = roll(
            &mut *self.play,
            offensive_rebound_probability(offense, defense, shot),
        );
        let rebounder = if offensive { slot } else { slot.other() };
        let text = narration::rebound(
            &mut *self.narration,
            self.contenders[rebounder].name(),
            offensive,
        );
        self.record(MatchEvent::new(EventKind::Rebound, text, possession).by(rebounder));
        self.state.possession = rebounder;
    }

    fn has_won(&self, slot: Slot) -> bool {
        let own = self.state.score[slot];
        let other = self.state.score[slot.other()];
        own >= self.config.target_score && own.saturating_sub(other) >= WIN_MARGIN
    }

    fn names(&self) -> PerSlot<&'a str> {
        let contenders = self.contenders;
        PerSlot::new(contenders.first.name(), contenders.second.name())
    }
}
