//! Local play-by-play text.
//!
//! Phrase choice only ever draws from the narration stream, so rewording a
//! pool cannot change how a match plays out.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::DEFENSE_MENTION_CHANCE;
use crate::sim::{PerSlot, PossessionRule, ShotKind};

const INSIDE_MOVES: &[&str] = &[
    "drives hard to the rim",
    "spins baseline into the paint",
    "backs down on the block",
    "knifes into the lane",
    "slips a cut to the basket",
    "rises for a layup",
    "floats one up in the lane",
    "drops a hook shot",
];

const OUTSIDE_MOVES: &[&str] = &[
    "pulls up from deep",
    "steps back behind the arc",
    "creates space on the wing",
    "launches from well beyond the line",
    "fires a catch-and-shoot jumper",
    "fades away from the corner",
];

const MAKE_ENDINGS: &[&str] = &[
    "and it drops!",
    "splash!",
    "nothing but net!",
    "count it!",
    "and it rattles home!",
    "bang!",
];

const MISS_ENDINGS: &[&str] = &[
    "but it rims out.",
    "off the back iron.",
    "no good.",
    "short.",
    "it spins in and out!",
];

const REBOUND_LINES: &[&str] = &[
    "{name} comes down with the board.",
    "{name} skies for the rebound.",
    "{name} cleans the glass.",
];

const DEFENSE_CONTEXTS: &[&str] = &[
    "with {defender} draped all over the shooter",
    "over the outstretched arm of {defender}",
    "with {defender} closing hard",
    "against tight coverage from {defender}",
];

const INSIDE_BLOCKS: &[&str] = &[
    "{shooter} goes up strong but {defender} sends it back!",
    "{defender} meets {shooter} at the summit and swats it away!",
    "Rejected! {defender} erases the attempt from {shooter}!",
    "{shooter} challenges the rim and {defender} says no!",
];

const OUTSIDE_BLOCKS: &[&str] = &[
    "{defender} closes out and gets a fingertip on the jumper from {shooter}!",
    "{shooter} rises, but {defender} blocks it from behind!",
    "Great contest! {defender} deflects the shot from {shooter}!",
];

const STEALS: &[&str] = &[
    "{defender} jumps the dribble and strips {shooter}! Turnover!",
    "{shooter} gets careless and {defender} picks the pocket!",
    "{defender} reads the crossover and takes it away from {shooter}!",
];

const UNFORCED_TURNOVERS: &[&str] = &[
    "{shooter} loses the handle out of bounds. Turnover!",
    "{shooter} travels trying to create space.",
    "{shooter} fumbles the ball away without any pressure.",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn fill(template: &str, shooter: &str, defender: &str) -> String {
    template
        .replace("{shooter}", shooter)
        .replace("{defender}", defender)
        .replace("{name}", shooter)
}

#[must_use]
pub fn intro(
    names: PerSlot<&str>,
    target_score: u32,
    rule: PossessionRule,
    starter: &str,
) -> String {
    format!(
        "Welcome to this 1v1 showdown between {} and {}! First to {target_score} points, \
         win by two, and we're playing {} rules. {starter} wins the tip and starts with the ball.",
        names.first,
        names.second,
        rule.label()
    )
}

#[must_use]
pub fn check_ball(name: &str) -> String {
    format!("{name} checks the ball at the top of the key.")
}

pub fn turnover<R: Rng + ?Sized>(rng: &mut R, offense: &str, defense: &str, steal: bool) -> String {
    let pool = if steal { STEALS } else { UNFORCED_TURNOVERS };
    fill(pick(rng, pool), offense, defense)
}

/// Block text plus who ends up with the loose ball.
pub fn block<R: Rng + ?Sized>(
    rng: &mut R,
    offense: &str,
    defense: &str,
    shot: ShotKind,
    recovered_by: &str,
) -> String {
    let pool = match shot {
        ShotKind::Inside => INSIDE_BLOCKS,
        ShotKind::Outside => OUTSIDE_BLOCKS,
    };
    format!(
        "{} {recovered_by} recovers the loose ball.",
        fill(pick(rng, pool), offense, defense)
    )
}

/// Shot description; defensive context is mentioned on most attempts.
pub fn shot<R: Rng + ?Sized>(
    rng: &mut R,
    offense: &str,
    defense: &str,
    shot: ShotKind,
    made: bool,
) -> String {
    let moves = match shot {
        ShotKind::Inside => INSIDE_MOVES,
        ShotKind::Outside => OUTSIDE_MOVES,
    };
    let mut text = format!("{offense} {}", pick(rng, moves));
    if rng.r#gen::<f64>() < DEFENSE_MENTION_CHANCE {
        text.push(' ');
        text.push_str(&pick(rng, DEFENSE_CONTEXTS).replace("{defender}", defense));
    }
    let ending = if made {
        pick(rng, MAKE_ENDINGS)
    } else {
        pick(rng, MISS_ENDINGS)
    };
    text.push_str("... ");
    text.push_str(ending);
    text
}

#[must_use]
pub fn score_line(names: PerSlot<&str>, score: PerSlot<u32>) -> String {
    format!(
        "Score: {} {}, {} {}",
        names.first, score.first, names.second, score.second
    )
}

pub fn rebound<R: Rng + ?Sized>(rng: &mut R, rebounder: &str, offensive: bool) -> String {
    let line = fill(pick(rng, REBOUND_LINES), rebounder, "");
    if offensive {
        format!("Second chance! {line}")
    } else {
        line
    }
}

#[must_use]
pub fn conclusion(winner: &str, winner_points: u32, loser_points: u32) -> String {
    format!("Game over! {winner} wins {winner_points} to {loser_points}!")
}

#[must_use]
pub fn draw_conclusion(possessions: u32, names: PerSlot<&str>, score: PerSlot<u32>) -> String {
    format!(
        "The game reached the maximum of {possessions} possessions without a winner. {}",
        score_line(names, score)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn texts_name_both_players() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let text = block(&mut rng, "Ace", "Wall", ShotKind::Inside, "Wall");
            assert!(text.contains("Ace") && text.contains("Wall"));
            let text = turnover(&mut rng, "Ace", "Wall", true);
            assert!(text.contains("Ace") && text.contains("Wall"));
        }
    }

    #[test]
    fn shot_text_starts_with_shooter() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let text = shot(&mut rng, "Ace", "Wall", ShotKind::Outside, true);
        assert!(text.starts_with("Ace "));
        assert!(!text.contains('{'));
    }

    #[test]
    fn intro_states_rules() {
        let text = intro(
            PerSlot::new("A", "B"),
            11,
            PossessionRule::Alternating,
            "B",
        );
        assert!(text.contains("First to 11"));
        assert!(text.contains("alternating possession"));
        assert!(text.contains("B wins the tip"));
    }

    #[test]
    fn conclusion_reports_score() {
        assert_eq!(conclusion("A", 11, 8), "Game over! A wins 11 to 8!");
    }
}
