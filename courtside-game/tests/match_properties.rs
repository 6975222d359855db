use std::sync::Arc;
use std::time::Duration;

use courtside_game::constants::{POSSESSION_CAP, WIN_MARGIN};
use courtside_game::{
    EventKind, MatchConfig, MatchPhase, MatchResult, MatchSettings, NarrativeBoundary,
    NarrativeBrief, NarrativeEnhancer, NarrativeError, Outcome, PlayerCatalog, PlayerProfile,
    PlayerRepository, Position, PositionGroup, PossessionRule, RngBundle, SimError, Simulator,
    enhance, fallback_commentary, simulate,
};

fn scenario_profile(name: &str) -> PlayerProfile {
    let mut profile = PlayerProfile::named(name).with_position(Position::SmallForward);
    profile.fg_pct = Some(50.0);
    profile.three_pct = Some(35.0);
    profile.rebounds = Some(5.0);
    profile
}

fn run(p1: &PlayerProfile, p2: &PlayerProfile, config: MatchConfig, seed: u64) -> MatchResult {
    let mut simulator = Simulator::new(p1, p2, config).unwrap();
    simulator.run(&mut RngBundle::from_user_seed(seed)).unwrap()
}

fn assert_well_formed(result: &MatchResult) {
    assert!(!result.events.is_empty());
    assert_eq!(result.events[0].kind, EventKind::Intro);
    let conclusions = result
        .events
        .iter()
        .filter(|event| event.kind == EventKind::Conclusion)
        .count();
    assert_eq!(conclusions, 1);
    assert_eq!(result.events.last().map(|e| e.kind), Some(EventKind::Conclusion));
    assert!(result.possessions <= POSSESSION_CAP);

    match result.outcome {
        Outcome::Win(slot) => {
            let own = result.final_score[slot];
            let other = result.final_score[slot.other()];
            assert!(own >= result.config.target_score);
            assert!(own - other >= WIN_MARGIN);
            assert_eq!(result.winner.as_deref(), Some(result.contender(slot).name()));
        }
        Outcome::Draw => {
            assert_eq!(result.possessions, POSSESSION_CAP);
            assert!(result.winner.is_none());
        }
    }
}

#[test]
fn identical_profiles_play_to_a_decided_finish() {
    let a = scenario_profile("A");
    let b = scenario_profile("B");
    let mut draws = 0;
    for seed in 0..200 {
        let result = run(&a, &b, MatchConfig::default(), seed);
        assert_well_formed(&result);
        match result.winner_slot {
            Some(slot) => assert!(result.final_score[slot] > 0),
            None => draws += 1,
        }
    }
    assert!(draws < 20, "too many capped matches: {draws}");
}

#[test]
fn same_seed_same_match() {
    let a = scenario_profile("A");
    let b = scenario_profile("B");
    let first = run(&a, &b, MatchConfig::default(), 77);
    let second = run(&a, &b, MatchConfig::default(), 77);
    assert_eq!(first.events, second.events);
    assert_eq!(first.final_score, second.final_score);
    assert_eq!(first.outcome, second.outcome);
}

#[test]
fn duplicate_names_do_not_share_a_score() {
    let twin = scenario_profile("Twin");
    for seed in 0..50 {
        let result = run(&twin, &twin, MatchConfig::default(), seed);
        assert_well_formed(&result);
        let scored: u32 = result
            .events
            .iter()
            .filter_map(|event| event.points)
            .sum();
        assert_eq!(scored, result.final_score.first + result.final_score.second);
    }
}

#[test]
fn missing_stats_use_defaults() {
    let sparse = PlayerProfile::named("Sparse").with_position(Position::Center);
    let bare = PlayerProfile::named("Bare").with_position(Position::PointGuard);
    for seed in 0..25 {
        assert_well_formed(&run(&sparse, &bare, MatchConfig::default(), seed));
    }
}

#[test]
fn malformed_height_fails_before_play() {
    let mut typo = scenario_profile("Typo");
    typo.height = Some("six foot one".to_string());
    let err = Simulator::new(&scenario_profile("A"), &typo, MatchConfig::default()).unwrap_err();
    assert!(matches!(err, SimError::InvalidHeightFormat { ref player, .. } if player == "Typo"));

    let mut rngs = RngBundle::from_user_seed(3);
    let err = simulate(
        &typo,
        &scenario_profile("B"),
        &MatchSettings::default(),
        &mut rngs,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidHeightFormat { .. }));
    assert_eq!(rngs.play_draws(), 0);
}

#[test]
fn simulator_runs_only_once() {
    let mut simulator = Simulator::new(
        &scenario_profile("A"),
        &scenario_profile("B"),
        MatchConfig::default(),
    )
    .unwrap();
    let mut rngs = RngBundle::from_user_seed(10);
    simulator.run(&mut rngs).unwrap();
    assert!(matches!(simulator.run(&mut rngs), Err(SimError::AlreadyPlayed)));
}

#[test]
fn scores_only_move_in_legal_increments() {
    let a = scenario_profile("A");
    let b = scenario_profile("B");
    for seed in 0..50 {
        let result = run(&a, &b, MatchConfig::default(), seed);
        for event in &result.events {
            match event.kind {
                EventKind::ShotMade => {
                    assert!(matches!(event.points, Some(1 | 2)));
                    assert!(event.score.is_some());
                }
                _ => assert!(event.points.is_none()),
            }
        }
    }
}

struct Broken;

impl NarrativeEnhancer for Broken {
    fn narrate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        Err(NarrativeError::Request("service unavailable".to_string()))
    }
}

#[test]
fn failing_enhancer_degrades_to_fallback() {
    let boundary = NarrativeBoundary::new(Arc::new(Broken), Duration::from_secs(2));
    let result = simulate(
        &scenario_profile("A"),
        &scenario_profile("B"),
        &MatchSettings::default(),
        &mut RngBundle::from_user_seed(8),
        Some(&boundary),
    )
    .unwrap();
    assert_well_formed(&result);
    let commentary = result.commentary.as_deref().unwrap();
    assert_eq!(commentary, fallback_commentary(&result.events));
    assert!(commentary.contains("Game over!") || commentary.contains("without a winner"));
}

#[test]
fn bundled_players_can_face_each_other() {
    let catalog = PlayerCatalog::load_default().unwrap();
    let players = catalog.players();
    for (index, pair) in players.windows(2).enumerate() {
        let seed = u64::try_from(index).expect("index fits");
        let result = run(&pair[0], &pair[1], MatchConfig::default(), seed);
        assert_well_formed(&result);
    }
}

#[test]
fn unreachable_target_ends_in_a_capped_draw() {
    let config = MatchConfig {
        target_score: 1000,
        rule: PossessionRule::MakeItTakeIt,
    };
    let mut simulator =
        Simulator::new(&scenario_profile("A"), &scenario_profile("B"), config).unwrap();
    let result = simulator.run(&mut RngBundle::from_user_seed(1)).unwrap();

    assert_well_formed(&result);
    assert_eq!(result.outcome, Outcome::Draw);
    assert!(result.is_draw());
    assert_eq!(result.possessions, POSSESSION_CAP);
    assert!(result.winner.is_none());
    assert!(result.winner_slot.is_none());
    assert_eq!(simulator.phase(), MatchPhase::Finished(Outcome::Draw));

    let checks = result
        .events
        .iter()
        .filter(|event| event.kind == EventKind::CheckBall)
        .count();
    assert_eq!(checks, usize::try_from(POSSESSION_CAP).expect("cap fits"));

    let last = result.conclusion().expect("conclusion event");
    assert!(last.actor.is_none());
    assert!(last.text.starts_with(&format!(
        "The game reached the maximum of {POSSESSION_CAP} possessions without a winner."
    )));
    assert!(last.text.contains(&format!(
        "Score: A {}, B {}",
        result.final_score.first, result.final_score.second
    )));
}

#[test]
fn bundled_combo_forward_plays_as_a_big() {
    let catalog = PlayerCatalog::load_default().unwrap();
    let thompson = catalog.player("9").unwrap();
    let position = thompson.position.as_ref().unwrap();
    assert_eq!(position.as_str(), "SF-PF");
    assert_eq!(thompson.position_group(), PositionGroup::Big);

    let derived = enhance(thompson).derived;
    assert!((derived.estimated_blocks - 2.02).abs() < 1e-9);
    assert!((derived.estimated_steals - 0.8).abs() < 1e-9);
    assert!((derived.offensive_rebounds - 8.2 * 0.35).abs() < 1e-9);
}
