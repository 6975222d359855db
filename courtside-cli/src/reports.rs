use anyhow::Result;
use colored::{ColoredString, Colorize};
use courtside_game::{
    DerivedAttributes, EnhancedProfile, EventKind, MatchEvent, MatchResult, PlayerProfile,
};
use serde::Serialize;
use std::io::Write;

use crate::sweep::{SweepRecord, SweepSummary};
use crate::util::report_timestamp;

const CSV_HEADER: &str = "seed,winner,player1_score,player2_score,possessions,draw";

pub fn write_player_list(out: &mut dyn Write, players: &[PlayerProfile]) -> Result<()> {
    writeln!(out, "{}", "🏀 Available Players".bright_cyan().bold())?;
    writeln!(out, "{}", "====================".cyan())?;
    for player in players {
        let id = player
            .id
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let position = player
            .position
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        writeln!(
            out,
            "{:>4}  {:<24} {:<6} {}",
            id,
            player.name.bold(),
            position,
            player.team.as_deref().unwrap_or("")
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{} players", players.len())?;
    Ok(())
}

pub fn write_player_card(out: &mut dyn Write, enhanced: &EnhancedProfile) -> Result<()> {
    let profile = &enhanced.profile;
    writeln!(out, "{}", enhanced.name().bright_cyan().bold())?;
    writeln!(out, "{}", "-".repeat(enhanced.name().len()).cyan())?;
    if let Some(team) = &profile.team {
        writeln!(out, "Team: {team}")?;
    }
    if let Some(position) = &profile.position {
        writeln!(out, "Position: {position}")?;
    }
    if let Some(height) = &profile.height {
        writeln!(out, "Height: {height}")?;
    }
    writeln!(
        out,
        "Per game: {:.1} pts, {:.1} reb, {:.1} ast",
        profile.points_or_default(),
        profile.rebounds_or(0.0),
        profile.assists_or_default()
    )?;
    writeln!(
        out,
        "Shooting: FG {:.1}%, 3P {:.1}%, FT {:.1}%, TS {:.1}%",
        profile.fg_pct_or_default(),
        profile.three_pct_or_default(),
        profile.ft_pct_or_default(),
        profile.ts_pct_or_default()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", "Derived attributes".yellow().bold())?;
    for (label, value) in derived_rows(&enhanced.derived) {
        writeln!(out, "  {label:<22} {value:>8.2}")?;
    }
    Ok(())
}

pub fn write_comparison(
    out: &mut dyn Write,
    first: &EnhancedProfile,
    second: &EnhancedProfile,
) -> Result<()> {
    writeln!(
        out,
        "{} vs {}",
        first.name().bright_cyan().bold(),
        second.name().bright_magenta().bold()
    )?;
    writeln!(out, "{}", "=".repeat(56).cyan())?;
    writeln!(
        out,
        "  {:<22} {:>14} {:>14}",
        "",
        truncate(first.name(), 14),
        truncate(second.name(), 14)
    )?;
    let left = derived_rows(&first.derived);
    let right = derived_rows(&second.derived);
    for ((label, a), (_, b)) in left.iter().zip(right.iter()) {
        let (a_text, b_text) = highlight_better(*a, *b);
        writeln!(out, "  {label:<22} {a_text:>14} {b_text:>14}")?;
    }
    Ok(())
}

fn derived_rows(derived: &DerivedAttributes) -> [(&'static str, f64); 10] {
    [
        ("Scoring efficiency", derived.scoring_efficiency),
        ("Usage rate", derived.usage_rate),
        ("Estimated steals", derived.estimated_steals),
        ("Estimated blocks", derived.estimated_blocks),
        ("Offensive rebounds", derived.offensive_rebounds),
        ("Defensive rebounds", derived.defensive_rebounds),
        ("Stamina", derived.stamina),
        ("Clutch rating", derived.clutch_rating),
        ("Three-point tendency", derived.three_point_tendency),
        ("Defensive impact", derived.defensive_impact),
    ]
}

fn highlight_better(a: f64, b: f64) -> (ColoredString, ColoredString) {
    let a_text = format!("{a:.2}");
    let b_text = format!("{b:.2}");
    if a > b {
        (a_text.green(), b_text.normal())
    } else if b > a {
        (a_text.normal(), b_text.green())
    } else {
        (a_text.normal(), b_text.normal())
    }
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

pub fn write_match_console(out: &mut dyn Write, result: &MatchResult) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!("🏀 {} vs {}", result.player1.name(), result.player2.name())
            .bright_cyan()
            .bold()
    )?;
    writeln!(
        out,
        "First to {}, {}",
        result.config.target_score,
        result.config.rule.label()
    )?;
    writeln!(out, "{}", "=".repeat(40).cyan())?;
    for event in &result.events {
        writeln!(out, "{}", paint_event(event))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Final: {} {} - {} {} after {} possessions",
        result.player1.name(),
        result.final_score.first,
        result.player2.name(),
        result.final_score.second,
        result.possessions
    )?;
    match &result.winner {
        Some(winner) => writeln!(
            out,
            "Winner: {} by {}",
            winner.green().bold(),
            result.margin()
        )?,
        None => {
            let reason = result
                .conclusion()
                .map_or("No winner: possession cap reached", |event| event.text.as_str());
            writeln!(out, "{}", reason.yellow())?;
        }
    }
    if let Some(commentary) = &result.commentary {
        writeln!(out)?;
        writeln!(out, "{}", "🎙️  Commentary".bright_yellow().bold())?;
        writeln!(out, "{commentary}")?;
    }
    Ok(())
}

fn paint_event(event: &MatchEvent) -> ColoredString {
    let text = event.text.as_str();
    match event.kind {
        EventKind::Intro => text.bright_cyan(),
        EventKind::CheckBall => text.dimmed(),
        EventKind::Turnover | EventKind::Block => text.red(),
        EventKind::ShotMade => text.green(),
        EventKind::ShotMissed => text.yellow(),
        EventKind::Rebound => text.normal(),
        EventKind::Conclusion => text.bright_green().bold(),
    }
}

pub fn write_match_json(out: &mut dyn Write, result: &MatchResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_sweep_console(
    out: &mut dyn Write,
    summary: &SweepSummary,
    records: &[SweepRecord],
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Sweep Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "================".cyan())?;
    writeln!(out, "Generated: {}", report_timestamp())?;
    writeln!(
        out,
        "{} vs {} (first to {}, {})",
        summary.player1.bold(),
        summary.player2.bold(),
        summary.target_score,
        rule_label(summary.make_it_take_it)
    )?;
    writeln!(out, "Matches: {}", summary.matches)?;
    writeln!(
        out,
        "{} wins: {} ({:.1}%)",
        summary.player1,
        summary.player1_wins.to_string().green(),
        summary.player1_win_rate * 100.0
    )?;
    writeln!(
        out,
        "{} wins: {} ({:.1}%)",
        summary.player2,
        summary.player2_wins.to_string().green(),
        summary.player2_win_rate * 100.0
    )?;
    writeln!(
        out,
        "Draws: {} ({:.1}%)",
        summary.draws.to_string().yellow(),
        summary.draw_rate * 100.0
    )?;
    writeln!(
        out,
        "Possessions: mean {:.1}, std {:.1}",
        summary.mean_possessions, summary.std_possessions
    )?;
    writeln!(
        out,
        "Mean score: {:.1} - {:.1} (margin std {:.1})",
        summary.mean_player1_score, summary.mean_player2_score, summary.std_margin
    )?;

    let closest = records
        .iter()
        .filter(|record| !record.draw)
        .min_by_key(|record| record.first_score.abs_diff(record.second_score));
    if let Some(record) = closest {
        writeln!(
            out,
            "Closest game: seed {} ({} - {})",
            record.seed, record.first_score, record.second_score
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SweepReport<'a> {
    generated_at: String,
    summary: &'a SweepSummary,
    records: &'a [SweepRecord],
}

pub fn write_sweep_json(
    out: &mut dyn Write,
    summary: &SweepSummary,
    records: &[SweepRecord],
) -> Result<()> {
    let report = SweepReport {
        generated_at: report_timestamp(),
        summary,
        records,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_sweep_markdown(
    out: &mut dyn Write,
    summary: &SweepSummary,
    records: &[SweepRecord],
) -> Result<()> {
    writeln!(out, "# Courtside Sweep Results\n")?;
    writeln!(out, "_Generated {}_\n", report_timestamp())?;
    writeln!(out, "## Summary\n")?;
    writeln!(
        out,
        "- **Matchup**: {} vs {}",
        summary.player1, summary.player2
    )?;
    writeln!(
        out,
        "- **Rules**: first to {}, {}",
        summary.target_score,
        rule_label(summary.make_it_take_it)
    )?;
    writeln!(out, "- **Matches**: {}", summary.matches)?;
    writeln!(
        out,
        "- **{} win rate**: {:.1}%",
        summary.player1,
        summary.player1_win_rate * 100.0
    )?;
    writeln!(
        out,
        "- **{} win rate**: {:.1}%",
        summary.player2,
        summary.player2_win_rate * 100.0
    )?;
    writeln!(out, "- **Draw rate**: {:.1}%", summary.draw_rate * 100.0)?;
    writeln!(
        out,
        "- **Possessions**: {:.1} ± {:.1}\n",
        summary.mean_possessions, summary.std_possessions
    )?;

    writeln!(out, "## Matches\n")?;
    writeln!(out, "| Seed | Winner | Score | Possessions |")?;
    writeln!(out, "|---:|---|---|---:|")?;
    for record in records {
        writeln!(
            out,
            "| {} | {} | {}-{} | {} |",
            record.seed,
            record.winner.as_deref().unwrap_or("draw"),
            record.first_score,
            record.second_score,
            record.possessions
        )?;
    }
    Ok(())
}

pub fn write_sweep_csv(out: &mut dyn Write, records: &[SweepRecord]) -> Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            record.seed,
            csv_field(record.winner.as_deref().unwrap_or("")),
            record.first_score,
            record.second_score,
            record.possessions,
            record.draw
        )?;
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

const fn rule_label(make_it_take_it: bool) -> &'static str {
    if make_it_take_it {
        "make it, take it"
    } else {
        "alternating possession"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_game::{MatchSettings, RngBundle, enhance, simulate};

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_records() -> Vec<SweepRecord> {
        vec![
            SweepRecord {
                seed: 1,
                winner: Some("Smith, Jr.".to_string()),
                first_score: 11,
                second_score: 7,
                possessions: 31,
                draw: false,
            },
            SweepRecord {
                seed: 2,
                winner: None,
                first_score: 40,
                second_score: 41,
                possessions: 100,
                draw: true,
            },
        ]
    }

    #[test]
    fn csv_quotes_awkward_names() {
        let text = render(|out| write_sweep_csv(out, &sample_records()));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next(), Some("1,\"Smith, Jr.\",11,7,31,false"));
        assert_eq!(lines.next(), Some("2,,40,41,100,true"));
    }

    #[test]
    fn markdown_lists_every_seed() {
        let a = PlayerProfile::named("A");
        let b = PlayerProfile::named("B");
        let records = sample_records();
        let summary =
            crate::sweep::summarize(&a, &b, &MatchSettings::default(), &records);
        let text = render(|out| write_sweep_markdown(out, &summary, &records));
        assert!(text.starts_with("# Courtside Sweep Results"));
        assert!(text.contains("| 1 | Smith, Jr. | 11-7 | 31 |"));
        assert!(text.contains("| 2 | draw | 40-41 | 100 |"));
    }

    #[test]
    fn match_console_prints_every_event() {
        let result = simulate(
            &PlayerProfile::named("A"),
            &PlayerProfile::named("B"),
            &MatchSettings::default(),
            &mut RngBundle::from_user_seed(5),
            None,
        )
        .unwrap();
        let text = render(|out| write_match_console(out, &result));
        for event in &result.events {
            assert!(text.contains(&event.text));
        }
        assert!(text.contains("make it, take it"));
    }

    #[test]
    fn player_card_shows_derived_values() {
        let mut profile = PlayerProfile::named("Card");
        profile.height = Some("6'6\"".to_string());
        let text = render(|out| write_player_card(out, &enhance(&profile)));
        assert!(text.contains("Height: 6'6\""));
        assert!(text.contains("Clutch rating"));
    }
}
