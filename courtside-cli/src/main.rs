mod narrator;
mod reports;
mod seeds;
mod sweep;
mod util;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use courtside_game::{
    MatchEngine, MatchSettings, NarrativeBoundary, PlayerCatalog, PlayerRepository, RngBundle,
    enhance, lookup_pair,
};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use narrator::{GeminiConfig, GeminiNarrator};
use seeds::resolve_seed_inputs;
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchReport {
    /// Colored play-by-play
    Console,
    /// Full match result as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepReport {
    Console,
    Json,
    Markdown,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "courtside", version)]
#[command(about = "Stat-driven 1-on-1 basketball matches between NBA players")]
struct Cli {
    /// Player dataset (JSON array) to use instead of the bundled one
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Optional path to write the output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every player in the dataset
    Players,
    /// Show a player's raw and derived attributes
    Show { id: String },
    /// Compare two players' derived attributes side by side
    Compare { first: String, second: String },
    /// Play one match
    Simulate {
        first: String,
        second: String,
        #[command(flatten)]
        rules: RuleArgs,
        /// Seed for a reproducible match (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Ask the narrative service for commentary (falls back to local text)
        #[arg(long)]
        narrate: bool,
        #[arg(long, value_enum, default_value_t = MatchReport::Console)]
        report: MatchReport,
    },
    /// Play the same pairing across many seeds and summarize balance
    Sweep {
        first: String,
        second: String,
        #[command(flatten)]
        rules: RuleArgs,
        /// Seeds to run (comma-separated integers or ranges like 1..101)
        #[arg(long, default_value = "1..101")]
        seeds: String,
        #[arg(long, value_enum, default_value_t = SweepReport::Console)]
        report: SweepReport,
    },
}

#[derive(Debug, Clone, Copy, ClapArgs)]
struct RuleArgs {
    /// Points needed to win (a two-point margin is also required)
    #[arg(long, default_value_t = 11)]
    target: u32,
    /// Hand the ball over after every make instead of make it, take it
    #[arg(long)]
    alternating: bool,
}

impl RuleArgs {
    const fn settings(self) -> MatchSettings {
        MatchSettings {
            target_score: self.target,
            make_it_take_it: !self.alternating,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.output.is_some() {
        colored::control::set_override(false);
    }

    let catalog = load_catalog(cli.players.as_deref())?;
    let mut output_target = OutputTarget::new(cli.output.clone())?;
    run(&cli.command, catalog, &mut output_target)?;
    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<PlayerCatalog> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            PlayerCatalog::from_json(&json)
                .with_context(|| format!("failed to load players from {}", path.display()))
        }
        None => PlayerCatalog::load_default().context("failed to load bundled players"),
    }
}

fn run(command: &Command, catalog: PlayerCatalog, out: &mut OutputTarget) -> Result<()> {
    match command {
        Command::Players => reports::write_player_list(out.writer(), catalog.players()),
        Command::Show { id } => {
            let profile = catalog.player(id)?;
            reports::write_player_card(out.writer(), &enhance(profile))
        }
        Command::Compare { first, second } => {
            let (a, b) = lookup_pair(&catalog, first, second)?;
            reports::write_comparison(out.writer(), &enhance(a), &enhance(b))
        }
        Command::Simulate {
            first,
            second,
            rules,
            seed,
            narrate,
            report,
        } => {
            let seed = seed.unwrap_or_else(clock_seed);
            info!("simulating {first} vs {second} with seed {seed}");
            let mut engine = MatchEngine::new(catalog);
            if *narrate {
                engine = engine.with_narrative(narrative_boundary()?);
            }
            let result = engine.play(
                first,
                second,
                &rules.settings(),
                &mut RngBundle::from_user_seed(seed),
            )?;
            match report {
                MatchReport::Console => {
                    writeln!(out.writer(), "{}", format!("Seed: {seed}").dimmed())?;
                    reports::write_match_console(out.writer(), &result)
                }
                MatchReport::Json => reports::write_match_json(out.writer(), &result),
            }
        }
        Command::Sweep {
            first,
            second,
            rules,
            seeds,
            report,
        } => {
            let (a, b) = lookup_pair(&catalog, first, second)?;
            let seeds = resolve_seed_inputs(&split_csv(seeds))?;
            let settings = rules.settings();
            info!("sweeping {} seeds for {} vs {}", seeds.len(), a.name, b.name);
            let records = sweep::run_sweep(a, b, &settings, &seeds)?;
            let summary = sweep::summarize(a, b, &settings, &records);
            match report {
                SweepReport::Console => {
                    reports::write_sweep_console(out.writer(), &summary, &records)
                }
                SweepReport::Json => reports::write_sweep_json(out.writer(), &summary, &records),
                SweepReport::Markdown => {
                    reports::write_sweep_markdown(out.writer(), &summary, &records)
                }
                SweepReport::Csv => reports::write_sweep_csv(out.writer(), &records),
            }
        }
    }
}

fn narrative_boundary() -> Result<NarrativeBoundary> {
    let config = GeminiConfig::from_env();
    if !config.is_configured() {
        info!("GEMINI_API_KEY not set; commentary will use local text");
    }
    let timeout = config.timeout();
    let narrator = GeminiNarrator::new(config).context("failed to build narrative client")?;
    info!("narrative model: {}", narrator.config().model);
    Ok(NarrativeBoundary::new(Arc::new(narrator), timeout))
}

fn clock_seed() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(1337, i64::unsigned_abs)
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
