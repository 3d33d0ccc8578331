//! Match runner CLI
//!
//! - `bb simulate` plays one AI-vs-AI game and prints the box score
//! - `bb batch` plays a range of seeds in parallel and prints a summary
//! - `bb request` feeds a JSON request file through `simulate_match_json`

use anyhow::{bail, Context, Result};
use bb_core::config::apply_config_from_env;
use bb_core::models::{BoxScore, LineScore, TeamBox};
use bb_core::{
    demo_roster, simulate_batch, simulate_match, simulate_match_json, BatchSummary, EngineConfig,
    MatchEngine, MatchResult, RewardConfig, Roster,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bb")]
#[command(about = "Deterministic baseball match simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct MatchArgs {
    /// Your roster JSON (demo roster when omitted)
    #[arg(long)]
    my_team: Option<PathBuf>,

    /// Opponent roster JSON (demo roster when omitted)
    #[arg(long)]
    opponent: Option<PathBuf>,

    /// Engine config, JSON or YAML by extension
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play as the visiting team
    #[arg(long, default_value = "false")]
    away: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game
    Simulate {
        #[command(flatten)]
        teams: MatchArgs,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the play-by-play
        #[arg(long, default_value = "false")]
        plays: bool,

        /// Print the full result as JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Play many seeds and summarize
    Batch {
        #[command(flatten)]
        teams: MatchArgs,

        #[arg(long, default_value = "100")]
        games: u64,

        #[arg(long, default_value = "0")]
        start_seed: u64,
    },

    /// Run a JSON match request file
    Request {
        /// Request file path
        #[arg(long)]
        r#in: PathBuf,

        /// Write the response here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            teams,
            seed,
            plays,
            json,
        } => {
            let setup = MatchSetup::load(&teams)?;
            let result = simulate_match(
                &setup.engine,
                setup.my_team,
                setup.opponent,
                seed,
                &RewardConfig::default(),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result, seed, plays);
            }
        }

        Commands::Batch {
            teams,
            games,
            start_seed,
        } => {
            if games == 0 {
                bail!("--games must be at least 1");
            }
            let setup = MatchSetup::load(&teams)?;
            let seeds: Vec<u64> = (start_seed..start_seed.saturating_add(games)).collect();
            info!(games, start_seed, "running batch");
            let results = simulate_batch(
                &setup.engine,
                setup.my_team,
                setup.opponent,
                &seeds,
                &RewardConfig::default(),
            );
            print_summary(&BatchSummary::from_results(&results));
        }

        Commands::Request { r#in, out } => {
            let request = std::fs::read_to_string(&r#in)
                .with_context(|| format!("reading request {}", r#in.display()))?;
            let response = simulate_match_json(&request)
                .with_context(|| format!("simulating {}", r#in.display()))?;
            match out {
                Some(path) => {
                    std::fs::write(&path, response)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Response written to {}", path.display());
                }
                None => println!("{response}"),
            }
        }
    }

    Ok(())
}

struct MatchSetup {
    engine: MatchEngine,
    my_team: Arc<Roster>,
    opponent: Arc<Roster>,
}

impl MatchSetup {
    fn load(args: &MatchArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => load_config(path)?,
            None => {
                let mut config = EngineConfig::default();
                apply_config_from_env(&mut config)?;
                config
            }
        };
        if args.away {
            config.my_team_is_home = false;
        }
        config.validate()?;

        let my_team = match &args.my_team {
            Some(path) => load_roster(path)?,
            None => demo_roster("Harbor Cats", 60),
        };
        let opponent = match &args.opponent {
            Some(path) => load_roster(path)?,
            None => demo_roster("Mill Town", 55),
        };

        Ok(Self {
            engine: MatchEngine::new(config),
            my_team: Arc::new(my_team),
            opponent: Arc::new(opponent),
        })
    }
}

fn load_roster(path: &Path) -> Result<Roster> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster {}", path.display()))?;
    let roster: Roster = serde_json::from_str(&text)
        .with_context(|| format!("parsing roster {}", path.display()))?;
    debug!(team = %roster.name, players = roster.players.len(), "roster loaded");
    Ok(roster)
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let config: EngineConfig = if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
        EngineConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
    };
    Ok(config)
}

// ============================================================================
// Output
// ============================================================================

fn print_result(result: &MatchResult, seed: u64, plays: bool) {
    let (home, away) = (&result.box_score.home, &result.box_score.away);
    println!("Seed {seed}: {} ({} innings)", result.summary(), result.total_innings);
    if result.walk_off {
        println!("Walk-off win for {}", home.name);
    }
    println!();
    print_line_score(&result.line_score, &result.box_score);
    println!();
    print_team_box(away);
    println!();
    print_team_box(home);

    if plays {
        println!();
        for event in &result.play_by_play {
            println!(
                "{} {:>2}  {:<48} {}-{}",
                event.half.label(),
                event.inning,
                event.description,
                event.away_score,
                event.home_score
            );
        }
    }

    for diagnostic in result.diagnostics.iter().filter(|d| d.is_warning()) {
        println!("warning: {diagnostic:?}");
    }
    println!("\nCash earned: {}", result.cash_earned);
}

fn print_line_score(line: &LineScore, box_score: &BoxScore) {
    let frames = line.away.len().max(line.home.len());
    let header: String = (1..=frames).map(|i| format!("{i:>3}")).collect();
    println!("{:<16}{header}    R   H", "");
    for (team, runs) in [(&box_score.away, &line.away), (&box_score.home, &line.home)] {
        let cells: String = (0..frames)
            .map(|i| match runs.get(i) {
                Some(r) => format!("{r:>3}"),
                None => "  X".to_string(),
            })
            .collect();
        println!(
            "{:<16}{cells} {:>4}{:>4}",
            team.name,
            team.runs(),
            team.hits()
        );
    }
}

fn print_team_box(team: &TeamBox) {
    println!("{:<24} AB   R   H  RBI  BB   K  HR", team.name);
    for line in &team.batting {
        println!(
            "{:<24}{:>3}{:>4}{:>4}{:>5}{:>4}{:>4}{:>4}",
            line.name,
            line.at_bats,
            line.runs,
            line.hits,
            line.rbi,
            line.walks,
            line.strikeouts,
            line.home_runs
        );
    }
    for line in team.pitching.iter().filter(|p| p.batters_faced > 0) {
        println!(
            "  {:<22} IP {:>4}  H {:>2}  R {:>2}  BB {:>2}  K {:>2}",
            line.name,
            line.innings_pitched(),
            line.hits_allowed,
            line.runs_allowed,
            line.walks,
            line.strikeouts
        );
    }
}

fn print_summary(summary: &BatchSummary) {
    println!("Games:       {}", summary.games);
    println!(
        "Record:      {}-{}-{} ({:.1}% wins)",
        summary.wins,
        summary.losses,
        summary.ties,
        summary.win_rate() * 100.0
    );
    println!(
        "Avg score:   {:.2} - {:.2}",
        summary.avg_my_runs, summary.avg_opponent_runs
    );
    println!("Avg innings: {:.2}", summary.avg_innings);
    println!("Extras:      {}", summary.extra_inning_games);
    println!("Walk-offs:   {}", summary.walk_offs);
    println!("Total cash:  {}", summary.total_cash);
    if summary.games_with_warnings > 0 {
        println!("Warnings in {} games", summary.games_with_warnings);
    }
}
