use std::path::PathBuf;

use clap::Parser;

use hanabi_bench::config::{BenchmarkConfig, ResolvedOutputs};
use hanabi_bench::logging::init_logging;
use hanabi_bench::session::SessionRunner;

/// Batch harness for Hanabi strategies.
#[derive(Debug, Parser)]
#[command(
    name = "hanabi-bench",
    author,
    version,
    about = "Deterministic Hanabi batch harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deck shuffling.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of players at the table.
    #[arg(long, value_name = "COUNT")]
    players: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Log every scored candidate regardless of config (forces HANABI_DECISION_DETAILS=1).
    #[arg(long)]
    log_decisions: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(players) = cli.players {
        config.games.players = players;
    }

    if cli.log_decisions {
        config.logging.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let players = config.games.players;

    println!(
        "Loaded configuration '{run_id}' with {agent_count} agent{} ({games} games, {players} players)",
        if agent_count == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SessionRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games → {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    let stats = &summary.stats;
    println!(
        "  Won {}/{} ({} perfect), mean points {:.2}",
        stats.wins, stats.games, stats.perfect, stats.points.mean
    );
    if let Some((low, high)) = stats.points.ci95 {
        println!("  95% CI for mean points: [{low:.2}, {high:.2}]");
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }
    if let Some(outputs) = summary.telemetry_outputs.as_ref() {
        println!("Telemetry summary (JSON): {}", outputs.json_path.display());
        println!(
            "Telemetry summary (Markdown): {}",
            outputs.markdown_path.display()
        );
        let decisions = &outputs.summary.decisions;
        if let Some(avg_margin) = decisions.avg_margin {
            println!(
                "  Decisions: {} events, avg best-vs-next margin {:.3}",
                decisions.count, avg_margin
            );
        } else {
            println!("  Decisions: {} events captured", decisions.count);
        }
        if !decisions.kind_counts.is_empty() {
            println!("  Moves chosen: {:?}", decisions.kind_counts);
        }
    }

    Ok(())
}
