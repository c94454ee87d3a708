mod agents;

pub use agents::{AgentBlueprint, AgentError};

use std::fs::{self, File};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use hanabi_core::GameError;
use hanabi_core::game::{Game, GameOutcome, GameState, Move, Strategy};
use hanabi_core::model::player::PlayerId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary};
use crate::config::{BenchmarkConfig, ResolvedOutputs};
use crate::events::BenchSink;
use crate::logging::TELEMETRY_FILE;
use crate::telemetry::{
    TelemetryError, TelemetryOutputs, append_highlights_to_markdown, write_summary_outputs,
};

/// Plays a configured batch of games and writes their artifacts.
pub struct SessionRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    seats: Vec<AgentBlueprint>,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub telemetry_outputs: Option<TelemetryOutputs>,
    pub stats: AnalyticsSummary,
}

impl SessionRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let seats = AgentBlueprint::from_configs(config.seating())?;

        if seats.len() != config.games.players {
            return Err(RunnerError::SeatCount {
                players: config.games.players,
                found: seats.len(),
            });
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            seats,
        })
    }

    /// Play every game, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config);

        for game_index in 0..self.config.games.count {
            let seed = rng.next_u64();
            let result = self.play_game(game_index, seed)?;
            analytics.record_game(&result)?;
            write_game_row(&mut writer, &self.config, game_index, &result)?;
            rows_written += 1;
        }

        writer.flush()?;

        let stats = analytics.finalize()?;
        stats.write_markdown(&self.outputs.summary_md)?;

        let telemetry_dir = self.outputs.telemetry_dir();
        let telemetry_path = if self.logging_enabled {
            Some(telemetry_dir.join(TELEMETRY_FILE))
        } else {
            None
        };

        let telemetry_outputs = match telemetry_path.as_ref() {
            Some(path) => write_summary_outputs(path, &telemetry_dir)?,
            None => None,
        };

        if let Some(outputs) = telemetry_outputs.as_ref() {
            append_highlights_to_markdown(&self.outputs.summary_md, outputs)?;
        }

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
            telemetry_outputs,
            stats,
        })
    }

    fn play_game(&self, game_index: usize, seed: u64) -> Result<GameResult, RunnerError> {
        let players = self.config.games.players;
        let mut game = Game::with_seed(players, seed)?;
        let narrate =
            self.config.logging.print_boards || self.seats.iter().any(AgentBlueprint::is_interactive);
        let mut sink: BenchSink<Stdout> =
            BenchSink::new(game_index, self.logging_enabled, narrate.then(io::stdout));
        let mut seats = self
            .seats
            .iter()
            .zip(PlayerId::all(players))
            .map(|(agent, seat)| SeatState::new(seat, agent, &self.config.run_id, game_index))
            .collect::<Vec<_>>();

        game.start(&mut sink)?;
        loop {
            let current = game.current_player();
            let seat = seats
                .get_mut(current.index())
                .ok_or(GameError::PlayerOutOfRange {
                    seat: current,
                    players,
                })?;
            if game.play_turn(seat, &mut sink)?.is_halt() {
                break;
            }
        }

        let outcome = game
            .outcome()
            .ok_or(GameError::InvalidFinalState(game.state()))?;
        for seat in &mut seats {
            seat.strategy.observe_outcome(&outcome);
        }

        sink.show_table(&game);

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "hanabi_bench::game",
                Level::INFO,
                run_id = %self.config.run_id,
                game_index = game_index as u64,
                seed,
                state = outcome.state.as_str(),
                points = outcome.points,
                score = outcome.score,
                turns = outcome.turns,
            );
        }

        Ok(GameResult {
            seed,
            seats: seats.into_iter().map(SeatState::finish).collect(),
            outcome,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    game_index: usize,
    result: &GameResult,
) -> Result<(), RunnerError> {
    let outcome = &result.outcome;
    let decisions: u32 = result.seats.iter().map(|seat| seat.metrics.decisions).sum();
    let total_ms: f64 = result.seats.iter().map(|seat| seat.metrics.total_ms).sum();
    let speed_ms_turn = if decisions == 0 {
        0.0
    } else {
        total_ms / f64::from(decisions)
    };

    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{game_index:05}"),
        game_index,
        seed: result.seed,
        players: result.seats.len(),
        seating: result
            .seats
            .iter()
            .map(|seat| SeatSnapshot {
                seat: seat.seat.index(),
                agent: seat.agent_name.clone(),
            })
            .collect(),
        state: outcome.state,
        points: outcome.points,
        score: outcome.score,
        piles: outcome.piles,
        turns: outcome.turns,
        hint_tokens: outcome.hint_tokens,
        fuse_tokens: outcome.fuse_tokens,
        perfect: outcome.perfect,
        decisions,
        speed_ms_turn,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// A seat's strategy wrapped with decision timing.
struct SeatState<'a> {
    seat: PlayerId,
    agent_name: String,
    strategy: Box<dyn Strategy>,
    metrics: DecisionMetrics,
    run_id: &'a str,
    game_index: usize,
}

impl<'a> SeatState<'a> {
    fn new(seat: PlayerId, agent: &AgentBlueprint, run_id: &'a str, game_index: usize) -> Self {
        Self {
            seat,
            agent_name: agent.name.clone(),
            strategy: agent.spawn_strategy(),
            metrics: DecisionMetrics::default(),
            run_id,
            game_index,
        }
    }

    fn finish(self) -> SeatResult {
        SeatResult {
            agent_name: self.agent_name,
            seat: self.seat,
            metrics: self.metrics.finalize(),
        }
    }
}

impl Strategy for SeatState<'_> {
    fn choose_move(&mut self, game: &Game, seat: PlayerId) -> Result<Move, GameError> {
        let start = Instant::now();
        let chosen = self.strategy.choose_move(game, seat)?;
        let elapsed_ms = self.metrics.record(start.elapsed());

        if tracing::enabled!(target: "hanabi_bench::turn", Level::INFO) {
            event!(
                target: "hanabi_bench::turn",
                Level::INFO,
                run_id = %self.run_id,
                game_index = self.game_index as u64,
                turn = game.turns() + 1,
                seat = seat.index(),
                agent = %self.agent_name,
                chosen = %chosen,
                elapsed_ms
            );
        }

        Ok(chosen)
    }

    fn observe_outcome(&mut self, outcome: &GameOutcome) {
        self.strategy.observe_outcome(outcome);
    }
}

/// One finished game and how each seat spent its time.
pub struct GameResult {
    pub seed: u64,
    pub seats: Vec<SeatResult>,
    pub outcome: GameOutcome,
}

pub struct SeatResult {
    pub agent_name: String,
    pub seat: PlayerId,
    pub metrics: DecisionSummary,
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[derive(Clone, Serialize)]
struct SeatSnapshot {
    seat: usize,
    agent: String,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    seed: u64,
    players: usize,
    seating: Vec<SeatSnapshot>,
    state: GameState,
    points: u8,
    score: u8,
    piles: [u8; 5],
    turns: u32,
    hint_tokens: u8,
    fuse_tokens: u8,
    perfect: bool,
    decisions: u32,
    speed_ms_turn: f64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
    #[error("configuration seats {found} agents at a table of {players}")]
    SeatCount { players: usize, found: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("telemetry summarisation failed: {0}")]
    Telemetry(#[from] TelemetryError),
}
