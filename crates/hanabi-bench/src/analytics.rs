use std::collections::HashMap;
use std::fs;
use std::path::Path;

use hanabi_core::game::GameState;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

use crate::config::{AgentConfig, AgentKind, BenchmarkConfig};
use crate::session::GameResult;

const CONFIDENCE: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent '{0}' seated in results but missing from configuration")]
    UnknownAgent(String),
    #[error("statistics failure: {0}")]
    Statistics(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-game results into batch statistics.
pub struct AnalyticsCollector {
    run_id: String,
    players: usize,
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    points: Vec<f64>,
    total_score: u64,
    total_turns: u64,
    wins: usize,
    losses: usize,
    perfect: usize,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(agent.name.clone(), AgentAccumulator::new(agent));
            order.push(agent.name.clone());
        }

        Self {
            run_id: config.run_id.clone(),
            players: config.games.players,
            agents,
            agent_order: order,
            points: Vec::new(),
            total_score: 0,
            total_turns: 0,
            wins: 0,
            losses: 0,
            perfect: 0,
        }
    }

    pub fn record_game(&mut self, result: &GameResult) -> Result<(), AnalyticsError> {
        let outcome = &result.outcome;
        self.points.push(f64::from(outcome.points));
        self.total_score += u64::from(outcome.score);
        self.total_turns += u64::from(outcome.turns);
        match outcome.state {
            GameState::Won => self.wins += 1,
            GameState::Lost => self.losses += 1,
            GameState::Starting | GameState::Playing => {}
        }
        if outcome.perfect {
            self.perfect += 1;
        }

        for seat in &result.seats {
            let acc = self
                .agents
                .get_mut(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;
            acc.seats += 1;
            acc.decisions += u64::from(seat.metrics.decisions);
            acc.total_latency_ms += seat.metrics.total_ms;
        }

        Ok(())
    }

    pub fn finalize(mut self) -> Result<AnalyticsSummary, AnalyticsError> {
        let games = self.points.len();
        let mut reports = Vec::new();
        for name in &self.agent_order {
            if let Some(acc) = self.agents.remove(name) {
                reports.push(acc.into_report());
            }
        }

        let mean_of = |total: u64| {
            if games == 0 {
                0.0
            } else {
                total as f64 / games as f64
            }
        };

        Ok(AnalyticsSummary {
            run_id: self.run_id,
            players: self.players,
            games,
            wins: self.wins,
            losses: self.losses,
            perfect: self.perfect,
            points: PointsReport::from_samples(&self.points)?,
            mean_score: mean_of(self.total_score),
            mean_turns: mean_of(self.total_turns),
            agents: reports,
        })
    }
}

struct AgentAccumulator {
    name: String,
    kind: AgentKind,
    params: serde_yaml::Value,
    seats: usize,
    decisions: u64,
    total_latency_ms: f64,
}

impl AgentAccumulator {
    fn new(config: &AgentConfig) -> Self {
        Self {
            name: config.name.clone(),
            kind: config.kind,
            params: config.params.clone(),
            seats: 0,
            decisions: 0,
            total_latency_ms: 0.0,
        }
    }

    fn into_report(self) -> AgentReport {
        let average_ms_per_decision = if self.decisions == 0 {
            0.0
        } else {
            self.total_latency_ms / self.decisions as f64
        };

        AgentReport {
            name: self.name,
            kind: self.kind,
            params: self.params,
            seats: self.seats,
            decisions: self.decisions,
            average_ms_per_decision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub players: usize,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub perfect: usize,
    pub points: PointsReport,
    pub mean_score: f64,
    pub mean_turns: f64,
    pub agents: Vec<AgentReport>,
}

impl AnalyticsSummary {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str("# Batch Summary\n\n");
        rows.push_str(&format!(
            "Run `{}`: {} games at {} players\n\n",
            self.run_id, self.games, self.players
        ));

        let ci = match self.points.ci95 {
            Some((low, high)) => format!("[{low:.3}, {high:.3}]"),
            None => "n/a".to_string(),
        };
        rows.push_str("| Games | Won | Lost | Perfect | Win % | Mean points | 95% CI | Std dev | Mean board score | Mean turns |\n");
        rows.push_str("|-------|-----|------|---------|-------|-------------|--------|---------|------------------|------------|\n");
        rows.push_str(&format!(
            "| {games} | {wins} | {losses} | {perfect} | {win:.1}% | {mean:.3} | {ci} | {sd:.3} | {score:.3} | {turns:.1} |\n",
            games = self.games,
            wins = self.wins,
            losses = self.losses,
            perfect = self.perfect,
            win = self.win_rate() * 100.0,
            mean = self.points.mean,
            sd = self.points.std_dev,
            score = self.mean_score,
            turns = self.mean_turns,
        ));

        rows.push_str("\n## Agents\n\n");
        rows.push_str("| Agent | Kind | Seats | Decisions | Avg ms/decision |\n");
        rows.push_str("|-------|------|-------|-----------|-----------------|\n");
        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {kind:?} | {seats} | {decisions} | {latency:.3} |\n",
                name = agent.name,
                kind = agent.kind,
                seats = agent.seats,
                decisions = agent.decisions,
                latency = agent.average_ms_per_decision,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: AgentKind,
    pub params: serde_yaml::Value,
    pub seats: usize,
    pub decisions: u64,
    pub average_ms_per_decision: f64,
}

/// Final points per game. The interval needs at least two games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsReport {
    pub mean: f64,
    pub std_dev: f64,
    pub ci95: Option<(f64, f64)>,
}

impl PointsReport {
    fn from_samples(points: &[f64]) -> Result<Self, AnalyticsError> {
        if points.is_empty() {
            return Ok(Self {
                mean: 0.0,
                std_dev: 0.0,
                ci95: None,
            });
        }

        let n = points.len() as f64;
        let mean = points.iter().sum::<f64>() / n;
        if points.len() == 1 {
            return Ok(Self {
                mean,
                std_dev: 0.0,
                ci95: None,
            });
        }

        let variance = points
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = variance.sqrt();
        let std_error = std_dev / n.sqrt();

        let t = StudentsT::new(0.0, 1.0, n - 1.0)
            .map_err(|e| AnalyticsError::Statistics(e.to_string()))?;
        let margin = t.inverse_cdf(0.5 + CONFIDENCE / 2.0) * std_error;

        Ok(Self {
            mean,
            std_dev,
            ci95: Some((mean - margin, mean + margin)),
        })
    }
}
