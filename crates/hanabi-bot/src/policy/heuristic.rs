use crate::bot::{BotDifficulty, BotParams, Decision, DecisionEngine};
use hanabi_core::GameError;
use hanabi_core::game::{Game, Move, Strategy};
use hanabi_core::model::player::PlayerId;
use tracing::{Level, event};

/// AI seat: wraps the decision engine behind the game's strategy interface.
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
    params: BotParams,
    last_decision: Option<Decision>,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            params: BotParams::default(),
            last_decision: None,
        }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::Easy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::Normal)
    }

    pub fn with_params(mut self, params: BotParams) -> Self {
        self.params = params;
        self
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    /// The most recent scored decision; the easy bot never scores.
    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new(BotDifficulty::from_env()).with_params(BotParams::from_env())
    }
}

impl Strategy for HeuristicPolicy {
    fn choose_move(&mut self, game: &Game, seat: PlayerId) -> Result<Move, GameError> {
        // Easy throws away whatever sits in the first slot.
        if matches!(self.difficulty, BotDifficulty::Easy) && !game.player(seat)?.is_empty() {
            let action = Move::Discard { slot: 0 };
            log_easy_decision(seat, action);
            return Ok(action);
        }

        let decision = DecisionEngine::new(game, seat, &self.params).decide()?;
        let action = decision.action;
        log_decision(seat, self.difficulty, &decision);
        self.last_decision = Some(decision);
        Ok(action)
    }
}

fn log_easy_decision(seat: PlayerId, chosen: Move) {
    event!(
        target: "hanabi_bot::decision",
        Level::INFO,
        seat = seat.index(),
        difficulty = BotDifficulty::Easy.as_str(),
        kind = chosen.kind(),
        chosen = %chosen,
        reason = "easy_first_discard",
    );
}

fn log_decision(seat: PlayerId, difficulty: BotDifficulty, decision: &Decision) {
    if !tracing::enabled!(target: "hanabi_bot::decision", Level::INFO) {
        return;
    }

    event!(
        target: "hanabi_bot::decision",
        Level::INFO,
        seat = seat.index(),
        difficulty = difficulty.as_str(),
        kind = decision.action.kind(),
        chosen = %decision.action,
        score = decision.score,
        candidates = decision.candidates.len(),
        margin = decision.margin().unwrap_or(0.0),
        reason = "heuristic",
    );

    if !decision_details_enabled() {
        return;
    }

    let preview = decision
        .candidates
        .iter()
        .map(|candidate| format!("{}={:.3}", candidate.action, candidate.score))
        .collect::<Vec<_>>()
        .join("; ");
    event!(
        target: "hanabi_bot::decision_details",
        Level::INFO,
        seat = seat.index(),
        candidates = %preview,
    );
}

pub fn decision_details_enabled() -> bool {
    std::env::var("HANABI_DECISION_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}
