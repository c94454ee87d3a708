use crate::bot::params::BotParams;
use crate::bot::scoring::{discard_value, hint_value, play_value};
use hanabi_core::GameError;
use hanabi_core::belief::PossibleCards;
use hanabi_core::game::{Game, Move};
use hanabi_core::model::player::PlayerId;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub action: Move,
    pub score: f64,
}

/// The chosen move plus every candidate that was weighed.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Move,
    pub score: f64,
    pub candidates: Vec<ScoredMove>,
}

impl Decision {
    /// How far the chosen move beat the best alternative. `None` when it was the only option.
    pub fn margin(&self) -> Option<f64> {
        let mut skipped = false;
        let mut runner_up: Option<f64> = None;
        for candidate in &self.candidates {
            if !skipped && candidate.action == self.action {
                skipped = true;
                continue;
            }
            runner_up = Some(runner_up.map_or(candidate.score, |best| best.max(candidate.score)));
        }
        runner_up.map(|second| self.score - second)
    }
}

/// Single-ply move scorer for one seat.
///
/// Reads the game and never changes it; the caller applies the returned move.
pub struct DecisionEngine<'a> {
    game: &'a Game,
    seat: PlayerId,
    params: &'a BotParams,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(game: &'a Game, seat: PlayerId, params: &'a BotParams) -> Self {
        Self { game, seat, params }
    }

    /// Scores every legal move and keeps the first one with the highest score.
    pub fn decide(&self) -> Result<Decision, GameError> {
        let legal = self.game.legal_moves(self.seat);
        let mut candidates = Vec::with_capacity(legal.len());
        let mut best: Option<ScoredMove> = None;

        for action in legal {
            let scored = ScoredMove {
                action,
                score: self.score(action)?,
            };
            if best.is_none_or(|current| scored.score > current.score) {
                best = Some(scored);
            }
            candidates.push(scored);
        }

        let best = best.ok_or(GameError::NoLegalMoves { seat: self.seat })?;
        Ok(Decision {
            action: best.action,
            score: best.score,
            candidates,
        })
    }

    pub fn score(&self, action: Move) -> Result<f64, GameError> {
        let board = self.game.board();
        let value = match action {
            Move::Play { slot } => self
                .possible(slot)?
                .map_or(0.0, |possible| play_value(board, &possible)),
            Move::Discard { slot } => self
                .possible(slot)?
                .map_or(0.0, |possible| discard_value(board, &possible, self.params)),
            Move::Hint { target, .. } if target == self.seat => self.params.self_hint_penalty,
            Move::Hint { target, hint } => hint_value(self.game.player(target)?, hint),
        };
        Ok(value)
    }

    fn possible(&self, slot: usize) -> Result<Option<PossibleCards>, GameError> {
        let possible = PossibleCards::from_state(self.game, self.seat, slot)?;
        if possible.is_empty() {
            warn!(
                target: "hanabi_bot::inference",
                seat = %self.seat,
                slot,
                unmatched = possible.unmatched(),
                "no candidate cards left for slot"
            );
            return Ok(None);
        }
        Ok(Some(possible))
    }
}
