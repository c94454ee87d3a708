use crate::game::state::GameState;
use crate::model::player::PlayerId;
use thiserror::Error;

/// Defects raised by the rules layer. Game termination is not an error; see [`crate::Flow`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("hand cannot hold more than {max} cards")]
    HandFull { max: usize },
    #[error("card slot {index} out of range for hand of {len}")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("{seat} is not seated at a table of {players}")]
    PlayerOutOfRange { seat: PlayerId, players: usize },
    #[error("a game needs {min}-{max} players, got {found}")]
    PlayerCount { min: usize, max: usize, found: usize },
    #[error("{players} players need {players} strategies, got {found}")]
    StrategyCount { players: usize, found: usize },
    #[error("invalid game state transition {from:?} -> {to:?}")]
    InvalidTransition { from: GameState, to: GameState },
    #[error("moves can only be applied while playing, game is {state:?}")]
    NotPlaying { state: GameState },
    #[error("turn loop exited in non-terminal state {0:?}")]
    InvalidFinalState(GameState),
    #[error("{seat} cannot give a hint to themselves")]
    SelfHint { seat: PlayerId },
    #[error("no hint tokens left")]
    NoHintTokens,
    #[error("hint matches no card held by {target}")]
    HintMatchesNothing { target: PlayerId },
    #[error("{seat} has no legal moves")]
    NoLegalMoves { seat: PlayerId },
    #[error("strategy for {seat} failed: {message}")]
    Strategy { seat: PlayerId, message: String },
}
