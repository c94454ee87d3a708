use crate::error::GameError;
use crate::game::moves::Move;
use crate::game::state::{Game, GameOutcome};
use crate::model::player::PlayerId;

/// Decides moves for one seat. The game applies the returned move exactly once.
///
/// Implementations only get shared access to the game, so a strategy can read
/// the table but never mutate it.
pub trait Strategy {
    fn choose_move(&mut self, game: &Game, seat: PlayerId) -> Result<Move, GameError>;

    fn observe_outcome(&mut self, _outcome: &GameOutcome) {}
}

impl<F> Strategy for F
where
    F: FnMut(&Game, PlayerId) -> Result<Move, GameError>,
{
    fn choose_move(&mut self, game: &Game, seat: PlayerId) -> Result<Move, GameError> {
        self(game, seat)
    }
}
