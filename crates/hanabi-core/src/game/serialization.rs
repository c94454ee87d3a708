use super::state::{Game, GameState};
use serde::{Deserialize, Serialize};

/// Point-in-time summary of a game, suitable for logs and result files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: Option<u64>,
    pub players: usize,
    pub state: GameState,
    pub piles: [u8; 5],
    pub score: u8,
    pub hint_tokens: u8,
    pub fuse_tokens: u8,
    pub deck_left: usize,
    pub turns: u32,
    pub turns_left: Option<usize>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        let tokens = game.board().tokens();
        GameSnapshot {
            seed: game.seed(),
            players: game.player_count(),
            state: game.state(),
            piles: *game.board().piles(),
            score: game.score(),
            hint_tokens: tokens.hint_tokens(),
            fuse_tokens: tokens.fuse_tokens(),
            deck_left: game.deck().len(),
            turns: game.turns(),
            turns_left: game.turns_left(),
        }
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::GameSnapshot;
    use crate::game::events::NullSink;
    use crate::game::state::{Game, GameState};

    #[test]
    fn snapshot_serializes_to_json() {
        let mut game = Game::with_seed(3, 99).unwrap();
        game.start(&mut NullSink).unwrap();
        let json = GameSnapshot::to_json(&game).unwrap();
        let snapshot = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot.seed, Some(99));
        assert_eq!(snapshot.state, GameState::Playing);
        assert_eq!(snapshot.deck_left, 30);
        assert!(json.contains("\"state\": \"playing\""));
    }
}
