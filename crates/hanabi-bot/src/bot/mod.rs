mod engine;
mod params;
mod scoring;

pub use engine::{Decision, DecisionEngine, ScoredMove};
pub use params::BotParams;
pub use scoring::{discard_value, hint_value, play_value};

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotDifficulty {
    /// Always throws away its first card.
    Easy,
    /// Scores every legal move and takes the best.
    #[default]
    Normal,
}

impl BotDifficulty {
    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| {
            std::env::var("HANABI_BOT_DIFFICULTY")
                .ok()
                .and_then(|raw| Self::parse(&raw))
                .unwrap_or_default()
        })
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "dummy" => Some(BotDifficulty::Easy),
            "normal" | "default" | "heuristic" => Some(BotDifficulty::Normal),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Normal => "normal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BotDifficulty;

    #[test]
    fn parses_known_names() {
        assert_eq!(BotDifficulty::parse(" Easy "), Some(BotDifficulty::Easy));
        assert_eq!(BotDifficulty::parse("normal"), Some(BotDifficulty::Normal));
        assert_eq!(BotDifficulty::parse("hard"), None);
        assert_eq!(BotDifficulty::default(), BotDifficulty::Normal);
    }
}
