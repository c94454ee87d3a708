use crate::model::hint::Hint;
use crate::model::player::PlayerId;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One fully bound action for the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    Play { slot: usize },
    Discard { slot: usize },
    Hint { target: PlayerId, hint: Hint },
}

impl Move {
    pub const fn kind(self) -> &'static str {
        match self {
            Move::Play { .. } => "play",
            Move::Discard { .. } => "discard",
            Move::Hint { .. } => "hint",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play { slot } => write!(f, "play card {slot}"),
            Move::Discard { slot } => write!(f, "discard card {slot}"),
            Move::Hint { target, hint } => write!(f, "tell {target} about their {hint}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::model::colour::Colour;
    use crate::model::hint::Hint;
    use crate::model::player::PlayerId;

    #[test]
    fn moves_describe_themselves() {
        assert_eq!(Move::Play { slot: 2 }.to_string(), "play card 2");
        let hint = Move::Hint {
            target: PlayerId::new(1),
            hint: Hint::Colour(Colour::Green),
        };
        assert_eq!(hint.to_string(), "tell player 1 about their Green cards");
        assert_eq!(hint.kind(), "hint");
    }

    #[test]
    fn moves_serialize_with_kind_tag() {
        let json = serde_json::to_string(&Move::Discard { slot: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"discard","slot":4}"#);
    }
}
