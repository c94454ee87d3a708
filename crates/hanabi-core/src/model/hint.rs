use crate::model::card::Card;
use crate::model::colour::Colour;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Information disclosed to another player about every card they hold that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    Colour(Colour),
    Rank(Rank),
}

impl Hint {
    pub fn matches(self, card: Card) -> bool {
        match self {
            Hint::Colour(colour) => card.colour == colour,
            Hint::Rank(rank) => card.rank == rank,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Colour(colour) => write!(f, "{} cards", colour.as_str()),
            Hint::Rank(rank) => write!(f, "{rank}s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Hint;
    use crate::model::card::Card;
    use crate::model::colour::Colour;
    use crate::model::rank::Rank;

    #[test]
    fn hints_match_on_their_attribute_only() {
        let card = Card::new(Rank::Two, Colour::Blue);
        assert!(Hint::Colour(Colour::Blue).matches(card));
        assert!(!Hint::Colour(Colour::Red).matches(card));
        assert!(Hint::Rank(Rank::Two).matches(card));
        assert!(!Hint::Rank(Rank::Three).matches(card));
    }
}
