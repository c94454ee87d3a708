use crate::model::colour::Colour;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of distinct card identities (colour, rank).
pub const CARD_KINDS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub colour: Colour,
}

impl Card {
    pub const fn new(rank: Rank, colour: Colour) -> Self {
        Self { rank, colour }
    }

    /// Dense identifier in `0..CARD_KINDS`; duplicates share an id.
    pub const fn to_id(self) -> u8 {
        (self.colour as u8) * 5 + (self.rank as u8 - 1)
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if id as usize >= CARD_KINDS {
            return None;
        }
        let colour = match Colour::from_index((id / 5) as usize) {
            Some(colour) => colour,
            None => return None,
        };
        match Rank::from_value(id % 5 + 1) {
            Some(rank) => Some(Card::new(rank, colour)),
            None => None,
        }
    }

    /// Text shown to the holder given what they know about the card.
    pub fn censor(self, show_rank: bool, show_colour: bool) -> String {
        let rank = if show_rank {
            self.rank.to_string()
        } else {
            "*".to_string()
        };
        let colour = if show_colour {
            self.colour.to_string()
        } else {
            "*".to_string()
        };
        format!("({rank},{colour})")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.colour)
    }
}

#[cfg(test)]
mod tests {
    use super::{CARD_KINDS, Card, Colour, Rank};

    #[test]
    fn ids_roundtrip_for_every_kind() {
        for id in 0..CARD_KINDS as u8 {
            let card = Card::from_id(id).expect("valid id");
            assert_eq!(card.to_id(), id);
        }
        assert_eq!(Card::from_id(CARD_KINDS as u8), None);
    }

    #[test]
    fn display_is_rank_then_colour() {
        assert_eq!(Card::new(Rank::Three, Colour::Green).to_string(), "3G");
    }

    #[test]
    fn censor_hides_unknown_attributes() {
        let card = Card::new(Rank::Five, Colour::Red);
        assert_eq!(card.censor(false, false), "(*,*)");
        assert_eq!(card.censor(true, false), "(5,*)");
        assert_eq!(card.censor(true, true), "(5,R)");
    }
}
