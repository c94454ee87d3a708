use crate::error::GameError;
use crate::model::card::Card;
use std::vec::Vec;

/// Ordered, index-addressable cards held by one player. Order is never rearranged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub const MAX_CARDS: usize = 5;

    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(Self::MAX_CARDS),
        }
    }

    pub fn with_cards(cards: Vec<Card>) -> Result<Self, GameError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(GameError::HandFull {
                max: Self::MAX_CARDS,
            });
        }
        Ok(Self { cards })
    }

    pub fn add(&mut self, card: Card) -> Result<(), GameError> {
        if self.is_full() {
            return Err(GameError::HandFull {
                max: Self::MAX_CARDS,
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Removes the card at `index`, shifting later slots down by one.
    pub fn remove(&mut self, index: usize) -> Result<Card, GameError> {
        self.check_index(index)?;
        Ok(self.cards.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn check_index(&self, index: usize) -> Result<(), GameError> {
        if index >= self.cards.len() {
            return Err(GameError::SlotOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= Self::MAX_CARDS
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::error::GameError;
    use crate::model::card::Card;
    use crate::model::colour::Colour;
    use crate::model::rank::Rank;

    #[test]
    fn add_and_remove_keep_order() {
        let mut hand = Hand::new();
        let a = Card::new(Rank::Three, Colour::Red);
        let b = Card::new(Rank::One, Colour::Blue);
        let c = Card::new(Rank::Five, Colour::White);
        for card in [a, b, c] {
            hand.add(card).unwrap();
        }
        assert_eq!(hand.remove(1), Ok(b));
        assert_eq!(hand.cards(), &[a, c]);
    }

    #[test]
    fn sixth_card_is_rejected() {
        let mut hand = Hand::new();
        for _ in 0..Hand::MAX_CARDS {
            hand.add(Card::new(Rank::One, Colour::Green)).unwrap();
        }
        assert_eq!(
            hand.add(Card::new(Rank::Two, Colour::Green)),
            Err(GameError::HandFull { max: 5 })
        );
        assert_eq!(hand.len(), Hand::MAX_CARDS);
    }

    #[test]
    fn out_of_range_removal_fails_without_mutation() {
        let mut hand = Hand::with_cards(vec![Card::new(Rank::Two, Colour::Yellow)]).unwrap();
        assert_eq!(
            hand.remove(3),
            Err(GameError::SlotOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(hand.len(), 1);
    }
}
