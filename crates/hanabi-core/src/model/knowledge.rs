//! What a player has been told about the cards they hold.
//!
//! A [`KnowledgeBase`] owns the player's [`Hand`] together with one [`Knowledge`]
//! record per slot. Both vectors are only mutated through this type, which keeps
//! them the same length at all times.

use crate::error::GameError;
use crate::model::card::Card;
use crate::model::colour::Colour;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::hint::Hint;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// Disclosure flags for a single held card. Flags only ever go from false to true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Knowledge {
    colour: bool,
    rank: bool,
}

impl Knowledge {
    pub const BLANK: Knowledge = Knowledge {
        colour: false,
        rank: false,
    };

    pub const fn new(colour: bool, rank: bool) -> Self {
        Self { colour, rank }
    }

    pub const fn colour_known(self) -> bool {
        self.colour
    }

    pub const fn rank_known(self) -> bool {
        self.rank
    }

    pub const fn fully_known(self) -> bool {
        self.colour && self.rank
    }

    pub const fn known_count(self) -> u8 {
        self.colour as u8 + self.rank as u8
    }
}

/// The holder's view of one slot: only disclosed attributes are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownCard {
    pub colour: Option<Colour>,
    pub rank: Option<Rank>,
}

impl core::fmt::Display for KnownCard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rank = self
            .rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "*".to_string());
        let colour = self
            .colour
            .map(|colour| colour.to_string())
            .unwrap_or_else(|| "*".to_string());
        write!(f, "({rank},{colour})")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    hand: Hand,
    records: Vec<Knowledge>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self {
            hand: Hand::new(),
            records: Vec::with_capacity(Hand::MAX_CARDS),
        }
    }

    /// Wraps existing cards with blank knowledge records.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, GameError> {
        let hand = Hand::with_cards(cards)?;
        let records = vec![Knowledge::BLANK; hand.len()];
        Ok(Self { hand, records })
    }

    /// Draws up to `count` cards; returns how many were actually drawn.
    ///
    /// Fails before touching the deck when the hand cannot take `count` more cards.
    pub fn draw(&mut self, deck: &mut Deck, count: usize) -> Result<usize, GameError> {
        if self.hand.len() + count > Hand::MAX_CARDS {
            return Err(GameError::HandFull {
                max: Hand::MAX_CARDS,
            });
        }

        let mut drawn = 0;
        for _ in 0..count {
            let Some(card) = deck.draw() else {
                break;
            };
            self.hand.add(card)?;
            self.records.push(Knowledge::BLANK);
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Removes a slot and its record together, shifting later slots down.
    pub fn remove(&mut self, index: usize) -> Result<Card, GameError> {
        let card = self.hand.remove(index)?;
        self.records.remove(index);
        Ok(card)
    }

    pub fn knowledge(&self, index: usize) -> Result<Knowledge, GameError> {
        self.records
            .get(index)
            .copied()
            .ok_or(GameError::SlotOutOfRange {
                index,
                len: self.records.len(),
            })
    }

    /// Marks colour as known on every slot holding `colour`; returns the touched slots.
    pub fn reveal_colour(&mut self, colour: Colour) -> Vec<usize> {
        self.reveal(Hint::Colour(colour))
    }

    /// Marks rank as known on every slot holding `rank`; returns the touched slots.
    pub fn reveal_rank(&mut self, rank: Rank) -> Vec<usize> {
        self.reveal(Hint::Rank(rank))
    }

    pub fn reveal(&mut self, hint: Hint) -> Vec<usize> {
        let mut touched = Vec::new();
        for (index, card) in self.hand.iter().enumerate() {
            if !hint.matches(*card) {
                continue;
            }
            let record = &mut self.records[index];
            match hint {
                Hint::Colour(_) => record.colour = true,
                Hint::Rank(_) => record.rank = true,
            }
            touched.push(index);
        }
        touched
    }

    /// Copy of this knowledge base with `hint` applied; `self` is left untouched.
    pub fn with_reveal(&self, hint: Hint) -> KnowledgeBase {
        let mut copy = self.clone();
        copy.reveal(hint);
        copy
    }

    /// Mean number of disclosed attributes per slot, scaled to `[0, 1]`.
    pub fn score(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let known: u32 = self
            .records
            .iter()
            .map(|record| u32::from(record.known_count()))
            .sum();
        f64::from(known) / (2.0 * self.records.len() as f64)
    }

    /// The slot as its holder sees it.
    pub fn known_card(&self, index: usize) -> Result<KnownCard, GameError> {
        let record = self.knowledge(index)?;
        let card = self.hand.get(index).ok_or(GameError::SlotOutOfRange {
            index,
            len: self.hand.len(),
        })?;
        Ok(KnownCard {
            colour: record.colour.then_some(card.colour),
            rank: record.rank.then_some(card.rank),
        })
    }

    /// Censored rendering of the whole hand, e.g. `(3,*), (*,*)`.
    pub fn describe(&self) -> String {
        self.hand
            .iter()
            .zip(&self.records)
            .map(|(card, record)| card.censor(record.rank, record.colour))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn records(&self) -> &[Knowledge] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (Card, Knowledge)> + '_ {
        self.hand.iter().copied().zip(self.records.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
