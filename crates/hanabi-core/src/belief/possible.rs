use crate::error::GameError;
use crate::game::state::Game;
use crate::model::card::{CARD_KINDS, Card};
use crate::model::deck::Deck;
use crate::model::hint::Hint;
use crate::model::player::PlayerId;

/// Multiset of card identities a slot may still hold, counted per card kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibleCards {
    counts: [u8; CARD_KINDS],
    total: u16,
    unmatched: u16,
}

impl PossibleCards {
    /// The full 45-card composition.
    pub fn composition() -> Self {
        Self::filtered(None)
    }

    /// The composition restricted to cards matching `filter`.
    pub fn filtered(filter: Option<Hint>) -> Self {
        let mut possible = Self::empty();
        for card in Deck::composition() {
            if filter.is_none_or(|hint| hint.matches(card)) {
                possible.insert(card);
            }
        }
        possible
    }

    /// A set holding exactly one card.
    pub fn exactly(card: Card) -> Self {
        let mut possible = Self::empty();
        possible.insert(card);
        possible
    }

    /// Candidates for `slot` of `seat`'s hand as that player sees them.
    ///
    /// Starts from the composition filtered by the disclosed attribute and takes
    /// away every matching card the player can observe: the play log, the
    /// discard pile and the other players' hands. The player's own other cards
    /// and the draw pile stay in, since the player cannot see them.
    pub fn from_state(game: &Game, seat: PlayerId, slot: usize) -> Result<Self, GameError> {
        let own = game.player(seat)?;
        let knowledge = own.knowledge(slot)?;
        let card = own.hand().get(slot).ok_or(GameError::SlotOutOfRange {
            index: slot,
            len: own.hand().len(),
        })?;

        if knowledge.fully_known() {
            return Ok(Self::exactly(card));
        }

        let filter = if knowledge.colour_known() {
            Some(Hint::Colour(card.colour))
        } else if knowledge.rank_known() {
            Some(Hint::Rank(card.rank))
        } else {
            None
        };

        let mut possible = Self::filtered(filter);
        let visible = game
            .other_players(seat)
            .filter_map(|other| game.player(other).ok())
            .flat_map(|holder| holder.hand().iter().copied());
        let observed = game
            .board()
            .played()
            .iter()
            .chain(game.deck().discarded())
            .copied()
            .chain(visible);

        for seen in observed {
            if filter.is_none_or(|hint| hint.matches(seen)) {
                possible.remove(seen);
            }
        }
        Ok(possible)
    }

    pub fn count(&self, card: Card) -> u8 {
        self.counts[usize::from(card.to_id())]
    }

    pub fn len(&self) -> usize {
        usize::from(self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Share of the set that is `card`; zero for an empty set.
    pub fn probability(&self, card: Card) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.count(card)) / f64::from(self.total)
    }

    /// Distinct candidates with their multiplicity, in card id order.
    pub fn distinct(&self) -> impl Iterator<Item = (Card, u8)> + '_ {
        self.counts.iter().enumerate().filter_map(|(id, &count)| {
            if count == 0 {
                return None;
            }
            Card::from_id(id as u8).map(|card| (card, count))
        })
    }

    /// Probability-weighted mean of `value` over the set; zero for an empty set.
    pub fn expectation<F>(&self, mut value: F) -> f64
    where
        F: FnMut(Card, u8) -> f64,
    {
        self.distinct()
            .map(|(card, count)| self.probability(card) * value(card, count))
            .sum()
    }

    /// Observed cards that had no copy left to take away.
    ///
    /// Non-zero means the knowledge contradicts the public state.
    pub fn unmatched(&self) -> u16 {
        self.unmatched
    }

    fn empty() -> Self {
        Self {
            counts: [0; CARD_KINDS],
            total: 0,
            unmatched: 0,
        }
    }

    fn insert(&mut self, card: Card) {
        self.counts[usize::from(card.to_id())] += 1;
        self.total += 1;
    }

    fn remove(&mut self, card: Card) {
        let count = &mut self.counts[usize::from(card.to_id())];
        if *count == 0 {
            self.unmatched += 1;
            return;
        }
        *count -= 1;
        self.total -= 1;
    }
}
