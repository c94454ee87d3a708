use crate::model::card::Card;
use crate::model::colour::Colour;
use crate::model::rank::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Cards in the standard composition.
pub const DECK_SIZE: usize = 45;

/// Draw pile plus the discard pile. Cards in hands and on the board live elsewhere.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    discarded: Vec<Card>,
}

impl Deck {
    /// Two copies of ranks one to four and a single five, per colour.
    pub fn composition() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for colour in Colour::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                for _ in 0..rank.copies() {
                    cards.push(Card::new(rank, colour));
                }
            }
        }
        cards
    }

    pub fn standard() -> Self {
        Self {
            cards: Self::composition(),
            discarded: Vec::new(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Builds a draw pile where `order[0]` is the first card drawn.
    pub fn from_draw_order(order: Vec<Card>) -> Self {
        let mut cards = order;
        cards.reverse();
        Self {
            cards,
            discarded: Vec::new(),
        }
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn discard(&mut self, card: Card) {
        self.discarded.push(card);
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    /// Remaining draw pile, last element drawn next.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
