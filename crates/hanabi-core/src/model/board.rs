use crate::flow::{Flow, Terminal};
use crate::model::card::Card;
use crate::model::colour::Colour;
use crate::model::rank::Rank;
use crate::model::tokens::Tokens;

/// Highest achievable score: five piles of five.
pub const MAX_SCORE: u8 = 25;

/// The five coloured piles, the log of every card played, and the token pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    piles: [u8; 5],
    played: Vec<Card>,
    tokens: Tokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The card extended its pile to `height`.
    Placed { height: u8 },
    /// The card did not fit and cost a fuse token.
    Misfired { fuses_left: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReport {
    pub outcome: PlayOutcome,
    pub flow: Flow,
}

impl Board {
    pub fn new() -> Self {
        Self::with_tokens(Tokens::new())
    }

    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            piles: [0; 5],
            played: Vec::new(),
            tokens,
        }
    }

    /// Plays `card`, logging it whether or not it fits.
    ///
    /// A misfire that burns the last fuse halts as lost; completing every pile halts as won.
    pub fn play(&mut self, card: Card) -> PlayReport {
        let (outcome, flow) = if self.is_playable(card) {
            let pile = &mut self.piles[card.colour.index()];
            *pile += 1;
            (PlayOutcome::Placed { height: *pile }, Flow::Continue)
        } else {
            let flow = self.tokens.use_fuse_token();
            (
                PlayOutcome::Misfired {
                    fuses_left: self.tokens.fuse_tokens(),
                },
                flow,
            )
        };

        self.played.push(card);

        let flow = if flow == Flow::Continue && self.is_complete() {
            Flow::Halt(Terminal::Won)
        } else {
            flow
        };

        PlayReport { outcome, flow }
    }

    pub fn is_playable(&self, card: Card) -> bool {
        self.pile(card.colour) + 1 == card.rank.value()
    }

    /// The pile already holds this rank, so the card can never score.
    pub fn is_dead(&self, card: Card) -> bool {
        card.rank.value() <= self.pile(card.colour)
    }

    /// Reward estimate for playing `card` now.
    ///
    /// Playable cards earn 1, or 5 for completing a colour. Anything else costs
    /// more the fewer fuses remain: -1 with three left, -3 with one left.
    pub fn play_score(&self, card: Card) -> i32 {
        if self.is_playable(card) {
            return if card.rank == Rank::Five { 5 } else { 1 };
        }
        let fuses = i32::from(self.tokens.fuse_tokens());
        -(i32::from(Tokens::FUSE_TOKENS) + 1 - fuses)
    }

    pub fn score(&self) -> u8 {
        self.piles.iter().sum()
    }

    pub fn is_complete(&self) -> bool {
        self.piles.iter().all(|&height| height == Rank::Five.value())
    }

    pub fn pile(&self, colour: Colour) -> u8 {
        self.piles[colour.index()]
    }

    pub fn piles(&self) -> &[u8; 5] {
        &self.piles
    }

    pub fn played(&self) -> &[Card] {
        &self.played
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut Tokens {
        &mut self.tokens
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
