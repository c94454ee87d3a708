//! Per-move value estimates. Each function is pure over its inputs.

use crate::bot::params::BotParams;
use hanabi_core::belief::PossibleCards;
use hanabi_core::model::board::Board;
use hanabi_core::model::card::Card;
use hanabi_core::model::hint::Hint;
use hanabi_core::model::knowledge::KnowledgeBase;
use hanabi_core::model::rank::Rank;
use hanabi_core::model::tokens::Tokens;

/// Expected reward of playing a card drawn from `possible`.
pub fn play_value(board: &Board, possible: &PossibleCards) -> f64 {
    possible.expectation(|card, _| f64::from(board.play_score(card)))
}

/// Expected value of losing a card drawn from `possible`.
///
/// While hint tokens are capped the discard reclaims nothing, so the value is
/// scaled by `discard_at_cap_weight`.
pub fn discard_value(board: &Board, possible: &PossibleCards, params: &BotParams) -> f64 {
    let value = possible.expectation(|card, copies| discard_potential(board, card, copies, params));
    if board.tokens().hint_tokens() >= Tokens::MAX_HINT_TOKENS {
        value * params.discard_at_cap_weight
    } else {
        value
    }
}

fn discard_potential(board: &Board, card: Card, copies: u8, params: &BotParams) -> f64 {
    if board.is_dead(card) {
        return params.discard_dead_bonus;
    }
    if copies == 1 {
        return if card.rank == Rank::Five {
            params.discard_five_penalty
        } else {
            params.discard_last_copy_penalty
        };
    }
    0.0
}

/// Increase in the holder's knowledge score if `hint` were given.
pub fn hint_value(holder: &KnowledgeBase, hint: Hint) -> f64 {
    holder.with_reveal(hint).score() - holder.score()
}
