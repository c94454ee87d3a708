//! What a player can deduce about one of their own cards from public information.

mod possible;

pub use possible::PossibleCards;
