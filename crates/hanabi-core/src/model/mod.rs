pub mod board;
pub mod card;
pub mod colour;
pub mod deck;
pub mod hand;
pub mod hint;
pub mod knowledge;
pub mod player;
pub mod rank;
pub mod tokens;
