pub mod events;
pub mod legal;
pub mod moves;
pub mod serialization;
pub mod state;
pub mod strategy;

pub use events::{EventSink, GameEvent, NullSink};
pub use legal::legal_moves;
pub use moves::Move;
pub use state::{Game, GameOutcome, GameState};
pub use strategy::Strategy;
