pub mod bot;
pub mod policy;

pub use bot::{BotDifficulty, BotParams, Decision, DecisionEngine, ScoredMove};
pub use policy::HeuristicPolicy;
