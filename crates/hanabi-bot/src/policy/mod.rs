mod heuristic;

pub use heuristic::{HeuristicPolicy, decision_details_enabled};
