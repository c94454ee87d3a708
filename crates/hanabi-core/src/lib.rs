pub mod belief;
pub mod error;
pub mod flow;
pub mod game;
pub mod model;

pub use error::GameError;
pub use flow::{Flow, Terminal};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "hanabi"
    }

    pub const fn codename() -> &'static str {
        "Foggy Fireworker"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
