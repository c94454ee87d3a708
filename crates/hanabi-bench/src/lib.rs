pub mod analytics;
pub mod config;
pub mod console;
pub mod events;
pub mod logging;
pub mod render;
pub mod session;
pub mod telemetry;
