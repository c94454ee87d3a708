use std::io::Write;

use hanabi_core::game::{EventSink, Game, GameEvent};
use tracing::{Level, event};

use crate::render::{narrate, render_table};

/// Forwards game events to the structured log and, optionally, a narrator.
pub struct BenchSink<W> {
    game_index: usize,
    trace: bool,
    narrator: Option<W>,
}

impl<W: Write> BenchSink<W> {
    pub fn new(game_index: usize, trace: bool, narrator: Option<W>) -> Self {
        Self {
            game_index,
            trace,
            narrator,
        }
    }

    /// Writes the whole table, every hand shown, to the narrator if there is one.
    pub fn show_table(&mut self, game: &Game) {
        if let Some(narrator) = self.narrator.as_mut() {
            if writeln!(narrator, "{}", render_table(game, None)).is_err() {
                self.narrator = None;
            }
        }
    }

    pub fn into_narrator(self) -> Option<W> {
        self.narrator
    }
}

impl<W: Write> EventSink for BenchSink<W> {
    fn emit(&mut self, game_event: GameEvent) {
        if self.trace && tracing::enabled!(target: "hanabi_bench::event", Level::DEBUG) {
            match serde_json::to_string(&game_event) {
                Ok(payload) => event!(
                    target: "hanabi_bench::event",
                    Level::DEBUG,
                    game_index = self.game_index as u64,
                    payload = %payload,
                ),
                Err(err) => event!(
                    target: "hanabi_bench::event",
                    Level::WARN,
                    game_index = self.game_index as u64,
                    error = %err,
                    "failed to encode game event"
                ),
            }
        }

        if let Some(narrator) = self.narrator.as_mut() {
            // A broken narrator must not stop the game.
            if writeln!(narrator, "{}", narrate(&game_event)).is_err() {
                self.narrator = None;
            }
        }
    }
}
