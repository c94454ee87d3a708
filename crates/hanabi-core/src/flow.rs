//! Termination signalling between the rules layer and the state machine.
//!
//! Completing every pile or burning the last fuse ends the game from deep inside
//! move application. Those signals travel back up as [`Flow::Halt`] and are only
//! turned into a [`crate::game::state::GameState`] by [`crate::game::Game`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terminal {
    /// Every pile reached five.
    Won,
    /// The last fuse token was spent.
    Lost,
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Continue,
    Halt(Terminal),
}

impl Flow {
    pub const fn is_halt(self) -> bool {
        matches!(self, Flow::Halt(_))
    }

    pub const fn terminal(self) -> Option<Terminal> {
        match self {
            Flow::Continue => None,
            Flow::Halt(terminal) => Some(terminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Flow, Terminal};

    #[test]
    fn terminal_is_exposed_only_on_halt() {
        assert_eq!(Flow::Continue.terminal(), None);
        assert_eq!(Flow::Halt(Terminal::Won).terminal(), Some(Terminal::Won));
        assert!(Flow::Halt(Terminal::Won).is_halt());
    }
}
