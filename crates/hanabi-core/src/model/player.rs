use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index around the table; players act in ascending order and wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().map(Self)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn next(self, players: usize) -> PlayerId {
        if players == 0 {
            return self;
        }
        PlayerId(((self.0 as usize + 1) % players) as u8)
    }

    /// All seats of a table with `players` seats, in turn order.
    pub fn all(players: usize) -> impl Iterator<Item = PlayerId> {
        (0..players.min(u8::MAX as usize)).map(|index| PlayerId(index as u8))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}
