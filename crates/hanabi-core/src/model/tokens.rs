use crate::flow::{Flow, Terminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokens {
    hint: u8,
    fuse: u8,
}

impl Tokens {
    pub const MAX_HINT_TOKENS: u8 = 8;
    pub const FUSE_TOKENS: u8 = 3;

    pub const fn new() -> Self {
        Self {
            hint: Self::MAX_HINT_TOKENS,
            fuse: Self::FUSE_TOKENS,
        }
    }

    /// Starts from explicit counts, clamped into the legal ranges.
    pub fn with_counts(hint: u8, fuse: u8) -> Self {
        Self {
            hint: hint.min(Self::MAX_HINT_TOKENS),
            fuse: fuse.min(Self::FUSE_TOKENS),
        }
    }

    pub const fn hint_tokens(&self) -> u8 {
        self.hint
    }

    pub const fn fuse_tokens(&self) -> u8 {
        self.fuse
    }

    /// Returns false and changes nothing when no hint token is left.
    pub fn use_hint_token(&mut self) -> bool {
        if self.hint == 0 {
            return false;
        }
        self.hint -= 1;
        true
    }

    /// Returns false when already at the cap.
    pub fn reclaim_hint_token(&mut self) -> bool {
        if self.hint >= Self::MAX_HINT_TOKENS {
            return false;
        }
        self.hint += 1;
        true
    }

    /// Burns a fuse; the last one halts the game as lost.
    pub fn use_fuse_token(&mut self) -> Flow {
        self.fuse = self.fuse.saturating_sub(1);
        if self.fuse == 0 {
            Flow::Halt(Terminal::Lost)
        } else {
            Flow::Continue
        }
    }
}

impl Default for Tokens {
    fn default() -> Self {
        Self::new()
    }
}
