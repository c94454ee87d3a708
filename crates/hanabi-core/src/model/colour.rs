use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Colour {
    Red = 0,
    Blue = 1,
    Green = 2,
    Yellow = 3,
    White = 4,
}

impl Colour {
    pub const ALL: [Colour; 5] = [
        Colour::Red,
        Colour::Blue,
        Colour::Green,
        Colour::Yellow,
        Colour::White,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Colour::Red),
            1 => Some(Colour::Blue),
            2 => Some(Colour::Green),
            3 => Some(Colour::Yellow),
            4 => Some(Colour::White),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Colour::Red => "Red",
            Colour::Blue => "Blue",
            Colour::Green => "Green",
            Colour::Yellow => "Yellow",
            Colour::White => "White",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Colour::Red => "R",
            Colour::Blue => "B",
            Colour::Green => "G",
            Colour::Yellow => "Y",
            Colour::White => "W",
        };
        f.write_str(symbol)
    }
}

impl FromStr for Colour {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Colour::Red),
            "b" | "blue" => Ok(Colour::Blue),
            "g" | "green" => Ok(Colour::Green),
            "y" | "yellow" => Ok(Colour::Yellow),
            "w" | "white" => Ok(Colour::White),
            _ => Err(()),
        }
    }
}
