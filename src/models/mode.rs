//! Rotations of the reference natural scale
//!
//! Each mode selects where in the reference step pattern the scale starts:
//! Ionian is the pattern itself, Dorian starts on its second step, and so on.
//! With the default 12-tone setting:
//!
//!   Ionian      2 2 1 2 2 2 1
//!   Dorian      2 1 2 2 2 1 2
//!   Phrygian    1 2 2 2 1 2 2
//!   Lydian      2 2 2 1 2 2 1
//!   Mixolydian  2 2 1 2 2 1 2
//!   Aeolian     2 1 2 2 1 2 2
//!   Locrian     1 2 2 1 2 2 2

use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Mode {
    Ionian = 0,
    Dorian = 1,
    Phrygian = 2,
    Lydian = 3,
    Mixolydian = 4,
    Aeolian = 5,
    Locrian = 6,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    /// Rotation index into the reference step pattern
    pub fn rotation(self) -> usize {
        self as usize
    }

    pub fn from_rotation(index: usize) -> Option<Mode> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Ionian => "ionian",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Aeolian => "aeolian",
            Mode::Locrian => "locrian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ionian" | "major" => Ok(Mode::Ionian),
            "dorian" => Ok(Mode::Dorian),
            "phrygian" => Ok(Mode::Phrygian),
            "lydian" => Ok(Mode::Lydian),
            "mixolydian" => Ok(Mode::Mixolydian),
            "aeolian" | "minor" => Ok(Mode::Aeolian),
            "locrian" => Ok(Mode::Locrian),
            _ => Err(format!("Invalid mode: '{}'. Expected one of: ionian, dorian, phrygian, lydian, mixolydian, aeolian, locrian", s)),
        }
    }
}
