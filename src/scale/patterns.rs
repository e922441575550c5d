//! Named step patterns for the standard 12-tone system

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePattern {
    HarmonicMinor,
    MelodicMinor,
    MajorPentatonic,
    MinorPentatonic,
    WholeTone,
}

impl ScalePattern {
    pub fn name(&self) -> &'static str {
        match self {
            ScalePattern::HarmonicMinor => "harmonic minor",
            ScalePattern::MelodicMinor => "melodic minor",
            ScalePattern::MajorPentatonic => "major pentatonic",
            ScalePattern::MinorPentatonic => "minor pentatonic",
            ScalePattern::WholeTone => "whole tone",
        }
    }

    /// Steps in 12-tone semitones
    pub fn intervals(&self) -> &'static [usize] {
        match self {
            ScalePattern::HarmonicMinor => &[2, 1, 2, 2, 1, 3, 1],
            ScalePattern::MelodicMinor => &[2, 1, 2, 2, 2, 2, 1],
            ScalePattern::MajorPentatonic => &[2, 2, 3, 2, 3],
            ScalePattern::MinorPentatonic => &[3, 2, 2, 3, 2],
            ScalePattern::WholeTone => &[2, 2, 2, 2, 2, 2],
        }
    }
}

impl fmt::Display for ScalePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// All built-in patterns
pub fn predefined_patterns() -> Vec<ScalePattern> {
    vec![
        ScalePattern::HarmonicMinor,
        ScalePattern::MelodicMinor,
        ScalePattern::MajorPentatonic,
        ScalePattern::MinorPentatonic,
        ScalePattern::WholeTone,
    ]
}
