// Accidental spelling policy

use serde::{Deserialize, Serialize};

/// Which way to lean when two spellings are otherwise equally good
///
/// Used for the exact half-octave tie in key generation and as the final
/// tie-break when assigning letters to the degrees of a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalPreference {
    #[default]
    Sharp,
    Flat,
}

impl AccidentalPreference {
    /// True when an accidental of this sign goes against the preference
    pub fn opposes(self, accidental: i32) -> bool {
        match self {
            AccidentalPreference::Sharp => accidental < 0,
            AccidentalPreference::Flat => accidental > 0,
        }
    }
}
