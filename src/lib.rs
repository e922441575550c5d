//! Tonal schema
//!
//! Pitch conversion and tonal structures over a configurable tonal system.
//! A `TonalSetting` (12-tone equal temperament by default) is validated into a
//! `Schema`, which converts between notenumbers, pitch classes, notenames,
//! pitchnames and symbols. Keys, scales, chord qualities, chords and tuners
//! are built on top of a schema.

pub mod chord;
pub mod errors;
pub mod models;
pub mod scale;
pub mod schema;
pub mod tuning;
pub mod utils;

// Re-export commonly used types
pub use chord::{Chord, Quality, QualityComponent, QualityPart, Variation};
pub use errors::{SettingError, TheoryError, TheoryResult};
pub use models::{AccidentalPreference, Key, Mode, Note, PitchClass, QualityEntry, TonalSetting};
pub use scale::{DiatonicScale, NondiatonicScale, Scale, ScalePattern};
pub use schema::{Schema, Spelling, STANDARD_SEMITONE};
pub use tuning::{Tuner, TuningSystem};
