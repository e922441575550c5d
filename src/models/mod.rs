//! Models module for the tonal engine
//!
//! Configuration (`TonalSetting`) and the value objects handed out by the
//! conversion engine: keys, modes, pitch classes and notes.

pub mod accidental;
pub mod key;
pub mod mode;
pub mod note;
pub mod pitch_class;
pub mod setting;

// Re-export commonly used types
pub use accidental::AccidentalPreference;
pub use key::Key;
pub use mode::Mode;
pub use note::Note;
pub use pitch_class::PitchClass;
pub use setting::{
    AccidentalSetting, NoteSetting, PitchClassSetting, QualityEntry, TonalSetting, TunerSetting,
};
