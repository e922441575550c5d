//! Error types for pitch conversion and tonal structure construction
//!
//! Two families: `SettingError` covers loading and validating a tonal
//! configuration, `TheoryError` covers every conversion or construction call
//! made against a validated `Schema`.
//!
//! A pitch class that simply has no spelling under a given accidental is NOT
//! an error; conversions report that case as `Ok(None)`.

use thiserror::Error;

/// Failures while loading or validating a `TonalSetting`
#[derive(Debug, Error)]
pub enum SettingError {
    /// Setting file could not be read
    #[error("Failed to read setting file: {0}")]
    Io(#[from] std::io::Error),

    /// Setting file is not valid JSON for the setting schema
    #[error("Invalid JSON setting: {0}")]
    Json(#[from] serde_json::Error),

    /// Setting file is not valid YAML for the setting schema
    #[error("Invalid YAML setting: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension does not name a supported format
    #[error("Unsupported setting format: {0}")]
    UnsupportedFormat(String),

    /// Structurally valid data that violates a setting invariant
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Failures of a single conversion or construction call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("Invalid pitchclass: '{0}'")]
    InvalidPitchclass(i64),

    #[error("Invalid pitchname: '{0}'")]
    InvalidPitchname(String),

    #[error("Invalid notename: '{0}'")]
    InvalidNotename(String),

    #[error("Invalid notenumber: '{0}'")]
    InvalidNotenumber(i64),

    #[error("Invalid symbol: '{0}'")]
    InvalidSymbol(String),

    #[error("Invalid octave: '{0}'")]
    InvalidOctave(i64),

    /// No one-letter-per-degree spelling exists for this tonic
    #[error("Invalid key '{tonic}': {reason}")]
    InvalidKey { tonic: String, reason: String },

    /// Interval pattern or accidentals cannot be spelled as a scale
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Invalid quality: '{0}'")]
    InvalidQuality(String),

    #[error("Invalid chord root: '{0}'")]
    InvalidRoot(String),

    #[error("Invalid chord bass: '{0}'")]
    InvalidBass(String),

    /// Tuning system has no ratio table for this semitone count
    #[error("Tuning system {system} is not defined for {semitone} semitones")]
    UnsupportedTuning { system: String, semitone: usize },
}

pub type TheoryResult<T> = Result<T, TheoryError>;
