//! Tonal configuration
//!
//! A `TonalSetting` describes one tonal system: how many semitones make an
//! octave, the natural letter alphabet laid over them, how accidentals are
//! written, where the octave numbering starts and which frequency anchors the
//! tuning. It is loaded once (JSON or YAML), validated, and then handed to
//! `Schema::new`, which never mutates it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SettingError;
use crate::models::accidental::AccidentalPreference;

/// Largest supported number of pitch classes per octave
pub const MAX_SEMITONE: usize = 1200;

/// Complete tonal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TonalSetting {
    /// Number of semitones per octave
    pub semitone: usize,
    pub pitchclass: PitchClassSetting,
    pub note: NoteSetting,
    pub tuner: TunerSetting,
    /// Interval tuple → quality name table, consulted after the built-in book
    pub qualities: Vec<QualityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PitchClassSetting {
    /// Step pattern of the natural (letter) scale, summing to `semitone`
    pub intervals: Vec<usize>,
    /// One letter symbol per step of `intervals`
    pub symbols: Vec<String>,
    pub accidental: AccidentalSetting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccidentalSetting {
    /// Maximum number of marks on one pitchname
    pub limit: usize,
    pub sharp: String,
    pub flat: String,
    pub preference: AccidentalPreference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoteSetting {
    /// Octave number of notenumbers `0..semitone`
    pub reference_octave: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TunerSetting {
    /// Notenumber sounding at `root_hz`
    pub root_notenumber: i32,
    pub root_hz: f64,
    /// Notenumber on which non-equal ratio tables are built
    pub reference_notenumber: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityEntry {
    pub name: String,
    pub intervals: Vec<i32>,
}

impl Default for AccidentalSetting {
    fn default() -> Self {
        Self {
            limit: 2,
            sharp: "#".to_string(),
            flat: "b".to_string(),
            preference: AccidentalPreference::Sharp,
        }
    }
}

impl Default for PitchClassSetting {
    fn default() -> Self {
        Self {
            intervals: vec![2, 2, 1, 2, 2, 2, 1],
            symbols: letters(),
            accidental: AccidentalSetting::default(),
        }
    }
}

impl Default for NoteSetting {
    fn default() -> Self {
        Self { reference_octave: -1 }
    }
}

impl Default for TunerSetting {
    fn default() -> Self {
        Self {
            root_notenumber: 69,
            root_hz: 440.0,
            reference_notenumber: 60,
        }
    }
}

impl Default for TonalSetting {
    fn default() -> Self {
        Self {
            semitone: 12,
            pitchclass: PitchClassSetting::default(),
            note: NoteSetting::default(),
            tuner: TunerSetting::default(),
            qualities: Vec::new(),
        }
    }
}

fn letters() -> Vec<String> {
    ["C", "D", "E", "F", "G", "A", "B"].iter().map(|s| s.to_string()).collect()
}

impl TonalSetting {
    /// Standard 12-tone equal temperament (A4 = 69 = 440 Hz)
    pub fn tet12() -> Self {
        Self::default()
    }

    /// 24-tone system: every accidental mark moves a quarter tone
    pub fn tet24() -> Self {
        Self {
            semitone: 24,
            pitchclass: PitchClassSetting {
                intervals: vec![4, 4, 2, 4, 4, 4, 2],
                symbols: letters(),
                accidental: AccidentalSetting {
                    limit: 3,
                    ..AccidentalSetting::default()
                },
            },
            note: NoteSetting::default(),
            tuner: TunerSetting {
                root_notenumber: 138,
                root_hz: 440.0,
                reference_notenumber: 120,
            },
            qualities: Vec::new(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingError> {
        let setting: TonalSetting = serde_json::from_str(text)?;
        setting.validate()?;
        Ok(setting)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SettingError> {
        let setting: TonalSetting = serde_yaml::from_str(text)?;
        setting.validate()?;
        Ok(setting)
    }

    /// Load a setting file, choosing the format from its extension
    /// (`.json`, `.yaml` or `.yml`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let text = fs::read_to_string(path)?;
        log::debug!("Loading tonal setting from {}", path.display());
        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Err(SettingError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Check every structural invariant of the configuration
    pub fn validate(&self) -> Result<(), SettingError> {
        self.check().map_err(|reason| {
            log::warn!("Rejected tonal setting: {}", reason);
            SettingError::Invalid(reason)
        })
    }

    fn check(&self) -> Result<(), String> {
        let pc = &self.pitchclass;
        if self.semitone == 0 || self.semitone > MAX_SEMITONE {
            return Err(format!(
                "semitone must be between 1 and {}, found {}",
                MAX_SEMITONE, self.semitone
            ));
        }
        if pc.intervals.is_empty() {
            return Err("pitchclass.intervals must not be empty".to_string());
        }
        if pc.intervals.iter().any(|&step| step == 0 || step > self.semitone) {
            return Err("pitchclass.intervals steps must be between 1 and semitone".to_string());
        }
        let total: usize = pc.intervals.iter().sum();
        if total != self.semitone {
            return Err(format!(
                "pitchclass.intervals sum to {} but semitone is {}",
                total, self.semitone
            ));
        }
        if pc.symbols.len() != pc.intervals.len() {
            return Err(format!(
                "expected {} symbols, found {}",
                pc.intervals.len(),
                pc.symbols.len()
            ));
        }
        let mut seen = HashSet::new();
        for symbol in &pc.symbols {
            check_token("symbol", symbol)?;
            if !seen.insert(symbol.as_str()) {
                return Err(format!("duplicate symbol '{}'", symbol));
            }
        }
        let acc = &pc.accidental;
        if acc.limit >= self.semitone {
            return Err(format!(
                "accidental limit {} must be below semitone {}",
                acc.limit, self.semitone
            ));
        }
        check_token("sharp mark", &acc.sharp)?;
        check_token("flat mark", &acc.flat)?;
        if acc.sharp == acc.flat {
            return Err("sharp and flat marks must differ".to_string());
        }
        if !(self.tuner.root_hz.is_finite() && self.tuner.root_hz > 0.0) {
            return Err(format!("root_hz must be positive, found {}", self.tuner.root_hz));
        }
        for entry in &self.qualities {
            if entry.name.is_empty() {
                return Err("quality names must not be empty".to_string());
            }
            // A slash introduces the bass in chord symbols
            if entry.name.contains('/') {
                return Err(format!("quality name '{}' may not contain '/'", entry.name));
            }
            if entry.intervals.is_empty() || entry.intervals.iter().any(|&i| i < 0) {
                return Err(format!(
                    "quality '{}' needs non-negative intervals",
                    entry.name
                ));
            }
        }
        Ok(())
    }
}

/// Symbols and marks are spliced into notenames, so they must stay clear of
/// the octave number syntax.
fn check_token(what: &str, token: &str) -> Result<(), String> {
    if token.is_empty() {
        return Err(format!("{} must not be empty", what));
    }
    if token.chars().any(|c| c.is_ascii_digit()) || token.contains('-') || token.contains('/') {
        return Err(format!("{} '{}' may not contain digits, '-' or '/'", what, token));
    }
    Ok(())
}
