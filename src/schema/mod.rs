//! Conversion engine
//!
//! A `Schema` is built once from a validated `TonalSetting`. It derives the
//! spelling tables every conversion needs and then answers pure lookups:
//!
//! - pitchclass ↔ pitchname / symbol (`pitch.rs`)
//! - notenumber ↔ notename / pitchclass (`notes.rs`)
//! - key and scale accidental generation (`spelling.rs`)
//!
//! Spelling tables are indexed `[pitchclass][limit + accidental]`, so a row
//! always has `2 * limit + 1` entries and an entry is `None` where no letter
//! reaches that pitch class with that accidental.

mod notes;
mod pitch;
mod spelling;

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::errors::{SettingError, TheoryResult};
use crate::models::{AccidentalPreference, Key, TonalSetting};
use crate::utils::positions_of;

/// Semitone count of the standard tonal system
pub const STANDARD_SEMITONE: usize = 12;

static STANDARD: Lazy<Schema> = Lazy::new(|| {
    Schema::new(TonalSetting::tet12()).expect("standard 12-tone setting is valid")
});

/// How one pitchname is built: a letter slot plus a signed accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spelling {
    /// Index into the setting's symbols
    pub letter: usize,
    /// Positive = sharps, negative = flats
    pub accidental: i32,
    pub pitchclass: i32,
}

#[derive(Debug)]
pub struct Schema {
    setting: TonalSetting,
    /// Natural position of each letter within the octave
    positions: Vec<usize>,
    class2name: Vec<Vec<Option<String>>>,
    name2spelling: HashMap<String, Spelling>,
    /// All pitchnames ordered by pitchclass, then accidental
    pitchnames: Vec<String>,
    keys: RwLock<HashMap<String, Key>>,
}

impl Schema {
    pub fn new(setting: TonalSetting) -> Result<Schema, SettingError> {
        setting.validate()?;

        let semitone = setting.semitone;
        let limit = setting.pitchclass.accidental.limit;
        let positions = positions_of(&setting.pitchclass.intervals);

        let mut class2name = vec![vec![None; 2 * limit + 1]; semitone];
        let mut name2spelling = HashMap::new();

        for (letter, &natural) in positions.iter().enumerate() {
            for accidental in -(limit as i32)..=(limit as i32) {
                let name = format!(
                    "{}{}",
                    setting.pitchclass.symbols[letter],
                    marks(&setting, accidental)
                );
                let pitchclass = (natural as i64 + accidental as i64).rem_euclid(semitone as i64) as i32;
                let spelling = Spelling { letter, accidental, pitchclass };
                if name2spelling.insert(name.clone(), spelling).is_some() {
                    let reason = format!("pitchname '{}' is spelled two ways", name);
                    log::warn!("Rejected tonal setting: {}", reason);
                    return Err(SettingError::Invalid(reason));
                }
                class2name[pitchclass as usize][(limit as i32 + accidental) as usize] = Some(name);
            }
        }

        let pitchnames = class2name.iter().flatten().flatten().cloned().collect();

        log::debug!(
            "Built schema: {} semitones, {} letters, accidental limit {}",
            semitone,
            positions.len(),
            limit
        );

        Ok(Schema {
            setting,
            positions,
            class2name,
            name2spelling,
            pitchnames,
            keys: RwLock::new(HashMap::new()),
        })
    }

    /// Shared schema for the default 12-tone setting
    pub fn standard() -> &'static Schema {
        &STANDARD
    }

    pub fn setting(&self) -> &TonalSetting {
        &self.setting
    }

    pub fn semitone(&self) -> usize {
        self.setting.semitone
    }

    /// Step pattern of the natural letter scale
    pub fn intervals(&self) -> &[usize] {
        &self.setting.pitchclass.intervals
    }

    /// Natural position of each letter, starting from the first symbol
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn symbols(&self) -> &[String] {
        &self.setting.pitchclass.symbols
    }

    pub fn accidental_limit(&self) -> usize {
        self.setting.pitchclass.accidental.limit
    }

    pub fn preference(&self) -> AccidentalPreference {
        self.setting.pitchclass.accidental.preference
    }

    pub fn reference_octave(&self) -> i32 {
        self.setting.note.reference_octave
    }

    /// Every valid pitchname, ordered by pitchclass then accidental
    pub fn pitchnames(&self) -> &[String] {
        &self.pitchnames
    }

    pub fn pitchclasses(&self) -> impl Iterator<Item = i32> {
        0..self.semitone() as i32
    }

    /// Letter and accidental of a pitchname, if it is one
    pub fn spelling(&self, pitchname: &str) -> Option<Spelling> {
        self.name2spelling.get(pitchname).copied()
    }

    /// Memoized `Key::new`
    ///
    /// The memo is keyed by the full tonic pitchname; a poisoned lock just
    /// falls back to recomputation.
    pub fn key(&self, tonic: &str) -> TheoryResult<Key> {
        if let Some(key) = self.keys.read().ok().and_then(|keys| keys.get(tonic).cloned()) {
            return Ok(key);
        }
        log::debug!("Key memo miss for '{}'", tonic);
        let key = Key::new(self, tonic)?;
        if let Ok(mut keys) = self.keys.write() {
            keys.insert(tonic.to_string(), key.clone());
        }
        Ok(key)
    }

    fn table_index(&self, accidental: i32) -> Option<usize> {
        let limit = self.accidental_limit() as i64;
        let accidental = accidental as i64;
        if accidental.abs() > limit {
            None
        } else {
            Some((limit + accidental) as usize)
        }
    }
}

fn marks(setting: &TonalSetting, accidental: i32) -> String {
    let acc = &setting.pitchclass.accidental;
    if accidental >= 0 {
        acc.sharp.repeat(accidental as usize)
    } else {
        acc.flat.repeat(accidental.unsigned_abs() as usize)
    }
}
