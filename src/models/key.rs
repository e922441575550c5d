//! Keys: a tonic pitchname plus its accidental signature
//!
//! A key is always the major pattern of the reference natural scale built on
//! its tonic. Modes and other scales are layered on top of it by the scale
//! builder.

use serde::Serialize;
use std::fmt;

use crate::errors::{TheoryError, TheoryResult};
use crate::schema::Schema;

/// Only built through [`Key::new`], so the accidentals always match the
/// schema's letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    tonic: String,
    pitchclass: i32,
    /// Letter slot of the tonic within the setting's symbols
    letter: usize,
    /// One accidental per letter, starting from the tonic's letter
    accidentals: Vec<i32>,
}

impl Key {
    pub fn new(schema: &Schema, tonic: &str) -> TheoryResult<Key> {
        let accidentals = schema.generate_key_accidentals(tonic)?;
        // generate_key_accidentals already rejected anything that is not a pitchname
        let spelling = schema
            .spelling(tonic)
            .ok_or_else(|| TheoryError::InvalidPitchname(tonic.to_string()))?;
        Ok(Key {
            tonic: tonic.to_string(),
            pitchclass: spelling.pitchclass,
            letter: spelling.letter,
            accidentals,
        })
    }

    pub fn tonic(&self) -> &str {
        &self.tonic
    }

    pub fn pitchclass(&self) -> i32 {
        self.pitchclass
    }

    pub fn letter(&self) -> usize {
        self.letter
    }

    /// Accidental per scale degree (degree 0 = tonic)
    pub fn accidentals(&self) -> &[i32] {
        &self.accidentals
    }

    /// Accidental per letter in symbol order (C D E F G A B by default)
    pub fn signature(&self) -> Vec<i32> {
        let letters = self.accidentals.len();
        let mut signature = vec![0; letters];
        for (degree, &accidental) in self.accidentals.iter().enumerate() {
            signature[(self.letter + degree) % letters] = accidental;
        }
        signature
    }

    /// Spelled pitchnames of the key's scale, tonic first
    pub fn pitchnames(&self, schema: &Schema) -> TheoryResult<Vec<String>> {
        let semitone = schema.semitone() as i32;
        schema
            .positions()
            .iter()
            .zip(&self.accidentals)
            .map(|(&position, &accidental)| {
                let pitchclass = (self.pitchclass + position as i32).rem_euclid(semitone);
                schema
                    .convert_pitchclass_to_pitchname(pitchclass, accidental)?
                    .ok_or_else(|| TheoryError::InvalidKey {
                        tonic: self.tonic.clone(),
                        reason: format!("no spelling for pitchclass {}", pitchclass),
                    })
            })
            .collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tonic)
    }
}
