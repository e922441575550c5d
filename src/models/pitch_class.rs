//! Pitch class value object
//!
//! Carries the pitch class, every spelling it has, and optionally the one
//! spelling chosen for it (from the input pitchname or from a scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TheoryError, TheoryResult};
use crate::scale::Scale;
use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClass {
    pitchclass: i32,
    pitchname: Option<String>,
    pitchnames: Vec<String>,
}

impl PitchClass {
    pub fn from_pitchclass(schema: &Schema, pitchclass: i32) -> TheoryResult<PitchClass> {
        let pitchnames = schema
            .convert_pitchclass_to_pitchnames(pitchclass)?
            .iter()
            .flatten()
            .cloned()
            .collect();
        Ok(PitchClass {
            pitchclass,
            pitchname: None,
            pitchnames,
        })
    }

    pub fn from_pitchname(schema: &Schema, pitchname: &str) -> TheoryResult<PitchClass> {
        let pitchclass = schema.convert_pitchname_to_pitchclass(pitchname)?;
        let mut pc = Self::from_pitchclass(schema, pitchclass)?;
        pc.pitchname = Some(pitchname.to_string());
        Ok(pc)
    }

    pub fn pitchclass(&self) -> i32 {
        self.pitchclass
    }

    pub fn pitchname(&self) -> Option<&str> {
        self.pitchname.as_deref()
    }

    pub fn pitchnames(&self) -> &[String] {
        &self.pitchnames
    }

    /// Same pitch class, respelled; only its own enharmonic spellings are accepted
    pub fn with_pitchname(&self, pitchname: &str) -> TheoryResult<PitchClass> {
        if !self.pitchnames.iter().any(|n| n == pitchname) {
            return Err(TheoryError::InvalidPitchname(pitchname.to_string()));
        }
        Ok(PitchClass {
            pitchname: Some(pitchname.to_string()),
            ..self.clone()
        })
    }

    /// Move by `steps` around the octave; the result carries no chosen spelling
    pub fn transpose(&self, schema: &Schema, steps: i32) -> TheoryResult<PitchClass> {
        let semitone = schema.semitone() as i64;
        let pitchclass = (self.pitchclass as i64 + steps as i64).rem_euclid(semitone) as i32;
        Self::from_pitchclass(schema, pitchclass)
    }

    /// Respell as the scale does, if the pitch class is one of its degrees
    pub fn in_scale<S: Scale + ?Sized>(&self, scale: &S) -> PitchClass {
        match scale.spell_pitchclass(self.pitchclass) {
            Some(name) => PitchClass {
                pitchname: Some(name),
                ..self.clone()
            },
            None => self.clone(),
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pitchname {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.pitchclass),
        }
    }
}
