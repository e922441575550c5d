//! Note value object: a notenumber with its spellings

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TheoryError, TheoryResult};
use crate::models::PitchClass;
use crate::scale::Scale;
use crate::schema::Schema;
use crate::tuning::Tuner;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    notenumber: i32,
    notename: Option<String>,
    notenames: Vec<String>,
}

impl Note {
    pub fn from_notenumber(schema: &Schema, notenumber: i32) -> TheoryResult<Note> {
        Ok(Note {
            notenumber,
            notename: None,
            notenames: schema.convert_notenumber_to_notenames(notenumber)?,
        })
    }

    pub fn from_notename(schema: &Schema, notename: &str) -> TheoryResult<Note> {
        let notenumber = schema.convert_notename_to_notenumber(notename)?;
        let mut note = Self::from_notenumber(schema, notenumber)?;
        note.notename = Some(notename.to_string());
        Ok(note)
    }

    pub fn notenumber(&self) -> i32 {
        self.notenumber
    }

    pub fn notename(&self) -> Option<&str> {
        self.notename.as_deref()
    }

    pub fn notenames(&self) -> &[String] {
        &self.notenames
    }

    pub fn with_notename(&self, notename: &str) -> TheoryResult<Note> {
        if !self.notenames.iter().any(|n| n == notename) {
            return Err(TheoryError::InvalidNotename(notename.to_string()));
        }
        Ok(Note {
            notename: Some(notename.to_string()),
            ..self.clone()
        })
    }

    /// Shift by `steps`; fails if the result leaves the notenumber range
    pub fn transpose(&self, schema: &Schema, steps: i32) -> TheoryResult<Note> {
        let target = self.notenumber as i64 + steps as i64;
        let notenumber = i32::try_from(target).map_err(|_| TheoryError::InvalidNotenumber(target))?;
        Self::from_notenumber(schema, notenumber)
    }

    pub fn pitchclass(&self, schema: &Schema) -> TheoryResult<PitchClass> {
        let pitchclass = schema.convert_notenumber_to_pitchclass(self.notenumber);
        let pc = PitchClass::from_pitchclass(schema, pitchclass)?;
        match &self.notename {
            Some(notename) => pc.with_pitchname(&schema.convert_notename_to_pitchname(notename)?),
            None => Ok(pc),
        }
    }

    /// Respell as the scale does; notes outside the scale keep their spelling
    pub fn in_scale<S: Scale + ?Sized>(&self, schema: &Schema, scale: &S) -> TheoryResult<Note> {
        Ok(match scale.spell_notenumber(schema, self.notenumber)? {
            Some(notename) => Note {
                notename: Some(notename),
                ..self.clone()
            },
            None => self.clone(),
        })
    }

    pub fn hz(&self, tuner: &Tuner) -> f64 {
        tuner.hz(self.notenumber)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.notename {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.notenumber),
        }
    }
}
