use serde::Serialize;
use std::fmt;

use super::{Scale, ScalePattern, ScaleStructure};
use crate::errors::{TheoryError, TheoryResult};
use crate::models::Key;
use crate::schema::{Schema, STANDARD_SEMITONE};
use crate::utils::rotate;

/// A key with an arbitrary step pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NondiatonicScale {
    #[serde(flatten)]
    structure: ScaleStructure,
}

impl NondiatonicScale {
    /// Letters are assigned automatically
    pub fn new(schema: &Schema, key: Key, intervals: Vec<usize>) -> TheoryResult<NondiatonicScale> {
        let structure = ScaleStructure::build(schema, key, intervals, None)?;
        Ok(NondiatonicScale { structure })
    }

    /// Letters are pinned by one accidental per degree, relative to the
    /// reference natural pattern
    pub fn with_accidentals(
        schema: &Schema,
        key: Key,
        intervals: Vec<usize>,
        accidentals: Vec<i32>,
    ) -> TheoryResult<NondiatonicScale> {
        let structure = ScaleStructure::build(schema, key, intervals, Some(accidentals))?;
        Ok(NondiatonicScale { structure })
    }

    pub fn from_pattern(schema: &Schema, key: Key, pattern: ScalePattern) -> TheoryResult<NondiatonicScale> {
        if schema.semitone() != STANDARD_SEMITONE {
            return Err(TheoryError::InvalidScale(format!(
                "{} is defined for {} semitones, setting has {}",
                pattern,
                STANDARD_SEMITONE,
                schema.semitone()
            )));
        }
        Self::new(schema, key, pattern.intervals().to_vec())
    }

    /// The same pattern started on `degree`, keyed on that degree's spelling
    pub fn mode_of(&self, schema: &Schema, degree: usize) -> TheoryResult<NondiatonicScale> {
        let component = self.components().get(degree).ok_or_else(|| {
            TheoryError::InvalidScale(format!(
                "degree {} outside a {}-note scale",
                degree + 1,
                self.components().len()
            ))
        })?;
        let tonic = component
            .pitchname()
            .ok_or_else(|| TheoryError::InvalidScale(format!("degree {} is unspelled", degree + 1)))?;
        let key = schema.key(tonic)?;
        Self::new(schema, key, rotate(self.intervals(), degree))
    }
}

impl Scale for NondiatonicScale {
    fn structure(&self) -> &ScaleStructure {
        &self.structure
    }
}

impl fmt::Display for NondiatonicScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.structure.key, self.structure.intervals)
    }
}
