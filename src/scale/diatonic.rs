use serde::Serialize;
use std::fmt;

use super::{Scale, ScaleStructure};
use crate::errors::{TheoryError, TheoryResult};
use crate::models::{Key, Mode};
use crate::schema::Schema;
use crate::utils::rotate;

/// A mode of the reference natural scale on a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiatonicScale {
    mode: Mode,
    #[serde(flatten)]
    structure: ScaleStructure,
}

impl DiatonicScale {
    pub fn new(schema: &Schema, key: Key, mode: Mode) -> TheoryResult<DiatonicScale> {
        let reference = schema.intervals();
        if mode.rotation() >= reference.len() {
            return Err(TheoryError::InvalidScale(format!(
                "mode {} needs at least {} letters, setting has {}",
                mode,
                mode.rotation() + 1,
                reference.len()
            )));
        }
        let intervals = rotate(reference, mode.rotation());
        let structure = ScaleStructure::build(schema, key, intervals, None)?;
        Ok(DiatonicScale { mode, structure })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Scale for DiatonicScale {
    fn structure(&self) -> &ScaleStructure {
        &self.structure
    }
}

impl fmt::Display for DiatonicScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.structure.key, self.mode)
    }
}
