//! Chords: a root, a quality and an optional slash bass
//!
//! Positions are semitone offsets from the root. Upper voices take the
//! quality's intervals as they are; a slash bass sits below the root (a full
//! octave below when it names the root itself) and any upper voice sharing
//! its pitch class is dropped.

pub mod book;
pub mod components;
pub mod quality;

pub use components::{QualityComponent, QualityPart, Variation};
pub use quality::Quality;

use serde::Serialize;
use std::fmt;

use crate::errors::{TheoryError, TheoryResult};
use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    root: String,
    /// Set when the root was given as a notename
    root_notenumber: Option<i32>,
    quality: Quality,
    on: Option<String>,
    /// Bass first, then upper voices in quality order
    pitchclasses: Vec<i32>,
    positions: Vec<i32>,
}

impl Chord {
    /// `root` is a pitchname or a notename; `on` is a pitchname
    pub fn new(schema: &Schema, root: &str, quality: Quality, on: Option<&str>) -> TheoryResult<Chord> {
        let (pitchname, root_notenumber) = if schema.is_pitchname(root) {
            (root.to_string(), None)
        } else if let Some(parts) = schema.parse_notename(root) {
            (parts.pitchname.to_string(), Some(parts.notenumber))
        } else {
            return Err(TheoryError::InvalidRoot(root.to_string()));
        };
        let root_pc = schema.convert_pitchname_to_pitchclass(&pitchname)? as i64;
        let semitone = schema.semitone() as i64;
        let pitchclass_of = |position: i32| (root_pc + position as i64).rem_euclid(semitone) as i32;

        let mut positions: Vec<i32> = quality.intervals().to_vec();
        if let Some(bass) = on {
            let bass_pc = schema
                .convert_pitchname_to_pitchclass(bass)
                .map_err(|_| TheoryError::InvalidBass(bass.to_string()))? as i64;
            let below = (root_pc - bass_pc).rem_euclid(semitone);
            let bass_position = (if below == 0 { -semitone } else { -below }) as i32;
            positions.retain(|&p| pitchclass_of(p) as i64 != bass_pc);
            positions.insert(0, bass_position);
        }
        let pitchclasses = positions.iter().map(|&p| pitchclass_of(p)).collect();

        Ok(Chord {
            root: pitchname,
            root_notenumber,
            quality,
            on: on.map(str::to_string),
            pitchclasses,
            positions,
        })
    }

    /// Parse a chord symbol such as `Am7(b5)/E`
    ///
    /// The root is the longest pitchname prefix, the remainder up to an
    /// optional `/` names the quality.
    pub fn parse(schema: &Schema, symbol: &str) -> TheoryResult<Chord> {
        let (body, bass) = match symbol.rsplit_once('/') {
            Some((body, bass)) => (body, Some(bass)),
            None => (symbol, None),
        };
        let root = schema
            .find_pitchname(body)
            .ok_or_else(|| TheoryError::InvalidRoot(symbol.to_string()))?;
        let quality = Quality::named(schema, &body[root.len()..])?;
        Self::new(schema, root, quality, bass)
    }

    /// Whether `symbol` parses as a chord
    pub fn is_chord(schema: &Schema, symbol: &str) -> bool {
        Self::parse(schema, symbol).is_ok()
    }

    /// Chord symbol restated from its parts
    pub fn name(&self) -> String {
        match &self.on {
            Some(bass) => format!("{}{}/{}", self.root, self.quality.name(), bass),
            None => format!("{}{}", self.root, self.quality.name()),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_notenumber(&self) -> Option<i32> {
        self.root_notenumber
    }

    pub fn quality(&self) -> &Quality {
        &self.quality
    }

    pub fn on(&self) -> Option<&str> {
        self.on.as_deref()
    }

    pub fn pitchclasses(&self) -> &[i32] {
        &self.pitchclasses
    }

    pub fn positions(&self) -> &[i32] {
        &self.positions
    }

    /// Absolute notenumbers, when the root was placed in an octave
    pub fn notenumbers(&self) -> Option<TheoryResult<Vec<i32>>> {
        let root = self.root_notenumber? as i64;
        Some(
            self.positions
                .iter()
                .map(|&p| {
                    let n = root + p as i64;
                    i32::try_from(n).map_err(|_| TheoryError::InvalidNotenumber(n))
                })
                .collect(),
        )
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
