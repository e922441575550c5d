//! Scales built on a key
//!
//! Every scale is a key plus a step pattern. Each degree gets its own letter
//! slot (an offset from the tonic's letter), and its spelled accidental is the
//! key's accidental on that letter plus the degree's accidental relative to
//! the reference natural pattern.
//!
//! - `DiatonicScale`: a mode, i.e. a rotation of the reference pattern
//! - `NondiatonicScale`: any pattern, with an optional explicit accidental list
//! - `ScalePattern`: a few named 12-tone patterns

pub mod diatonic;
pub mod nondiatonic;
pub mod patterns;

pub use diatonic::DiatonicScale;
pub use nondiatonic::NondiatonicScale;
pub use patterns::{predefined_patterns, ScalePattern};

use serde::Serialize;

use crate::errors::{TheoryError, TheoryResult};
use crate::models::{Key, Note, PitchClass};
use crate::schema::Schema;
use crate::utils::positions_of;

/// Everything derived when a scale is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleStructure {
    pub key: Key,
    pub semitone: usize,
    pub intervals: Vec<usize>,
    pub positions: Vec<usize>,
    /// Accidental of each degree relative to the reference pattern
    pub accidentals: Vec<i32>,
    /// Letter slot of each degree, counted from the tonic's letter
    pub slots: Vec<usize>,
    /// Accidental actually written on each degree
    pub signatures: Vec<i32>,
    pub components: Vec<PitchClass>,
}

impl ScaleStructure {
    /// Build the structure, assigning letters automatically unless
    /// `accidentals` pins them
    pub(crate) fn build(
        schema: &Schema,
        key: Key,
        intervals: Vec<usize>,
        accidentals: Option<Vec<i32>>,
    ) -> TheoryResult<ScaleStructure> {
        let (slots, accidentals) = match accidentals {
            None => schema.assign_scale_letters(&intervals)?,
            Some(accidentals) => {
                let slots = slots_from_accidentals(schema, &intervals, &accidentals)?;
                (slots, accidentals)
            }
        };

        let positions = positions_of(&intervals);
        let semitone = schema.semitone();
        let limit = schema.accidental_limit() as i32;

        let mut signatures = Vec::with_capacity(slots.len());
        let mut components = Vec::with_capacity(slots.len());
        for (degree, (&slot, &accidental)) in slots.iter().zip(&accidentals).enumerate() {
            let key_accidental = key.accidentals().get(slot).copied().ok_or_else(|| {
                TheoryError::InvalidScale(format!("key {} has no letter slot {}", key, slot))
            })?;
            let signature = key_accidental + accidental;
            if signature.abs() > limit {
                return Err(TheoryError::InvalidScale(format!(
                    "degree {} of {} would need {} accidentals (limit {})",
                    degree + 1,
                    key,
                    signature,
                    limit
                )));
            }
            let pitchclass = (key.pitchclass() as i64 + positions[degree] as i64)
                .rem_euclid(semitone as i64) as i32;
            let pitchname = schema
                .convert_pitchclass_to_pitchname(pitchclass, signature)?
                .ok_or_else(|| {
                    TheoryError::InvalidScale(format!(
                        "no spelling for pitchclass {} with {} accidentals",
                        pitchclass, signature
                    ))
                })?;
            signatures.push(signature);
            components.push(PitchClass::from_pitchname(schema, &pitchname)?);
        }

        log::debug!(
            "Built scale on {}: {:?} → {:?}",
            key,
            intervals,
            components.iter().map(|c| c.to_string()).collect::<Vec<_>>()
        );

        Ok(ScaleStructure {
            key,
            semitone,
            intervals,
            positions,
            accidentals,
            slots,
            signatures,
            components,
        })
    }
}

/// Recover the letter slot of each degree from explicit accidentals
///
/// Degree `d` sits on the slot whose reference position equals
/// `position[d] - accidental[d]`; slots must start at 0 and strictly increase.
fn slots_from_accidentals(schema: &Schema, intervals: &[usize], accidentals: &[i32]) -> TheoryResult<Vec<usize>> {
    schema.check_scale_pattern(intervals)?;
    if accidentals.len() != intervals.len() {
        return Err(TheoryError::InvalidScale(format!(
            "{} accidentals for {} degrees",
            accidentals.len(),
            intervals.len()
        )));
    }
    let limit = schema.accidental_limit() as i64;
    let reference = schema.positions();
    let positions = positions_of(intervals);

    let mut slots: Vec<usize> = Vec::with_capacity(positions.len());
    for (degree, (&position, &accidental)) in positions.iter().zip(accidentals).enumerate() {
        if (accidental as i64).abs() > limit {
            return Err(TheoryError::InvalidScale(format!(
                "accidental {} on degree {} exceeds limit {}",
                accidental,
                degree + 1,
                limit
            )));
        }
        let natural = position as i64 - accidental as i64;
        let slot = reference
            .iter()
            .position(|&p| p as i64 == natural)
            .ok_or_else(|| {
                TheoryError::InvalidScale(format!(
                    "degree {} does not land on a letter with accidental {}",
                    degree + 1,
                    accidental
                ))
            })?;
        let in_order = match slots.last() {
            None => slot == 0,
            Some(&prev) => slot > prev,
        };
        if !in_order {
            return Err(TheoryError::InvalidScale(format!(
                "accidentals {:?} reuse or reorder letters",
                accidentals
            )));
        }
        slots.push(slot);
    }
    Ok(slots)
}

/// Shared behavior of diatonic and nondiatonic scales
pub trait Scale {
    fn structure(&self) -> &ScaleStructure;

    fn key(&self) -> &Key {
        &self.structure().key
    }

    fn intervals(&self) -> &[usize] {
        &self.structure().intervals
    }

    fn positions(&self) -> &[usize] {
        &self.structure().positions
    }

    fn accidentals(&self) -> &[i32] {
        &self.structure().accidentals
    }

    fn slots(&self) -> &[usize] {
        &self.structure().slots
    }

    fn signatures(&self) -> &[i32] {
        &self.structure().signatures
    }

    fn components(&self) -> &[PitchClass] {
        &self.structure().components
    }

    /// Spelled pitchnames, tonic first
    fn pitchnames(&self) -> Vec<String> {
        self.components().iter().map(|c| c.to_string()).collect()
    }

    /// Degree (0 = tonic) whose pitch class is `pitchclass`
    fn degree_of(&self, pitchclass: i32) -> Option<usize> {
        self.components().iter().position(|c| c.pitchclass() == pitchclass)
    }

    fn spell_pitchclass(&self, pitchclass: i32) -> Option<String> {
        self.degree_of(pitchclass)
            .and_then(|degree| self.components()[degree].pitchname().map(str::to_string))
    }

    fn spell_notenumber(&self, schema: &Schema, notenumber: i32) -> TheoryResult<Option<String>> {
        let pitchclass = schema.convert_notenumber_to_pitchclass(notenumber);
        match self.degree_of(pitchclass) {
            Some(degree) => schema.convert_notenumber_to_notename(notenumber, self.signatures()[degree]),
            None => Ok(None),
        }
    }

    /// Spelled notes of one octave, the tonic in notename octave `octave`
    fn notes(&self, schema: &Schema, octave: i32) -> TheoryResult<Vec<Note>> {
        let tonic = schema.convert_pitchname_to_notename(self.key().tonic(), octave)?;
        let base = schema.convert_notename_to_notenumber(&tonic)? as i64;
        self.positions()
            .iter()
            .zip(self.signatures())
            .map(|(&position, &signature)| {
                let target = base + position as i64;
                let notenumber = i32::try_from(target).map_err(|_| TheoryError::InvalidNotenumber(target))?;
                let notename = schema
                    .convert_notenumber_to_notename(notenumber, signature)?
                    .ok_or(TheoryError::InvalidNotenumber(target))?;
                Note::from_notenumber(schema, notenumber)?.with_notename(&notename)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mode, TonalSetting};
    use crate::utils::rotate;

    /// Every composition of `total` into at most `max_parts` positive parts
    fn compositions(total: usize, max_parts: usize) -> Vec<Vec<usize>> {
        fn extend(rest: usize, max_parts: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if rest == 0 {
                out.push(current.clone());
                return;
            }
            if current.len() == max_parts {
                return;
            }
            for step in 1..=rest {
                current.push(step);
                extend(rest - step, max_parts, current, out);
                current.pop();
            }
        }
        let mut out = Vec::new();
        extend(total, max_parts, &mut Vec::new(), &mut out);
        out
    }

    #[test]
    fn test_every_pattern_uses_distinct_letters() {
        let schema = Schema::standard();
        let key = schema.key("C").unwrap();
        let patterns = compositions(12, 7);
        assert!(patterns.len() > 1000);
        let mut spelled = 0;
        for intervals in patterns {
            let scale = match NondiatonicScale::new(schema, key.clone(), intervals.clone()) {
                Ok(scale) => scale,
                Err(err) => {
                    assert!(matches!(err, TheoryError::InvalidScale(_)), "{:?}: {}", intervals, err);
                    continue;
                }
            };
            spelled += 1;
            let slots = scale.slots();
            assert_eq!(slots[0], 0);
            assert!(slots.windows(2).all(|w| w[0] < w[1]), "{:?} → {:?}", intervals, slots);
            let letters: Vec<char> = scale
                .pitchnames()
                .iter()
                .map(|n| n.chars().next().unwrap())
                .collect();
            let mut unique = letters.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), letters.len(), "{:?}", letters);
        }
        // Every two-step pattern spells, and nearly every three- and four-step one
        assert!(spelled >= 150, "only {} patterns spelled", spelled);
        for rotation in 0..7 {
            let intervals = rotate(&[2, 2, 1, 2, 2, 2, 1], rotation);
            assert!(NondiatonicScale::new(schema, key.clone(), intervals).is_ok(), "rotation {}", rotation);
        }
    }

    #[test]
    fn test_key_from_smaller_setting_is_rejected() {
        let mut setting = TonalSetting::default();
        setting.semitone = 5;
        setting.pitchclass.intervals = vec![1, 1, 1, 1, 1];
        setting.pitchclass.symbols = ["P", "Q", "R", "S", "T"].iter().map(|s| s.to_string()).collect();
        let small = Schema::new(setting).unwrap();
        let key = small.key("P").unwrap();
        assert_eq!(key.accidentals().len(), 5);

        let schema = Schema::standard();
        assert!(matches!(
            DiatonicScale::new(schema, key.clone(), Mode::Ionian),
            Err(TheoryError::InvalidScale(_))
        ));
        assert!(matches!(
            NondiatonicScale::new(schema, key, vec![2, 2, 1, 2, 2, 2, 1]),
            Err(TheoryError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_seven_step_patterns_always_spell() {
        let schema = Schema::standard();
        let key = schema.key("C").unwrap();
        for intervals in compositions(12, 7).into_iter().filter(|p| p.len() == 7) {
            // With seven degrees the assignment is the identity
            if let Ok(scale) = NondiatonicScale::new(schema, key.clone(), intervals.clone()) {
                assert_eq!(scale.slots(), &[0, 1, 2, 3, 4, 5, 6]);
            }
        }
    }

    #[test]
    fn test_explicit_accidentals_reject_shared_letters() {
        let schema = Schema::standard();
        let key = schema.key("C").unwrap();
        // C C# D: C# as a raised C shares the tonic's letter
        let result = NondiatonicScale::with_accidentals(schema, key.clone(), vec![1, 1, 10], vec![0, 1, 0]);
        assert!(matches!(result, Err(TheoryError::InvalidScale(_))));
        // C Db D is fine
        let scale = NondiatonicScale::with_accidentals(schema, key, vec![1, 1, 10], vec![0, -1, -2]).unwrap();
        assert_eq!(scale.pitchnames(), vec!["C", "Db", "Ebb"]);
    }

    #[test]
    fn test_explicit_accidentals_length_mismatch() {
        let schema = Schema::standard();
        let key = schema.key("C").unwrap();
        let result = NondiatonicScale::with_accidentals(schema, key, vec![2, 2, 1, 2, 2, 2, 1], vec![0; 6]);
        assert!(matches!(result, Err(TheoryError::InvalidScale(_))));
    }

    #[test]
    fn test_spelling_beyond_limit_fails_whole_scale() {
        let schema = Schema::standard();
        // D# major already has F##; raising the third would need F###
        let key = schema.key("D#").unwrap();
        let result = NondiatonicScale::new(schema, key, vec![2, 3, 1, 1, 2, 2, 1]);
        assert!(matches!(result, Err(TheoryError::InvalidScale(_))));
    }

    #[test]
    fn test_spell_notenumber_in_context() {
        let schema = Schema::standard();
        let scale = DiatonicScale::new(schema, schema.key("F").unwrap(), crate::models::Mode::Ionian).unwrap();
        assert_eq!(scale.spell_notenumber(schema, 70).unwrap().as_deref(), Some("Bb4"));
        assert_eq!(scale.spell_notenumber(schema, 71).unwrap(), None);
        assert_eq!(scale.spell_pitchclass(10).as_deref(), Some("Bb"));
    }

    #[test]
    fn test_notes_start_at_tonic_octave() {
        let schema = Schema::standard();
        let scale = DiatonicScale::new(schema, schema.key("B").unwrap(), crate::models::Mode::Ionian).unwrap();
        let names: Vec<String> = scale.notes(schema, 3).unwrap().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["B3", "C#4", "D#4", "E4", "F#4", "G#4", "A#4"]);
        assert_eq!(scale.notes(schema, 3).unwrap()[0].notenumber(), 59);
    }

    #[test]
    fn test_quarter_tone_scale() {
        let schema = Schema::new(TonalSetting::tet24()).unwrap();
        let key = schema.key("C").unwrap();
        let scale = NondiatonicScale::new(&schema, key, vec![4, 3, 3, 4, 4, 4, 2]).unwrap();
        // Neutral third: E lowered by one quarter-tone mark
        assert_eq!(scale.pitchnames()[2], "Eb");
        assert_eq!(scale.components()[2].pitchclass(), 7);
    }
}
