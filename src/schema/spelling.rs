// Key and scale accidental generation
//
// Both algorithms give every degree its own letter. A key always uses all
// letters in order from the tonic's letter; a scale pattern picks a strictly
// increasing subset of letter slots, starting at slot 0 for the tonic.

use super::Schema;
use crate::errors::{TheoryError, TheoryResult};
use crate::utils::{positions_of, signed_offset};

/// Lexicographic cost of a letter assignment:
/// (non-zero accidentals, accidentals against the preference, total size)
type SlotCost = (usize, usize, i64);

impl Schema {
    /// Accidental on each letter of the major key built on `pitchname`,
    /// starting from the tonic's own letter
    ///
    /// F → `[0, 0, 0, -1, 0, 0, 0]` (F G A Bb C D E)
    pub fn generate_key_accidentals(&self, pitchname: &str) -> TheoryResult<Vec<i32>> {
        let tonic = self
            .spelling(pitchname)
            .ok_or_else(|| TheoryError::InvalidPitchname(pitchname.to_string()))?;
        let semitone = self.semitone() as i64;
        let letters = self.positions.len();
        let limit = self.accidental_limit() as i64;

        let mut accidentals = Vec::with_capacity(letters);
        for (degree, &reference) in self.positions.iter().enumerate() {
            let letter = (tonic.letter + degree) % letters;
            let natural = self.positions[letter] as i64;
            let required = (tonic.pitchclass as i64 + reference as i64).rem_euclid(semitone);
            let accidental = signed_offset(required, natural, semitone, self.preference());
            if accidental.abs() > limit {
                return Err(TheoryError::InvalidKey {
                    tonic: pitchname.to_string(),
                    reason: format!(
                        "letter '{}' would need {} accidentals (limit {})",
                        self.symbols()[letter],
                        accidental,
                        limit
                    ),
                });
            }
            accidentals.push(accidental as i32);
        }
        log::debug!("Key accidentals for '{}': {:?}", pitchname, accidentals);
        Ok(accidentals)
    }

    /// Accidental of each degree of `intervals` relative to the reference
    /// natural pattern, after assigning each degree its own letter slot
    ///
    /// Harmonic minor `[2, 1, 2, 2, 1, 3, 1]` → `[0, 0, -1, 0, 0, -1, 0]`
    pub fn generate_scale_accidentals(&self, intervals: &[usize]) -> TheoryResult<Vec<i32>> {
        self.assign_scale_letters(intervals).map(|(_, accidentals)| accidentals)
    }

    /// Reject step patterns that cannot describe one octave of this system
    pub(crate) fn check_scale_pattern(&self, intervals: &[usize]) -> TheoryResult<()> {
        if intervals.is_empty() {
            return Err(TheoryError::InvalidScale("empty interval pattern".to_string()));
        }
        if intervals.iter().any(|&step| step == 0) {
            return Err(TheoryError::InvalidScale(format!(
                "zero step in {:?}",
                intervals
            )));
        }
        let total: usize = intervals.iter().sum();
        if total != self.semitone() {
            return Err(TheoryError::InvalidScale(format!(
                "{:?} spans {} steps, expected {}",
                intervals,
                total,
                self.semitone()
            )));
        }
        if intervals.len() > self.positions.len() {
            return Err(TheoryError::InvalidScale(format!(
                "{} degrees cannot each take one of {} letters",
                intervals.len(),
                self.positions.len()
            )));
        }
        Ok(())
    }

    /// Letter slot and relative accidental for each degree
    ///
    /// Dynamic program over (degree, slot): slots strictly increase, every
    /// accidental stays within the limit, and the cheapest `SlotCost` wins.
    /// Remaining ties go to the lower slot.
    pub(crate) fn assign_scale_letters(&self, intervals: &[usize]) -> TheoryResult<(Vec<usize>, Vec<i32>)> {
        self.check_scale_pattern(intervals)?;

        let positions = positions_of(intervals);
        let reference = &self.positions;
        let degrees = positions.len();
        let letters = reference.len();
        let limit = self.accidental_limit() as i64;
        let preference = self.preference();

        let accidental_at = |degree: usize, slot: usize| positions[degree] as i64 - reference[slot] as i64;

        // table[d][j] = best (cost, previous slot) with degree d on slot j
        let mut table: Vec<Vec<Option<(SlotCost, usize)>>> = vec![vec![None; letters]; degrees];
        table[0][0] = Some(((0, 0, 0), 0));

        for d in 1..degrees {
            for j in d..=(letters - (degrees - d)) {
                let accidental = accidental_at(d, j);
                if accidental.abs() > limit {
                    continue;
                }
                let step: SlotCost = (
                    usize::from(accidental != 0),
                    usize::from(preference.opposes(accidental as i32)),
                    accidental.abs(),
                );
                table[d][j] = (d - 1..j)
                    .filter_map(|prev| table[d - 1][prev].map(|(cost, _)| (cost, prev)))
                    .map(|(cost, prev)| ((cost.0 + step.0, cost.1 + step.1, cost.2 + step.2), prev))
                    .min_by_key(|&(cost, prev)| (cost, prev));
            }
        }

        let last = (0..letters)
            .filter_map(|j| table[degrees - 1][j].map(|(cost, _)| (cost, j)))
            .min_by_key(|&(cost, j)| (cost, j))
            .map(|(_, j)| j)
            .ok_or_else(|| {
                TheoryError::InvalidScale(format!(
                    "{:?} has no letter assignment within {} accidentals",
                    intervals, limit
                ))
            })?;

        let mut slots = vec![0usize; degrees];
        slots[degrees - 1] = last;
        for d in (1..degrees).rev() {
            if let Some((_, prev)) = table[d][slots[d]] {
                slots[d - 1] = prev;
            }
        }
        let accidentals = slots
            .iter()
            .enumerate()
            .map(|(d, &slot)| accidental_at(d, slot) as i32)
            .collect::<Vec<_>>();

        log::trace!("Letter slots for {:?}: {:?} ({:?})", intervals, slots, accidentals);
        Ok((slots, accidentals))
    }
}
