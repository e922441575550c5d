//! Small modular-arithmetic helpers shared by the schema and the scale builder

use crate::models::AccidentalPreference;

/// Signed shortest distance from `natural` to `target` on a cycle of `semitone` steps.
///
/// The result lies in `(-semitone/2, semitone/2]` under a sharp preference and
/// `[-semitone/2, semitone/2)` under a flat preference; only an exact
/// half-cycle distance is affected by the preference.
pub fn signed_offset(target: i64, natural: i64, semitone: i64, preference: AccidentalPreference) -> i64 {
    let d = (target - natural).rem_euclid(semitone);
    if 2 * d < semitone {
        d
    } else if 2 * d > semitone {
        d - semitone
    } else {
        match preference {
            AccidentalPreference::Sharp => d,
            AccidentalPreference::Flat => d - semitone,
        }
    }
}

/// Running sum starting at zero, excluding the closing step
///
/// `[2, 2, 1, 2, 2, 2, 1]` → `[0, 2, 4, 5, 7, 9, 11]`
pub fn positions_of(intervals: &[usize]) -> Vec<usize> {
    let mut acc = 0usize;
    intervals
        .iter()
        .map(|&step| {
            let pos = acc;
            acc += step;
            pos
        })
        .collect()
}

/// Rotate a step pattern left by `shift` places
pub fn rotate(intervals: &[usize], shift: usize) -> Vec<usize> {
    if intervals.is_empty() {
        return Vec::new();
    }
    let shift = shift % intervals.len();
    intervals[shift..]
        .iter()
        .chain(intervals[..shift].iter())
        .copied()
        .collect()
}
