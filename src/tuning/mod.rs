//! Frequency tuning
//!
//! A tuner keeps one ratio per pitch class, measured from the setting's
//! `reference_notenumber`, and scales the whole table so that
//! `root_notenumber` sounds at `root_hz`.
//!
//! Equal temperament works for any semitone count. The other systems stack
//! fifths (or use five-limit ratios) and only exist for 12 semitones.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TheoryError, TheoryResult};
use crate::schema::{Schema, STANDARD_SEMITONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuningSystem {
    #[default]
    Equal,
    Pythagorean,
    Meantone,
    JustIntonation,
}

impl TuningSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningSystem::Equal => "equal",
            TuningSystem::Pythagorean => "pythagorean",
            TuningSystem::Meantone => "meantone",
            TuningSystem::JustIntonation => "justintonation",
        }
    }
}

impl fmt::Display for TuningSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tuner {
    system: TuningSystem,
    semitone: usize,
    reference_notenumber: i32,
    /// Ratio of each pitch class above the reference, in `[1, 2)`
    ratios: Vec<f64>,
    /// Frequency of `reference_notenumber`
    reference_hz: f64,
}

impl Tuner {
    pub fn new(schema: &Schema, system: TuningSystem) -> TheoryResult<Tuner> {
        let semitone = schema.semitone();
        let ratios = match system {
            TuningSystem::Equal => equal_ratios(semitone),
            _ if semitone != STANDARD_SEMITONE => {
                return Err(TheoryError::UnsupportedTuning {
                    system: system.to_string(),
                    semitone,
                })
            }
            TuningSystem::Pythagorean => stacked_fifths(1.5),
            TuningSystem::Meantone => stacked_fifths(5f64.powf(0.25)),
            TuningSystem::JustIntonation => just_ratios()
                .iter()
                .map(|r| *r.numer() as f64 / *r.denom() as f64)
                .collect(),
        };

        let tuner = schema.setting().tuner.clone();
        let mut out = Tuner {
            system,
            semitone,
            reference_notenumber: tuner.reference_notenumber,
            ratios,
            reference_hz: 1.0,
        };
        out.reference_hz = tuner.root_hz / out.relative(tuner.root_notenumber);
        log::debug!(
            "Built {} tuner: reference {} at {:.4} Hz",
            system,
            out.reference_notenumber,
            out.reference_hz
        );
        Ok(out)
    }

    pub fn system(&self) -> TuningSystem {
        self.system
    }

    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    pub fn hz(&self, notenumber: i32) -> f64 {
        self.reference_hz * self.relative(notenumber)
    }

    /// Frequency ratio of `notenumber` against the reference notenumber
    fn relative(&self, notenumber: i32) -> f64 {
        let semitone = self.semitone as i64;
        let distance = notenumber as i64 - self.reference_notenumber as i64;
        let octave = distance.div_euclid(semitone);
        let pitchclass = distance.rem_euclid(semitone) as usize;
        self.ratios[pitchclass] * 2f64.powf(octave as f64)
    }
}

/// Five-limit just ratios for the 12 pitch classes above the reference
pub fn just_ratios() -> Vec<Ratio<i64>> {
    [
        (1, 1),
        (16, 15),
        (9, 8),
        (6, 5),
        (5, 4),
        (4, 3),
        (45, 32),
        (3, 2),
        (8, 5),
        (5, 3),
        (9, 5),
        (15, 8),
    ]
    .iter()
    .map(|&(n, d)| Ratio::new(n, d))
    .collect()
}

fn equal_ratios(semitone: usize) -> Vec<f64> {
    (0..semitone)
        .map(|pc| 2f64.powf(pc as f64 / semitone as f64))
        .collect()
}

/// Five fifths down and six up from the reference, folded into one octave
fn stacked_fifths(fifth: f64) -> Vec<f64> {
    let mut ratios = vec![1.0; STANDARD_SEMITONE];
    for k in -5i32..=6 {
        let pitchclass = (7 * k).rem_euclid(STANDARD_SEMITONE as i32) as usize;
        let mut ratio = fifth.powi(k);
        while ratio >= 2.0 {
            ratio /= 2.0;
        }
        while ratio < 1.0 {
            ratio *= 2.0;
        }
        ratios[pitchclass] = ratio;
    }
    ratios
}
