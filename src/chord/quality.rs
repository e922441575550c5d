//! Chord qualities: a name plus the intervals its parts compose to

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::book;
use super::components::QualityPart;
use crate::errors::{TheoryError, TheoryResult};
use crate::schema::{Schema, STANDARD_SEMITONE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quality {
    name: String,
    parts: Vec<QualityPart>,
    intervals: Vec<i32>,
    /// Intervals restated downward from the top voice
    reversed: Vec<i32>,
}

impl Quality {
    /// Compose the intervals of `parts`
    ///
    /// Parts are ordered by (group, index). A part is active when it is
    /// requested or unbracketed and every group it depends on holds an active
    /// part. Active parts then contribute their selected intervals; an
    /// alteration rewrites both the intervals gathered so far and the part's
    /// own selection. The root is always present.
    pub fn from_parts(name: &str, mut parts: Vec<QualityPart>) -> TheoryResult<Quality> {
        parts.sort_by_key(|p| (p.component.group, p.component.index));
        let active = resolve_active(&parts);

        let mut intervals = vec![0];
        for (part, _) in parts.iter().zip(&active).filter(|(_, on)| **on) {
            let mut selection = part.selection().ok_or_else(|| {
                TheoryError::InvalidQuality(format!(
                    "'{}' has no {:?} form of '{}'",
                    name, part.variation, part.component.name
                ))
            })?;
            for (&from, &to) in &part.component.alterations {
                for value in intervals.iter_mut().chain(selection.iter_mut()) {
                    if *value == from {
                        *value = to;
                    }
                }
            }
            for value in selection {
                if !intervals.contains(&value) {
                    intervals.push(value);
                }
            }
        }
        intervals.sort_unstable();
        intervals.dedup();

        log::trace!("Quality '{}' → {:?}", name, intervals);
        Ok(Self::assemble(name, parts, intervals))
    }

    /// A quality given directly by its intervals, with no parts
    pub fn from_intervals(name: &str, intervals: &[i32]) -> TheoryResult<Quality> {
        if let Some(&bad) = intervals.iter().find(|&&i| i < 0) {
            return Err(TheoryError::InvalidQuality(format!(
                "'{}' has negative interval {}",
                name, bad
            )));
        }
        Ok(Self::assemble(name, Vec::new(), normalize(intervals)))
    }

    /// Look a quality up by name: the built-in book first (12-tone settings
    /// only), then the setting's own table
    pub fn named(schema: &Schema, name: &str) -> TheoryResult<Quality> {
        if schema.semitone() == STANDARD_SEMITONE {
            if let Some(parts) = book::parts(name) {
                return Self::from_parts(name, parts);
            }
        }
        match schema.setting().qualities.iter().find(|q| q.name == name) {
            Some(entry) => Self::from_intervals(&entry.name, &entry.intervals),
            None => Err(TheoryError::InvalidQuality(name.to_string())),
        }
    }

    /// Reverse lookup: the first known quality with exactly these intervals
    pub fn identify(schema: &Schema, intervals: &[i32]) -> Option<Quality> {
        let wanted = normalize(intervals);
        if schema.semitone() == STANDARD_SEMITONE {
            let found = book::names()
                .filter_map(|name| book::parts(name).and_then(|parts| Self::from_parts(name, parts).ok()))
                .find(|quality| quality.intervals == wanted);
            if found.is_some() {
                return found;
            }
        }
        schema
            .setting()
            .qualities
            .iter()
            .find(|entry| normalize(&entry.intervals) == wanted)
            .and_then(|entry| Self::from_intervals(&entry.name, &entry.intervals).ok())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parts(&self) -> &[QualityPart] {
        &self.parts
    }

    pub fn intervals(&self) -> &[i32] {
        &self.intervals
    }

    pub fn reversed(&self) -> &[i32] {
        &self.reversed
    }

    fn assemble(name: &str, parts: Vec<QualityPart>, intervals: Vec<i32>) -> Quality {
        let top = intervals.last().copied().unwrap_or(0);
        let reversed = intervals.iter().rev().map(|&i| top - i).collect();
        Quality {
            name: name.to_string(),
            parts,
            intervals,
            reversed,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Least fixed point of part activity
fn resolve_active(parts: &[QualityPart]) -> Vec<bool> {
    let mut active = vec![false; parts.len()];
    loop {
        let groups: HashSet<usize> = parts
            .iter()
            .zip(&active)
            .filter(|(_, on)| **on)
            .map(|(p, _)| p.component.group)
            .collect();
        let next: Vec<bool> = parts
            .iter()
            .map(|p| {
                (p.requested || !p.component.brackets)
                    && p.component.enable.iter().all(|g| groups.contains(g))
            })
            .collect();
        if next == active {
            return active;
        }
        active = next;
    }
}

/// Sorted, deduplicated, root included
fn normalize(intervals: &[i32]) -> Vec<i32> {
    let mut out: Vec<i32> = intervals.to_vec();
    out.push(0);
    out.sort_unstable();
    out.dedup();
    out
}
