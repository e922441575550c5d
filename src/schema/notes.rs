// Notenumber and notename conversions
//
// A notename is a pitchname followed by a signed decimal octave ("C#4",
// "Cb-1"). The octave belongs to the letter, not to the sounding pitch class,
// so B#3 and C4 are the same notenumber and Cb4 sits below C4.

use super::{Schema, Spelling};
use crate::errors::{TheoryError, TheoryResult};

/// Parsed notename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NotenameParts<'a> {
    pub pitchname: &'a str,
    pub spelling: Spelling,
    pub octave: i32,
    pub notenumber: i32,
}

/// Only the canonical decimal form the formatter writes: no leading zeros and
/// no "-0"
fn parse_octave(text: &str) -> Option<i32> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('0') && (digits.len() > 1 || negative) {
        return None;
    }
    text.parse().ok()
}

impl Schema {
    /// Every i32 is a notenumber; wider values are not
    pub fn is_notenumber(&self, value: i64) -> bool {
        i32::try_from(value).is_ok()
    }

    pub fn is_notename(&self, value: &str) -> bool {
        self.parse_notename(value).is_some()
    }

    pub(crate) fn parse_notename<'a>(&self, value: &'a str) -> Option<NotenameParts<'a>> {
        let mut prefixes: Vec<&String> = self
            .pitchnames
            .iter()
            .filter(|name| value.starts_with(name.as_str()))
            .collect();
        prefixes.sort_by_key(|name| std::cmp::Reverse(name.len()));

        prefixes.into_iter().find_map(|name| {
            let (pitchname, rest) = value.split_at(name.len());
            let octave = parse_octave(rest)?;
            let spelling = self.spelling(pitchname)?;
            let notenumber = self.notenumber_of(spelling, octave)?;
            Some(NotenameParts { pitchname, spelling, octave, notenumber })
        })
    }

    fn notenumber_of(&self, spelling: Spelling, octave: i32) -> Option<i32> {
        let semitone = self.semitone() as i64;
        let natural = self.positions[spelling.letter] as i64;
        let octave_index = octave as i64 - self.reference_octave() as i64;
        let n = natural + spelling.accidental as i64 + octave_index * semitone;
        i32::try_from(n).ok()
    }

    pub fn convert_notename_to_notenumber(&self, notename: &str) -> TheoryResult<i32> {
        self.parse_notename(notename)
            .map(|parts| parts.notenumber)
            .ok_or_else(|| TheoryError::InvalidNotename(notename.to_string()))
    }

    pub fn convert_notename_to_pitchname(&self, notename: &str) -> TheoryResult<String> {
        self.parse_notename(notename)
            .map(|parts| parts.pitchname.to_string())
            .ok_or_else(|| TheoryError::InvalidNotename(notename.to_string()))
    }

    pub fn convert_pitchname_to_notename(&self, pitchname: &str, octave: i32) -> TheoryResult<String> {
        let spelling = self
            .spelling(pitchname)
            .ok_or_else(|| TheoryError::InvalidPitchname(pitchname.to_string()))?;
        // The notename must also map back to a representable notenumber
        self.notenumber_of(spelling, octave)
            .ok_or(TheoryError::InvalidOctave(octave as i64))?;
        Ok(format!("{}{}", pitchname, octave))
    }

    /// Always in `[0, semitone)`, for negative notenumbers too
    pub fn convert_notenumber_to_pitchclass(&self, notenumber: i32) -> i32 {
        (notenumber as i64).rem_euclid(self.semitone() as i64) as i32
    }

    /// Notenumber of `pitchclass` in notename octave `octave`
    pub fn convert_pitchclass_to_notenumber(&self, pitchclass: i32, octave: i32) -> TheoryResult<i32> {
        if !self.is_pitchclass(pitchclass as i64) {
            return Err(TheoryError::InvalidPitchclass(pitchclass as i64));
        }
        let octave_index = octave as i64 - self.reference_octave() as i64;
        let n = pitchclass as i64 + octave_index * self.semitone() as i64;
        i32::try_from(n).map_err(|_| TheoryError::InvalidOctave(octave as i64))
    }

    /// Notename spelled with exactly `accidental` marks, if one exists
    pub fn convert_notenumber_to_notename(
        &self,
        notenumber: i32,
        accidental: i32,
    ) -> TheoryResult<Option<String>> {
        let pitchclass = self.convert_notenumber_to_pitchclass(notenumber);
        let Some(pitchname) = self.convert_pitchclass_to_pitchname(pitchclass, accidental)? else {
            return Ok(None);
        };
        let spelling = self
            .spelling(&pitchname)
            .ok_or_else(|| TheoryError::InvalidPitchname(pitchname.clone()))?;

        let semitone = self.semitone() as i64;
        let base = self.positions[spelling.letter] as i64 + spelling.accidental as i64;
        // notenumber ≡ base (mod semitone), so this divides exactly
        let octave = (notenumber as i64 - base).div_euclid(semitone) + self.reference_octave() as i64;
        let octave = i32::try_from(octave).map_err(|_| TheoryError::InvalidNotenumber(notenumber as i64))?;
        Ok(Some(format!("{}{}", pitchname, octave)))
    }

    /// Every spelling of a notenumber, flattest first
    pub fn convert_notenumber_to_notenames(&self, notenumber: i32) -> TheoryResult<Vec<String>> {
        let limit = self.accidental_limit() as i32;
        let mut names = Vec::new();
        for accidental in -limit..=limit {
            if let Some(name) = self.convert_notenumber_to_notename(notenumber, accidental)? {
                names.push(name);
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::TheoryError;
    use crate::models::TonalSetting;
    use crate::schema::Schema;

    #[test]
    fn test_a4_is_reference() {
        let schema = Schema::standard();
        let n = schema.convert_notename_to_notenumber("A4").unwrap();
        assert_eq!(n, schema.setting().tuner.root_notenumber);
        assert_eq!(n, 69);
        assert_eq!(schema.convert_notenumber_to_pitchclass(n), 9);
    }

    #[test]
    fn test_octave_belongs_to_letter() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_notename_to_notenumber("C4").unwrap(), 60);
        assert_eq!(schema.convert_notename_to_notenumber("B#3").unwrap(), 60);
        assert_eq!(schema.convert_notename_to_notenumber("Cb4").unwrap(), 59);
        assert_eq!(schema.convert_notename_to_notenumber("C-1").unwrap(), 0);
        assert_eq!(schema.convert_notename_to_notenumber("B-2").unwrap(), -1);
    }

    #[test]
    fn test_malformed_notenames() {
        let schema = Schema::standard();
        for bad in ["C", "4", "H4", "C#", "C+4", "C 4", "C4.0", "c4", "C--1", ""] {
            assert!(!schema.is_notename(bad), "{} should not be a notename", bad);
            assert_eq!(
                schema.convert_notename_to_notenumber(bad),
                Err(TheoryError::InvalidNotename(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_non_canonical_octaves_are_rejected() {
        let schema = Schema::standard();
        for bad in ["C04", "A004", "C-0", "C-01", "B#03"] {
            assert!(!schema.is_notename(bad), "{} should not be a notename", bad);
            assert_eq!(
                schema.convert_notename_to_notenumber(bad),
                Err(TheoryError::InvalidNotename(bad.to_string()))
            );
        }
        assert_eq!(schema.convert_notename_to_notenumber("C0"), Ok(12));
        assert_eq!(schema.convert_notename_to_notenumber("C-1"), Ok(0));
        assert_eq!(schema.convert_notename_to_notenumber("C10"), Ok(132));
    }

    #[test]
    fn test_parsed_notenames_are_among_formatted_notenames() {
        let schema = Schema::standard();
        for notename in ["C4", "B#3", "Dbb4", "C0", "Cb-1", "G#10"] {
            let n = schema.convert_notename_to_notenumber(notename).unwrap();
            let names = schema.convert_notenumber_to_notenames(n).unwrap();
            assert!(names.contains(&notename.to_string()), "{} not in {:?}", notename, names);
        }
    }

    #[test]
    fn test_overflowing_notename_is_rejected() {
        let schema = Schema::standard();
        assert!(!schema.is_notename("C999999999"));
        assert!(schema.convert_notename_to_notenumber("C999999999").is_err());
    }

    #[test]
    fn test_notenumber_to_notenames() {
        let schema = Schema::standard();
        assert_eq!(
            schema.convert_notenumber_to_notenames(60).unwrap(),
            vec!["Dbb4".to_string(), "C4".to_string(), "B#3".to_string()]
        );
        assert_eq!(
            schema.convert_notenumber_to_notenames(61).unwrap(),
            vec!["Db4".to_string(), "C#4".to_string(), "B##3".to_string()]
        );
    }

    #[test]
    fn test_notenumber_to_notename_bias() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_notenumber_to_notename(59, -1).unwrap().as_deref(), Some("Cb4"));
        assert_eq!(schema.convert_notenumber_to_notename(59, 0).unwrap().as_deref(), Some("B3"));
        assert_eq!(schema.convert_notenumber_to_notename(61, 0).unwrap(), None);
    }

    #[test]
    fn test_pitchclass_is_normalized_for_negative_notenumbers() {
        let schema = Schema::standard();
        for n in [-1000, -13, -12, -1, 0, 1, 11, 12, 127, 100_000] {
            let pc = schema.convert_notenumber_to_pitchclass(n);
            assert!((0..12).contains(&pc));
            assert_eq!(schema.convert_notenumber_to_pitchclass(pc), pc);
        }
        assert_eq!(schema.convert_notenumber_to_pitchclass(-1), 11);
        assert_eq!(schema.convert_notenumber_to_pitchclass(i32::MIN), (i32::MIN as i64).rem_euclid(12) as i32);
    }

    #[test]
    fn test_pitchclass_to_notenumber() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_pitchclass_to_notenumber(9, 4).unwrap(), 69);
        assert_eq!(schema.convert_pitchclass_to_notenumber(0, -1).unwrap(), 0);
        assert!(matches!(
            schema.convert_pitchclass_to_notenumber(12, 4),
            Err(TheoryError::InvalidPitchclass(12))
        ));
        assert!(matches!(
            schema.convert_pitchclass_to_notenumber(0, i32::MAX),
            Err(TheoryError::InvalidOctave(_))
        ));
        // Order within an octave is preserved
        let octave: Vec<i32> = (0..12).map(|pc| schema.convert_pitchclass_to_notenumber(pc, 3).unwrap()).collect();
        assert!(octave.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pitchname_notename_conversions() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_notename_to_pitchname("Ebb-1").unwrap(), "Ebb");
        assert_eq!(schema.convert_pitchname_to_notename("F#", 2).unwrap(), "F#2");
        assert!(schema.convert_pitchname_to_notename("F###", 2).is_err());
    }

    #[test]
    fn test_notename_notenumber_roundtrip() {
        for setting in [TonalSetting::tet12(), TonalSetting::tet24()] {
            let schema = Schema::new(setting).unwrap();
            for pitchname in schema.pitchnames() {
                for octave in -2..=9 {
                    let notename = schema.convert_pitchname_to_notename(pitchname, octave).unwrap();
                    assert!(schema.is_notename(&notename));
                    let n = schema.convert_notename_to_notenumber(&notename).unwrap();
                    let names = schema.convert_notenumber_to_notenames(n).unwrap();
                    assert!(names.contains(&notename), "{} missing from {:?}", notename, names);
                }
            }
        }
    }

    #[test]
    fn test_is_notenumber_range() {
        let schema = Schema::standard();
        assert!(schema.is_notenumber(-5));
        assert!(schema.is_notenumber(i32::MAX as i64));
        assert!(!schema.is_notenumber(i32::MAX as i64 + 1));
    }
}
