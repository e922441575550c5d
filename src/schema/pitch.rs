// Pitchclass, pitchname and symbol conversions

use super::Schema;
use crate::errors::{TheoryError, TheoryResult};

impl Schema {
    pub fn is_pitchclass(&self, value: i64) -> bool {
        value >= 0 && value < self.semitone() as i64
    }

    pub fn is_pitchname(&self, value: &str) -> bool {
        self.name2spelling.contains_key(value)
    }

    pub fn is_symbol(&self, value: &str) -> bool {
        self.symbols().iter().any(|s| s == value)
    }

    fn check_pitchclass(&self, pitchclass: i32) -> TheoryResult<usize> {
        if self.is_pitchclass(pitchclass as i64) {
            Ok(pitchclass as usize)
        } else {
            Err(TheoryError::InvalidPitchclass(pitchclass as i64))
        }
    }

    /// Longest pitchname that `value` starts with
    ///
    /// "C#m7" → "C#", "Bbb" → "Bbb", "X" → None
    pub fn find_pitchname(&self, value: &str) -> Option<&str> {
        self.pitchnames
            .iter()
            .filter(|name| value.starts_with(name.as_str()))
            .max_by_key(|name| name.len())
            .map(String::as_str)
    }

    /// Spelling of `pitchclass` carrying exactly `accidental` marks
    ///
    /// `Ok(None)` when no letter reaches the pitch class with that accidental,
    /// including accidentals beyond the configured limit.
    pub fn convert_pitchclass_to_pitchname(
        &self,
        pitchclass: i32,
        accidental: i32,
    ) -> TheoryResult<Option<String>> {
        let row = self.check_pitchclass(pitchclass)?;
        Ok(self
            .table_index(accidental)
            .and_then(|idx| self.class2name[row][idx].clone()))
    }

    /// Full spelling row for a pitch class, flattest first
    pub fn convert_pitchclass_to_pitchnames(&self, pitchclass: i32) -> TheoryResult<&[Option<String>]> {
        let row = self.check_pitchclass(pitchclass)?;
        Ok(&self.class2name[row])
    }

    /// The natural (accidental-free) label of a pitch class, if one exists
    pub fn convert_pitchclass_to_symbol(&self, pitchclass: i32) -> TheoryResult<Option<String>> {
        self.convert_pitchclass_to_pitchname(pitchclass, 0)
    }

    pub fn convert_pitchname_to_pitchclass(&self, pitchname: &str) -> TheoryResult<i32> {
        self.spelling(pitchname)
            .map(|sp| sp.pitchclass)
            .ok_or_else(|| TheoryError::InvalidPitchname(pitchname.to_string()))
    }

    /// Strip the accidental marks: "F#" → "F"
    pub fn convert_pitchname_to_symbol(&self, pitchname: &str) -> TheoryResult<String> {
        let sp = self
            .spelling(pitchname)
            .ok_or_else(|| TheoryError::InvalidPitchname(pitchname.to_string()))?;
        Ok(self.symbols()[sp.letter].clone())
    }

    pub fn convert_symbol_to_pitchclass(&self, symbol: &str) -> TheoryResult<i32> {
        if !self.is_symbol(symbol) {
            return Err(TheoryError::InvalidSymbol(symbol.to_string()));
        }
        self.convert_pitchname_to_pitchclass(symbol)
    }

    /// Symbol per pitch class; `None` where no natural letter sits
    pub fn symbol_table(&self) -> Vec<Option<String>> {
        self.pitchname_table(0)
    }

    /// Pitchname per pitch class under one accidental
    pub fn pitchname_table(&self, accidental: i32) -> Vec<Option<String>> {
        match self.table_index(accidental) {
            Some(idx) => self.class2name.iter().map(|row| row[idx].clone()).collect(),
            None => vec![None; self.semitone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::TheoryError;
    use crate::models::TonalSetting;
    use crate::schema::Schema;

    #[test]
    fn test_pitchclass_to_pitchname_biases() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_pitchclass_to_pitchname(1, 1).unwrap().as_deref(), Some("C#"));
        assert_eq!(schema.convert_pitchclass_to_pitchname(1, -1).unwrap().as_deref(), Some("Db"));
        assert_eq!(schema.convert_pitchclass_to_pitchname(0, 1).unwrap().as_deref(), Some("B#"));
        assert_eq!(schema.convert_pitchclass_to_pitchname(0, -2).unwrap().as_deref(), Some("Dbb"));
    }

    #[test]
    fn test_missing_spelling_is_none_not_error() {
        let schema = Schema::standard();
        // No letter is a natural at pitch class 1
        assert_eq!(schema.convert_pitchclass_to_pitchname(1, 0).unwrap(), None);
        // No letter sits two steps below C
        assert_eq!(schema.convert_pitchclass_to_pitchname(0, 2).unwrap(), None);
        // Beyond the accidental limit
        assert_eq!(schema.convert_pitchclass_to_pitchname(0, 3).unwrap(), None);
    }

    #[test]
    fn test_out_of_range_pitchclass_is_error() {
        let schema = Schema::standard();
        assert_eq!(
            schema.convert_pitchclass_to_pitchname(12, 0),
            Err(TheoryError::InvalidPitchclass(12))
        );
        assert!(schema.convert_pitchclass_to_symbol(-1).is_err());
        assert!(!schema.is_pitchclass(12));
        assert!(!schema.is_pitchclass(-1));
        assert!(schema.is_pitchclass(11));
    }

    #[test]
    fn test_pitchname_to_pitchclass() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_pitchname_to_pitchclass("A").unwrap(), 9);
        assert_eq!(schema.convert_pitchname_to_pitchclass("Cb").unwrap(), 11);
        assert_eq!(schema.convert_pitchname_to_pitchclass("B#").unwrap(), 0);
        assert!(matches!(
            schema.convert_pitchname_to_pitchclass("H"),
            Err(TheoryError::InvalidPitchname(_))
        ));
        assert!(schema.convert_pitchname_to_pitchclass("c").is_err());
    }

    #[test]
    fn test_symbols() {
        let schema = Schema::standard();
        assert_eq!(schema.convert_pitchname_to_symbol("Gbb").unwrap(), "G");
        assert_eq!(schema.convert_pitchclass_to_symbol(4).unwrap().as_deref(), Some("E"));
        assert_eq!(schema.convert_pitchclass_to_symbol(3).unwrap(), None);
        assert!(schema.is_symbol("E"));
        assert!(!schema.is_symbol("Eb"));
        assert_eq!(schema.convert_symbol_to_pitchclass("G").unwrap(), 7);
        assert!(matches!(
            schema.convert_symbol_to_pitchclass("G#"),
            Err(TheoryError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_tables_have_semitone_entries() {
        let schema = Schema::standard();
        for accidental in -3..=3 {
            assert_eq!(schema.pitchname_table(accidental).len(), 12);
        }
        let symbols = schema.symbol_table();
        assert_eq!(symbols.iter().filter(|s| s.is_some()).count(), 7);
        assert_eq!(symbols[2].as_deref(), Some("D"));
    }

    #[test]
    fn test_find_pitchname_is_longest_prefix() {
        let schema = Schema::standard();
        assert_eq!(schema.find_pitchname("C#m7"), Some("C#"));
        assert_eq!(schema.find_pitchname("Bbb"), Some("Bbb"));
        assert_eq!(schema.find_pitchname("Bb7"), Some("Bb"));
        assert_eq!(schema.find_pitchname("m7"), None);
    }

    #[test]
    fn test_pitchclass_pitchname_roundtrip_every_bias() {
        for setting in [TonalSetting::tet12(), TonalSetting::tet24()] {
            let schema = Schema::new(setting).unwrap();
            let limit = schema.accidental_limit() as i32;
            for pc in schema.pitchclasses() {
                for acc in -limit..=limit {
                    if let Some(name) = schema.convert_pitchclass_to_pitchname(pc, acc).unwrap() {
                        assert!(schema.is_pitchname(&name));
                        assert_eq!(schema.convert_pitchname_to_pitchclass(&name).unwrap(), pc);
                    }
                }
            }
        }
    }
}
