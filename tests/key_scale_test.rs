// Keys, modes and arbitrary scale patterns

use tonal_schema::{
    AccidentalPreference, DiatonicScale, Key, Mode, NondiatonicScale, Scale, ScalePattern, Schema, TheoryError,
    TonalSetting,
};

#[test]
fn test_f_major_has_exactly_one_flat_on_b() {
    let schema = Schema::standard();
    let key = Key::new(schema, "F").expect("F should be a valid key");
    let flats: Vec<usize> = key
        .signature()
        .iter()
        .enumerate()
        .filter(|(_, a)| **a != 0)
        .map(|(letter, _)| letter)
        .collect();
    assert_eq!(flats, vec![6]);
    assert_eq!(key.signature()[6], -1);
    assert_eq!(schema.symbols()[6], "B");
}

#[test]
fn test_key_accidentals_stay_within_limit() {
    let schema = Schema::standard();
    let limit = schema.accidental_limit() as i32;
    for pitchname in schema.pitchnames() {
        match schema.generate_key_accidentals(pitchname) {
            Ok(accidentals) => {
                assert_eq!(accidentals.len(), 7);
                assert!(accidentals.iter().all(|a| a.abs() <= limit), "{}", pitchname);
            }
            Err(err) => assert!(matches!(err, TheoryError::InvalidKey { .. }), "{}: {}", pitchname, err),
        }
    }
}

#[test]
fn test_memoized_keys_equal_fresh_keys() {
    let schema = Schema::new(TonalSetting::default()).unwrap();
    for tonic in ["C", "G", "Ab", "C#", "Gb"] {
        assert_eq!(schema.key(tonic).unwrap(), Key::new(&schema, tonic).unwrap());
        assert_eq!(schema.key(tonic).unwrap(), Key::new(&schema, tonic).unwrap());
    }
}

#[test]
fn test_modes_of_c() {
    let schema = Schema::standard();
    let expected = [
        (Mode::Ionian, vec!["C", "D", "E", "F", "G", "A", "B"]),
        (Mode::Dorian, vec!["C", "D", "Eb", "F", "G", "A", "Bb"]),
        (Mode::Phrygian, vec!["C", "Db", "Eb", "F", "G", "Ab", "Bb"]),
        (Mode::Lydian, vec!["C", "D", "E", "F#", "G", "A", "B"]),
        (Mode::Mixolydian, vec!["C", "D", "E", "F", "G", "A", "Bb"]),
        (Mode::Aeolian, vec!["C", "D", "Eb", "F", "G", "Ab", "Bb"]),
        (Mode::Locrian, vec!["C", "Db", "Eb", "F", "Gb", "Ab", "Bb"]),
    ];
    for (mode, names) in expected {
        let scale = DiatonicScale::new(schema, schema.key("C").unwrap(), mode).expect("C modes are spellable");
        assert_eq!(scale.pitchnames(), names, "{}", mode);
    }
}

#[test]
fn test_scale_letters_are_distinct() {
    let schema = Schema::standard();
    for tonic in ["C", "F#", "Bb", "Eb", "A"] {
        for pattern in tonal_schema::scale::predefined_patterns() {
            let Ok(scale) = NondiatonicScale::from_pattern(schema, schema.key(tonic).unwrap(), pattern) else {
                continue;
            };
            let mut letters: Vec<&str> = scale
                .components()
                .iter()
                .map(|c| {
                    let name = c.pitchname().expect("scale components are spelled");
                    &name[..1]
                })
                .collect();
            let total = letters.len();
            letters.sort();
            letters.dedup();
            assert_eq!(letters.len(), total, "{} {}", tonic, pattern);
        }
    }
}

#[test]
fn test_generated_accidentals_for_patterns() {
    let schema = Schema::standard();
    assert_eq!(
        schema.generate_scale_accidentals(ScalePattern::HarmonicMinor.intervals()).unwrap(),
        vec![0, 0, -1, 0, 0, -1, 0]
    );
    assert_eq!(
        schema.generate_scale_accidentals(ScalePattern::MajorPentatonic.intervals()).unwrap(),
        vec![0; 5]
    );
}

#[test]
fn test_flat_preference_changes_tie_breaks_only() {
    let mut setting = TonalSetting::default();
    setting.pitchclass.accidental.preference = AccidentalPreference::Flat;
    let schema = Schema::new(setting).unwrap();
    // Unambiguous keys are unaffected
    assert_eq!(schema.generate_key_accidentals("F").unwrap(), vec![0, 0, 0, -1, 0, 0, 0]);
    let scale = NondiatonicScale::from_pattern(&schema, schema.key("C").unwrap(), ScalePattern::MinorPentatonic).unwrap();
    assert_eq!(scale.pitchnames(), vec!["C", "Eb", "F", "G", "Bb"]);
}

#[test]
fn test_scale_in_context_spelling() {
    let schema = Schema::standard();
    let scale = DiatonicScale::new(schema, schema.key("E").unwrap(), Mode::Ionian).unwrap();
    let note = tonal_schema::Note::from_notenumber(schema, 68).unwrap();
    assert_eq!(note.in_scale(schema, &scale).unwrap().to_string(), "G#4");

    let pc = tonal_schema::PitchClass::from_pitchclass(schema, 3).unwrap();
    assert_eq!(pc.in_scale(&scale).to_string(), "D#");
    // Outside the scale nothing changes
    let pc = tonal_schema::PitchClass::from_pitchclass(schema, 0).unwrap();
    assert_eq!(pc.in_scale(&scale).to_string(), "0");
}

#[test]
fn test_invalid_patterns_fail_whole_scale() {
    let schema = Schema::standard();
    let key = schema.key("C").unwrap();
    for bad in [vec![], vec![2, 2, 1], vec![0, 12], vec![1; 12]] {
        assert!(matches!(
            NondiatonicScale::new(schema, key.clone(), bad),
            Err(TheoryError::InvalidScale(_))
        ));
    }
}
