// Built-in quality names for the 12-tone system
//
// Each recipe lists catalog components with their variation. Order matters
// only for `identify`: the first recipe producing an interval set names it.

use super::components::Variation::{self, Base, Diminished, Extended};
use super::components::{QualityComponent, QualityPart};

type Recipe = (&'static str, &'static [(&'static str, Variation)]);

static BOOK: &[Recipe] = &[
    ("", &[("third", Base), ("fifth", Base)]),
    ("m", &[("third", Diminished), ("fifth", Base)]),
    ("dim", &[("third", Diminished), ("fifth", Diminished)]),
    ("aug", &[("third", Base), ("fifth", Extended)]),
    ("sus4", &[("sus4", Base), ("fifth", Base)]),
    ("sus2", &[("sus2", Base), ("fifth", Base)]),
    ("5", &[("fifth", Base)]),
    ("6", &[("third", Base), ("fifth", Base), ("sixth", Base)]),
    ("m6", &[("third", Diminished), ("fifth", Base), ("sixth", Base)]),
    ("7", &[("third", Base), ("fifth", Base), ("seventh", Base)]),
    ("M7", &[("third", Base), ("fifth", Base), ("seventh", Extended)]),
    ("maj7", &[("third", Base), ("fifth", Base), ("seventh", Extended)]),
    ("m7", &[("third", Diminished), ("fifth", Base), ("seventh", Base)]),
    ("mM7", &[("third", Diminished), ("fifth", Base), ("seventh", Extended)]),
    ("m7(b5)", &[("third", Diminished), ("fifth", Base), ("seventh", Base), ("(b5)", Base)]),
    ("dim7", &[("third", Diminished), ("fifth", Diminished), ("seventh", Diminished)]),
    ("aug7", &[("third", Base), ("fifth", Extended), ("seventh", Base)]),
    ("7(b5)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(b5)", Base)]),
    ("7(#5)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(#5)", Base)]),
    ("7sus4", &[("sus4", Base), ("fifth", Base), ("seventh", Base)]),
    ("add9", &[("third", Base), ("fifth", Base), ("add9", Base)]),
    ("madd9", &[("third", Diminished), ("fifth", Base), ("add9", Base)]),
    ("6(9)", &[("third", Base), ("fifth", Base), ("sixth", Base), ("(9)", Base)]),
    ("9", &[("third", Base), ("fifth", Base), ("seventh", Base), ("ninth", Base)]),
    ("M9", &[("third", Base), ("fifth", Base), ("seventh", Extended), ("ninth", Base)]),
    ("m9", &[("third", Diminished), ("fifth", Base), ("seventh", Base), ("ninth", Base)]),
    ("7(9)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(9)", Base)]),
    ("7(b9)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(9)", Diminished)]),
    ("7(#9)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(9)", Extended)]),
    ("7(#11)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(11)", Extended)]),
    ("7(13)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(13)", Base)]),
    ("7(b13)", &[("third", Base), ("fifth", Base), ("seventh", Base), ("(13)", Diminished)]),
    (
        "11",
        &[("third", Base), ("fifth", Base), ("seventh", Base), ("ninth", Base), ("eleventh", Base)]
    ),
    (
        "m11",
        &[("third", Diminished), ("fifth", Base), ("seventh", Base), ("ninth", Base), ("eleventh", Base)]
    ),
    (
        "13",
        &[("third", Base), ("fifth", Base), ("seventh", Base), ("ninth", Base), ("thirteenth", Base)]
    ),
];

/// Every built-in quality name, in lookup order
pub fn names() -> impl Iterator<Item = &'static str> {
    BOOK.iter().map(|(name, _)| *name)
}

/// Parts for a built-in quality name; every part counts as requested
pub fn parts(name: &str) -> Option<Vec<QualityPart>> {
    let (_, recipe) = BOOK.iter().find(|(n, _)| *n == name)?;
    recipe
        .iter()
        .map(|&(component, variation)| {
            let component = QualityComponent::named(component)?.clone();
            Some(QualityPart {
                component,
                variation,
                requested: true,
            })
        })
        .collect()
}
