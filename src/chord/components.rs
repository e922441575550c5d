//! Interval components that chord qualities are assembled from
//!
//! Each component belongs to a group (third, fifth, ...) and contributes a
//! set of intervals above the root. A component can depend on other groups
//! being present (`enable`), can be swapped for an extended or diminished
//! variant, and can rewrite intervals already chosen (`alterations`).
//! Bracketed components only sound when explicitly requested.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::BTreeMap;

pub const THIRD: usize = 0;
pub const FIFTH: usize = 1;
pub const SIXTH: usize = 2;
pub const SEVENTH: usize = 3;
pub const NINTH: usize = 4;
pub const ELEVENTH: usize = 5;
pub const THIRTEENTH: usize = 6;
pub const ADDITION: usize = 7;
pub const ALTERATION: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityComponent {
    pub name: String,
    pub group: usize,
    /// Position within the group
    pub index: usize,
    pub intervals: Vec<i32>,
    /// Groups that must each hold an active part
    pub enable: Vec<usize>,
    pub extensions: Option<Vec<i32>>,
    pub diminutions: Option<Vec<i32>>,
    /// Base interval → replacement
    pub alterations: BTreeMap<i32, i32>,
    pub brackets: bool,
}

impl QualityComponent {
    pub fn new(name: &str, group: usize, index: usize, intervals: &[i32]) -> Self {
        Self {
            name: name.to_string(),
            group,
            index,
            intervals: intervals.to_vec(),
            enable: Vec::new(),
            extensions: None,
            diminutions: None,
            alterations: BTreeMap::new(),
            brackets: false,
        }
    }

    pub fn enable(mut self, groups: &[usize]) -> Self {
        self.enable = groups.to_vec();
        self
    }

    pub fn extensions(mut self, intervals: &[i32]) -> Self {
        self.extensions = Some(intervals.to_vec());
        self
    }

    pub fn diminutions(mut self, intervals: &[i32]) -> Self {
        self.diminutions = Some(intervals.to_vec());
        self
    }

    pub fn alter(mut self, from: i32, to: i32) -> Self {
        self.alterations.insert(from, to);
        self
    }

    pub fn bracketed(mut self) -> Self {
        self.brackets = true;
        self
    }

    /// Look up a component of the standard 12-tone catalog
    pub fn named(name: &str) -> Option<&'static QualityComponent> {
        CATALOG.iter().find(|c| c.name == name)
    }

    pub fn catalog() -> &'static [QualityComponent] {
        &CATALOG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variation {
    #[default]
    Base,
    Extended,
    Diminished,
}

/// A component as used by one quality
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityPart {
    pub component: QualityComponent,
    pub variation: Variation,
    /// Needed for bracketed components to sound
    pub requested: bool,
}

impl QualityPart {
    pub fn new(component: QualityComponent) -> Self {
        Self {
            component,
            variation: Variation::Base,
            requested: false,
        }
    }

    pub fn extended(mut self) -> Self {
        self.variation = Variation::Extended;
        self
    }

    pub fn diminished(mut self) -> Self {
        self.variation = Variation::Diminished;
        self
    }

    pub fn requested(mut self) -> Self {
        self.requested = true;
        self
    }

    /// Interval set for the chosen variation, if the component offers it
    pub fn selection(&self) -> Option<Vec<i32>> {
        let c = &self.component;
        match self.variation {
            Variation::Base => Some(c.intervals.clone()),
            Variation::Extended => c.extensions.clone(),
            Variation::Diminished => c.diminutions.clone(),
        }
    }
}

lazy_static! {
    static ref CATALOG: Vec<QualityComponent> = vec![
        QualityComponent::new("third", THIRD, 0, &[4]).diminutions(&[3]),
        QualityComponent::new("sus4", THIRD, 1, &[5]),
        QualityComponent::new("sus2", THIRD, 2, &[2]),
        QualityComponent::new("fifth", FIFTH, 0, &[7]).extensions(&[8]).diminutions(&[6]),
        QualityComponent::new("sixth", SIXTH, 0, &[9]),
        QualityComponent::new("seventh", SEVENTH, 0, &[10]).extensions(&[11]).diminutions(&[9]),
        QualityComponent::new("ninth", NINTH, 0, &[14])
            .enable(&[SEVENTH])
            .extensions(&[15])
            .diminutions(&[13]),
        QualityComponent::new("eleventh", ELEVENTH, 0, &[17])
            .enable(&[SEVENTH, NINTH])
            .extensions(&[18]),
        QualityComponent::new("thirteenth", THIRTEENTH, 0, &[21])
            .enable(&[SEVENTH, NINTH])
            .diminutions(&[20]),
        QualityComponent::new("add9", ADDITION, 0, &[14]),
        QualityComponent::new("(9)", ADDITION, 1, &[14])
            .extensions(&[15])
            .diminutions(&[13])
            .bracketed(),
        QualityComponent::new("(11)", ADDITION, 2, &[17]).extensions(&[18]).bracketed(),
        QualityComponent::new("(13)", ADDITION, 3, &[21]).diminutions(&[20]).bracketed(),
        QualityComponent::new("(b5)", ALTERATION, 0, &[]).alter(7, 6).bracketed(),
        QualityComponent::new("(#5)", ALTERATION, 1, &[]).alter(7, 8).bracketed(),
    ];
}
