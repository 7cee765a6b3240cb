//! Quick presets that pre-fill the input form.
//!
//! A preset is a fixed table of field assignments. Applying one overrides the
//! widget default of every field it names and leaves the rest alone. Presets
//! never bypass field domains: their values go through the same builder as
//! manual input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::field::{Field, FieldValue};

/// Identifier of a built-in preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PresetId {
    #[serde(rename = "typical-male-3rd-class")]
    TypicalMale3rdClass,
    #[serde(rename = "female-1st-class")]
    Female1stClass,
    #[serde(rename = "child-sample")]
    ChildSample,
}

impl PresetId {
    pub const ALL: &'static [PresetId] = &[
        PresetId::TypicalMale3rdClass,
        PresetId::Female1stClass,
        PresetId::ChildSample,
    ];

    /// Label shown in the preset picker.
    pub const fn label(&self) -> &'static str {
        match self {
            PresetId::TypicalMale3rdClass => "Typical Male 3rd class",
            PresetId::Female1stClass => "Female 1st class",
            PresetId::ChildSample => "Child sample",
        }
    }

    /// Command-line friendly name.
    pub const fn slug(&self) -> &'static str {
        match self {
            PresetId::TypicalMale3rdClass => "typical-male-3rd-class",
            PresetId::Female1stClass => "female-1st-class",
            PresetId::ChildSample => "child-sample",
        }
    }

    pub fn preset(&self) -> &'static Preset {
        match self {
            PresetId::TypicalMale3rdClass => &PRESETS[0],
            PresetId::Female1stClass => &PRESETS[1],
            PresetId::ChildSample => &PRESETS[2],
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PresetId {
    type Err = String;

    /// Accepts the slug or the display label, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PresetId::ALL
            .iter()
            .copied()
            .find(|id| {
                id.slug().eq_ignore_ascii_case(trimmed) || id.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| {
                let known: Vec<&str> = PresetId::ALL.iter().map(PresetId::slug).collect();
                format!("Unknown preset: {s} (expected one of {})", known.join(", "))
            })
    }
}

/// A preset table value. `Copy` so the tables can live in statics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetValue {
    Int(i64),
    Token(&'static str),
}

impl From<PresetValue> for FieldValue {
    fn from(value: PresetValue) -> Self {
        match value {
            PresetValue::Int(value) => FieldValue::Int(value),
            PresetValue::Token(token) => FieldValue::Text(token.to_string()),
        }
    }
}

/// A named partial record.
#[derive(Debug)]
pub struct Preset {
    pub id: PresetId,
    /// Assignments in authoring order. A field assigned twice takes its last value.
    pub entries: &'static [(Field, PresetValue)],
}

impl Preset {
    /// The value this preset gives `field`, if any. Last assignment wins.
    pub fn get(&self, field: Field) -> Option<FieldValue> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| *entry == field)
            .map(|(_, value)| (*value).into())
    }

    /// Resolved assignments, one per field, last assignment winning.
    pub fn values(&self) -> BTreeMap<Field, FieldValue> {
        let mut values = BTreeMap::new();
        for (field, value) in self.entries {
            values.insert(*field, FieldValue::from(*value));
        }
        values
    }

    /// Fields assigned more than once in the table.
    pub fn duplicate_fields(&self) -> Vec<Field> {
        let mut seen = BTreeMap::new();
        for (field, _) in self.entries {
            *seen.entry(*field).or_insert(0usize) += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(field, _)| field)
            .collect()
    }
}

pub fn preset(id: PresetId) -> &'static Preset {
    id.preset()
}

pub static PRESETS: [Preset; 3] = [
    Preset {
        id: PresetId::TypicalMale3rdClass,
        entries: &TYPICAL_MALE_3RD_CLASS,
    },
    Preset {
        id: PresetId::Female1stClass,
        entries: &FEMALE_1ST_CLASS,
    },
    Preset {
        id: PresetId::ChildSample,
        entries: &CHILD_SAMPLE,
    },
];

static TYPICAL_MALE_3RD_CLASS: [(Field, PresetValue); 9] = [
    (Field::Pclass, PresetValue::Int(3)),
    (Field::Sex, PresetValue::Token("male")),
    (Field::SibSp, PresetValue::Int(1)),
    (Field::Parch, PresetValue::Int(0)),
    (Field::Embarked, PresetValue::Token("S")),
    (Field::Title, PresetValue::Token("Mr")),
    (Field::GrpSize, PresetValue::Token("Couple")),
    (Field::FareCat, PresetValue::Token("0-10")),
    (Field::AgeCat, PresetValue::Token("16-32")),
];

static FEMALE_1ST_CLASS: [(Field, PresetValue); 9] = [
    (Field::Pclass, PresetValue::Int(1)),
    (Field::Sex, PresetValue::Token("female")),
    (Field::SibSp, PresetValue::Int(1)),
    (Field::Parch, PresetValue::Int(0)),
    (Field::Embarked, PresetValue::Token("C")),
    (Field::Title, PresetValue::Token("Mrs")),
    (Field::GrpSize, PresetValue::Token("Couple")),
    (Field::FareCat, PresetValue::Token("70-100")),
    (Field::AgeCat, PresetValue::Token("32-48")),
];

static CHILD_SAMPLE: [(Field, PresetValue); 9] = [
    (Field::Pclass, PresetValue::Int(2)),
    (Field::Sex, PresetValue::Token("male")),
    (Field::SibSp, PresetValue::Int(0)),
    (Field::Parch, PresetValue::Int(1)),
    (Field::Embarked, PresetValue::Token("Q")),
    (Field::Title, PresetValue::Token("Master")),
    (Field::GrpSize, PresetValue::Token("Single")),
    (Field::FareCat, PresetValue::Token("10-25")),
    (Field::AgeCat, PresetValue::Token("0-16")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selections::Selections;

    #[test]
    fn shipped_presets_have_no_duplicate_fields() {
        for preset in &PRESETS {
            assert!(
                preset.duplicate_fields().is_empty(),
                "{} assigns {:?} more than once",
                preset.id,
                preset.duplicate_fields()
            );
        }
    }

    #[test]
    fn shipped_presets_stay_inside_field_domains() {
        for preset in &PRESETS {
            let mut selections = Selections::defaults();
            for (field, value) in preset.values() {
                selections.set(field, value);
            }
            assert!(
                selections.build().is_ok(),
                "{} has an out-of-domain value",
                preset.id
            );
        }
    }

    #[test]
    fn presets_never_set_passenger_id() {
        for preset in &PRESETS {
            assert!(preset.get(Field::PassengerId).is_none());
        }
    }

    #[test]
    fn lookup_matches_table_position() {
        for id in PresetId::ALL {
            assert_eq!(id.preset().id, *id);
        }
    }

    #[test]
    fn last_assignment_wins() {
        static ENTRIES: [(Field, PresetValue); 3] = [
            (Field::GrpSize, PresetValue::Token("Small")),
            (Field::Title, PresetValue::Token("Master")),
            (Field::GrpSize, PresetValue::Token("Single")),
        ];
        let preset = Preset {
            id: PresetId::ChildSample,
            entries: &ENTRIES,
        };
        assert_eq!(preset.get(Field::GrpSize), Some("Single".into()));
        assert_eq!(preset.values().get(&Field::GrpSize), Some(&"Single".into()));
        assert_eq!(preset.duplicate_fields(), vec![Field::GrpSize]);
    }

    #[test]
    fn preset_ids_parse_from_slug_or_label() {
        assert_eq!(
            "female-1st-class".parse::<PresetId>(),
            Ok(PresetId::Female1stClass)
        );
        assert_eq!(
            "Typical Male 3rd class".parse::<PresetId>(),
            Ok(PresetId::TypicalMale3rdClass)
        );
        assert!("adult".parse::<PresetId>().is_err());
    }

    #[test]
    fn serialized_names_are_the_slugs() {
        for id in PresetId::ALL {
            assert_eq!(
                serde_json::to_string(id).unwrap(),
                format!("\"{}\"", id.slug())
            );
            let parsed: PresetId = serde_json::from_str(&format!("\"{}\"", id.slug())).unwrap();
            assert_eq!(parsed, *id);
        }
    }
}
