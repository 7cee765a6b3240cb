//! Field names, kinds and raw widget values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::enums::{
    AgeCategory, Embarked, FamilyCount, FareCategory, GroupSize, PassengerId, Pclass, Sex, Title,
};

/// One column of the passenger record.
///
/// Declaration order is the canonical column order the pipeline was trained
/// with; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    PassengerId,
    Pclass,
    Sex,
    SibSp,
    Parch,
    Embarked,
    Title,
    GrpSize,
    FareCat,
    AgeCat,
}

/// What a widget may hand over for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free integer entry within bounds (`max: None` means unbounded).
    Integer { min: i64, max: Option<i64> },
    /// Integer chosen from a fixed list.
    IntegerChoice(&'static [i64]),
    /// Exact text token chosen from a fixed list.
    Categorical(&'static [&'static str]),
}

impl Field {
    /// Every field, in canonical column order.
    pub const ALL: [Field; 10] = [
        Field::PassengerId,
        Field::Pclass,
        Field::Sex,
        Field::SibSp,
        Field::Parch,
        Field::Embarked,
        Field::Title,
        Field::GrpSize,
        Field::FareCat,
        Field::AgeCat,
    ];

    /// Column name as the pipeline expects it.
    pub const fn name(&self) -> &'static str {
        match self {
            Field::PassengerId => "PassengerId",
            Field::Pclass => "Pclass",
            Field::Sex => "Sex",
            Field::SibSp => "SibSp",
            Field::Parch => "Parch",
            Field::Embarked => "Embarked",
            Field::Title => "Title",
            Field::GrpSize => "GrpSize",
            Field::FareCat => "FareCat",
            Field::AgeCat => "AgeCat",
        }
    }

    /// Label shown next to the input widget.
    pub const fn label(&self) -> &'static str {
        match self {
            Field::SibSp => "SibSp (siblings/spouses)",
            Field::Parch => "Parch (parents/children)",
            other => other.name(),
        }
    }

    pub const fn kind(&self) -> FieldKind {
        match self {
            Field::PassengerId => FieldKind::Integer {
                min: PassengerId::MIN,
                max: None,
            },
            Field::Pclass => FieldKind::IntegerChoice(Pclass::VALUES),
            Field::SibSp | Field::Parch => FieldKind::Integer {
                min: FamilyCount::MIN,
                max: Some(FamilyCount::MAX),
            },
            Field::Sex => FieldKind::Categorical(Sex::TOKENS),
            Field::Embarked => FieldKind::Categorical(Embarked::TOKENS),
            Field::Title => FieldKind::Categorical(Title::TOKENS),
            Field::GrpSize => FieldKind::Categorical(GroupSize::TOKENS),
            Field::FareCat => FieldKind::Categorical(FareCategory::TOKENS),
            Field::AgeCat => FieldKind::Categorical(AgeCategory::TOKENS),
        }
    }

    /// Returns true if the field is stored as an integer column.
    pub const fn is_integer(&self) -> bool {
        !matches!(self.kind(), FieldKind::Categorical(_))
    }

    /// Human-readable domain, e.g. `1, 2, 3` or `0..=10`.
    pub fn domain(&self) -> String {
        match self.kind() {
            FieldKind::Integer { min, max: Some(max) } => format!("{min}..={max}"),
            FieldKind::Integer { min, max: None } => format!(">= {min}"),
            FieldKind::IntegerChoice(values) => values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            FieldKind::Categorical(tokens) => tokens.join(", "),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    /// Parse a column name. Names are matched case-insensitively; values never are.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unknown field: {s}"))
    }
}

/// A raw value as a widget or command line hands it over, before coercion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    /// Interpret raw text for `field`: integer fields get an integer when the
    /// text parses as one, everything else stays text for the builder to judge.
    pub fn parse_for(field: Field, raw: &str) -> Self {
        if field.is_integer() {
            if let Ok(value) = raw.parse::<i64>() {
                return FieldValue::Int(value);
            }
        }
        FieldValue::Text(raw.to_string())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Int(_) => None,
            FieldValue::Text(value) => Some(value),
        }
    }

    /// Renders the value the way a row preview shows it: integers bare, text quoted.
    pub fn to_literal(&self) -> String {
        match self {
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Text(value) => format!("'{value}'"),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
