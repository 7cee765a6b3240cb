//! Passenger record model for the Titanic survival predictor.
//!
//! This crate owns the public input contract: the ten fields a trained
//! pipeline expects, the exact value vocabulary of each, the quick presets,
//! and the builder that turns widget selections into a [`PassengerRecord`].

pub mod enums;
pub mod error;
pub mod field;
pub mod presets;
pub mod record;
pub mod selections;

pub use enums::{
    AgeCategory, Embarked, FamilyCount, FareCategory, GroupSize, PassengerId, Pclass, Sex, Title,
};
pub use error::{InferenceError, Result};
pub use field::{Field, FieldKind, FieldValue};
pub use presets::{PRESETS, Preset, PresetId, PresetValue, preset};
pub use record::PassengerRecord;
pub use selections::{DEFAULT_PASSENGER_ID, Selections, build};
