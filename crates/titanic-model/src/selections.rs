//! Record builder: widget selections in, canonical record out.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::enums::{FamilyCount, PassengerId, Pclass};
use crate::error::{InferenceError, Result};
use crate::field::{Field, FieldValue};
use crate::presets::PresetId;
use crate::record::PassengerRecord;

/// PassengerId used when nothing else picked one.
pub const DEFAULT_PASSENGER_ID: i64 = 1;

/// Current value of each input widget, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    values: BTreeMap<Field, FieldValue>,
}

impl Selections {
    /// No values at all. Building from this fails on the first field.
    pub fn new() -> Self {
        Self::default()
    }

    /// The values every widget shows before a preset or the user touches it.
    pub fn defaults() -> Self {
        let mut selections = Self::new();
        selections
            .set(Field::PassengerId, DEFAULT_PASSENGER_ID)
            .set(Field::Pclass, 3i64)
            .set(Field::Sex, "male")
            .set(Field::SibSp, 0i64)
            .set(Field::Parch, 0i64)
            .set(Field::Embarked, "S")
            .set(Field::Title, "Mr")
            .set(Field::GrpSize, "Couple")
            .set(Field::FareCat, "0-10")
            .set(Field::AgeCat, "0-16");
        selections
    }

    /// Defaults with the preset's fields laid over them.
    pub fn with_preset(preset: Option<PresetId>) -> Self {
        let mut selections = Self::defaults();
        if let Some(id) = preset {
            selections.apply_preset(id);
        }
        selections
    }

    /// Override every field the preset defines; other fields keep their value.
    pub fn apply_preset(&mut self, id: PresetId) -> &mut Self {
        for (field, value) in id.preset().values() {
            self.values.insert(field, value);
        }
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) -> &mut Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// Coerce every selection to its declared type.
    ///
    /// Integer fields take an integer, or text that parses exactly as one.
    /// Categorical fields take their exact token: no trimming, no case folding.
    ///
    /// # Errors
    ///
    /// [`InferenceError::TypeCoercionFailed`] for the first field that is
    /// missing, of the wrong kind, or outside its domain.
    pub fn build(&self) -> Result<PassengerRecord> {
        Ok(PassengerRecord {
            passenger_id: self.integer(Field::PassengerId, PassengerId::new)?,
            pclass: self.integer(Field::Pclass, Pclass::try_from)?,
            sex: self.token(Field::Sex)?,
            sib_sp: self.integer(Field::SibSp, FamilyCount::new)?,
            parch: self.integer(Field::Parch, FamilyCount::new)?,
            embarked: self.token(Field::Embarked)?,
            title: self.token(Field::Title)?,
            grp_size: self.token(Field::GrpSize)?,
            fare_cat: self.token(Field::FareCat)?,
            age_cat: self.token(Field::AgeCat)?,
        })
    }

    fn value(&self, field: Field) -> Result<&FieldValue> {
        self.get(field)
            .ok_or_else(|| InferenceError::coercion(field, "nothing", "no value selected"))
    }

    fn integer<T>(
        &self,
        field: Field,
        check: impl Fn(i64) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let value = self.value(field)?;
        let raw = match value {
            FieldValue::Int(raw) => *raw,
            FieldValue::Text(text) => text.parse::<i64>().map_err(|_| {
                InferenceError::coercion(field, value.to_literal(), "expected an integer")
            })?,
        };
        check(raw).map_err(|message| InferenceError::coercion(field, raw.to_string(), message))
    }

    fn token<T>(&self, field: Field) -> Result<T>
    where
        T: FromStr<Err = String>,
    {
        match self.value(field)? {
            FieldValue::Text(text) => text
                .parse::<T>()
                .map_err(|message| InferenceError::coercion(field, format!("'{text}'"), message)),
            FieldValue::Int(raw) => Err(InferenceError::coercion(
                field,
                raw.to_string(),
                "expected a category token, not an integer",
            )),
        }
    }
}

/// Build a record from the current selections. See [`Selections::build`].
pub fn build(selections: &Selections) -> Result<PassengerRecord> {
    selections.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{AgeCategory, GroupSize, Sex, Title};

    #[test]
    fn defaults_build() {
        let record = Selections::defaults().build().unwrap();
        assert_eq!(record.passenger_id.get(), DEFAULT_PASSENGER_ID);
        assert_eq!(record.pclass, Pclass::Third);
        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.grp_size, GroupSize::Couple);
        assert_eq!(record.age_cat, AgeCategory::UpTo16);
    }

    #[test]
    fn preset_then_manual_override() {
        let mut selections = Selections::with_preset(Some(PresetId::ChildSample));
        selections.set(Field::Title, "Miss").set(Field::Sex, "female");
        let record = selections.build().unwrap();
        assert_eq!(record.title, Title::Miss);
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.pclass, Pclass::Second);
    }

    #[test]
    fn integer_text_is_coerced() {
        let mut selections = Selections::defaults();
        selections.set(Field::SibSp, "4");
        assert_eq!(selections.build().unwrap().sib_sp.get(), 4);
    }

    #[test]
    fn missing_field_fails_coercion() {
        let mut selections = Selections::defaults();
        selections.remove(Field::Embarked);
        match selections.build() {
            Err(InferenceError::TypeCoercionFailed { field, .. }) => {
                assert_eq!(field, Field::Embarked);
            }
            other => panic!("expected coercion failure, got {other:?}"),
        }
    }

    #[test]
    fn out_of_domain_values_fail_coercion() {
        let cases: [(Field, FieldValue); 6] = [
            (Field::GrpSize, "Small".into()),
            (Field::Sex, "Male".into()),
            (Field::Embarked, " S".into()),
            (Field::Pclass, 4.into()),
            (Field::Parch, 11.into()),
            (Field::PassengerId, 0.into()),
        ];
        for (field, value) in cases {
            let mut selections = Selections::defaults();
            selections.set(field, value.clone());
            let error = selections.build().unwrap_err();
            assert!(
                matches!(error, InferenceError::TypeCoercionFailed { field: f, .. } if f == field),
                "{field} = {value:?} gave {error:?}"
            );
        }
    }

    #[test]
    fn wrong_kind_fails_coercion() {
        let mut selections = Selections::defaults();
        selections.set(Field::FareCat, 10i64);
        let error = selections.build().unwrap_err();
        assert_eq!(
            error.to_string(),
            "cannot use 10 for FareCat: expected a category token, not an integer"
        );

        let mut selections = Selections::defaults();
        selections.set(Field::SibSp, "two");
        let error = selections.build().unwrap_err();
        assert_eq!(error.to_string(), "cannot use 'two' for SibSp: expected an integer");
    }
}
