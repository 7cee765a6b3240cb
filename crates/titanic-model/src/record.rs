//! The canonical passenger record.

use serde::{Deserialize, Serialize};

use crate::enums::{
    AgeCategory, Embarked, FamilyCount, FareCategory, GroupSize, PassengerId, Pclass, Sex, Title,
};
use crate::field::{Field, FieldValue};
use crate::selections::Selections;

/// One row in exactly the shape the classification pipeline was trained on.
///
/// Every field is typed by its domain, so a record that exists is a record
/// that can be handed to a model. Build one from widget values with
/// [`Selections::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassengerRecord {
    #[serde(rename = "PassengerId")]
    pub passenger_id: PassengerId,
    #[serde(rename = "Pclass")]
    pub pclass: Pclass,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "SibSp")]
    pub sib_sp: FamilyCount,
    #[serde(rename = "Parch")]
    pub parch: FamilyCount,
    #[serde(rename = "Embarked")]
    pub embarked: Embarked,
    #[serde(rename = "Title")]
    pub title: Title,
    #[serde(rename = "GrpSize")]
    pub grp_size: GroupSize,
    #[serde(rename = "FareCat")]
    pub fare_cat: FareCategory,
    #[serde(rename = "AgeCat")]
    pub age_cat: AgeCategory,
}

impl PassengerRecord {
    /// Value of a single field, integers as `Int` and categories as their token.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::PassengerId => FieldValue::Int(self.passenger_id.get()),
            Field::Pclass => FieldValue::Int(self.pclass.value()),
            Field::Sex => self.sex.as_str().into(),
            Field::SibSp => FieldValue::Int(self.sib_sp.get()),
            Field::Parch => FieldValue::Int(self.parch.get()),
            Field::Embarked => self.embarked.as_str().into(),
            Field::Title => self.title.as_str().into(),
            Field::GrpSize => self.grp_size.as_str().into(),
            Field::FareCat => self.fare_cat.as_str().into(),
            Field::AgeCat => self.age_cat.as_str().into(),
        }
    }

    /// All ten fields in canonical column order.
    pub fn fields(&self) -> Vec<(Field, FieldValue)> {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .collect()
    }

    /// Selections that rebuild this exact record.
    pub fn to_selections(&self) -> Selections {
        let mut selections = Selections::new();
        for (field, value) in self.fields() {
            selections.set(field, value);
        }
        selections
    }

    /// The input summary shown above the Predict button: the row as a nested
    /// list, without column names.
    ///
    /// ```
    /// use titanic_model::{PresetId, Selections};
    ///
    /// let record = Selections::with_preset(Some(PresetId::TypicalMale3rdClass))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(
    ///     record.summary_row(),
    ///     "[[1, 3, 'male', 1, 0, 'S', 'Mr', 'Couple', '0-10', '16-32']]"
    /// );
    /// ```
    pub fn summary_row(&self) -> String {
        let cells: Vec<String> = self
            .fields()
            .iter()
            .map(|(_, value)| value.to_literal())
            .collect();
        format!("[[{}]]", cells.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PassengerRecord {
        PassengerRecord {
            passenger_id: PassengerId::new(42).unwrap(),
            pclass: Pclass::First,
            sex: Sex::Female,
            sib_sp: FamilyCount::new(1).unwrap(),
            parch: FamilyCount::new(0).unwrap(),
            embarked: Embarked::Cherbourg,
            title: Title::Mrs,
            grp_size: GroupSize::Couple,
            fare_cat: FareCategory::UpTo100,
            age_cat: AgeCategory::UpTo48,
        }
    }

    #[test]
    fn fields_cover_every_column_once() {
        let fields = record().fields();
        assert_eq!(fields.len(), Field::ALL.len());
        let names: Vec<Field> = fields.iter().map(|(field, _)| *field).collect();
        assert_eq!(names, Field::ALL);
    }

    #[test]
    fn to_selections_round_trips() {
        let original = record();
        let rebuilt = original.to_selections().build().unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn serializes_with_column_names() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["PassengerId"], 42);
        assert_eq!(value["Pclass"], 1);
        assert_eq!(value["FareCat"], "70-100");
        assert_eq!(value.as_object().map(|object| object.len()), Some(10));
    }

    #[test]
    fn summary_row_quotes_categories() {
        assert_eq!(
            record().summary_row(),
            "[[42, 1, 'female', 1, 0, 'C', 'Mrs', 'Couple', '70-100', '32-48']]"
        );
    }
}
