//! The `preprocess` step: columns of the input frame to a dense feature vector.
//!
//! Columns are encoded in the order they are listed. Input columns that are
//! not listed (usually `PassengerId`) are dropped.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{ArtifactError, ModelError};
use crate::frame::{int_cell, str_cell};

/// What to do with a category the encoder never saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Reject the row.
    #[default]
    Error,
    /// Encode as all zeros.
    Ignore,
}

/// Encoding of one input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    /// Integer column used as a single numeric feature.
    Passthrough { name: String },
    /// Text column expanded to one indicator per category.
    OneHot {
        name: String,
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
    /// Text column replaced by the position of its category.
    Ordinal {
        name: String,
        categories: Vec<String>,
    },
}

impl ColumnSpec {
    pub fn name(&self) -> &str {
        match self {
            ColumnSpec::Passthrough { name }
            | ColumnSpec::OneHot { name, .. }
            | ColumnSpec::Ordinal { name, .. } => name,
        }
    }

    /// Number of features this column contributes.
    pub fn width(&self) -> usize {
        match self {
            ColumnSpec::Passthrough { .. } | ColumnSpec::Ordinal { .. } => 1,
            ColumnSpec::OneHot { categories, .. } => categories.len(),
        }
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        let categories = match self {
            ColumnSpec::Passthrough { .. } => return Ok(()),
            ColumnSpec::OneHot { categories, .. } | ColumnSpec::Ordinal { categories, .. } => {
                categories
            }
        };
        if categories.is_empty() {
            return Err(ArtifactError::NoCategories(self.name().to_string()));
        }
        let mut seen = BTreeSet::new();
        for category in categories {
            if !seen.insert(category.as_str()) {
                return Err(ArtifactError::DuplicateCategory {
                    column: self.name().to_string(),
                    value: category.clone(),
                });
            }
        }
        Ok(())
    }

    fn encode(&self, input: &DataFrame, out: &mut Vec<f64>) -> Result<(), ModelError> {
        match self {
            ColumnSpec::Passthrough { name } => {
                out.push(int_cell(input, name)? as f64);
            }
            ColumnSpec::OneHot {
                name,
                categories,
                handle_unknown,
            } => {
                let value = str_cell(input, name)?;
                let position = categories.iter().position(|category| category == value);
                if position.is_none() && *handle_unknown == HandleUnknown::Error {
                    return Err(unknown(name, value));
                }
                out.extend(
                    (0..categories.len()).map(|index| f64::from(u8::from(Some(index) == position))),
                );
            }
            ColumnSpec::Ordinal { name, categories } => {
                let value = str_cell(input, name)?;
                let position = categories
                    .iter()
                    .position(|category| category == value)
                    .ok_or_else(|| unknown(name, value))?;
                out.push(position as f64);
            }
        }
        Ok(())
    }
}

/// The ordered list of column encoders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preprocess {
    pub columns: Vec<ColumnSpec>,
}

impl Preprocess {
    /// Length of the transformed feature vector.
    pub fn output_width(&self) -> usize {
        self.columns.iter().map(ColumnSpec::width).sum()
    }

    /// Input columns the step reads, in order.
    pub fn input_columns(&self) -> Vec<&str> {
        self.columns.iter().map(ColumnSpec::name).collect()
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        self.columns.iter().try_for_each(ColumnSpec::validate)
    }

    /// Encode the single row of `input`.
    pub fn transform(&self, input: &DataFrame) -> Result<Vec<f64>, ModelError> {
        if input.height() != 1 {
            return Err(ModelError::RowCount(input.height()));
        }
        let mut features = Vec::with_capacity(self.output_width());
        for column in &self.columns {
            column.encode(input, &mut features)?;
        }
        Ok(features)
    }
}

fn unknown(column: &str, value: &str) -> ModelError {
    ModelError::UnknownCategory {
        column: column.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::record_frame;
    use titanic_model::{Field, PresetId, Selections};

    fn frame(preset: PresetId) -> DataFrame {
        let record = Selections::with_preset(Some(preset)).build().unwrap();
        record_frame(&record).unwrap()
    }

    fn one_hot(name: &str, categories: &[&str], handle_unknown: HandleUnknown) -> ColumnSpec {
        ColumnSpec::OneHot {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            handle_unknown,
        }
    }

    #[test]
    fn encodes_in_listed_order() {
        let preprocess = Preprocess {
            columns: vec![
                ColumnSpec::Passthrough {
                    name: "Pclass".to_string(),
                },
                one_hot("Sex", &["female", "male"], HandleUnknown::Error),
                ColumnSpec::Ordinal {
                    name: "AgeCat".to_string(),
                    categories: ["0-16", "16-32", "32-48"].map(String::from).to_vec(),
                },
            ],
        };
        let features = preprocess
            .transform(&frame(PresetId::TypicalMale3rdClass))
            .unwrap();
        assert_eq!(features, vec![3.0, 0.0, 1.0, 1.0]);
        assert_eq!(preprocess.output_width(), 4);
        assert_eq!(preprocess.input_columns(), vec!["Pclass", "Sex", "AgeCat"]);
    }

    #[test]
    fn unknown_category_is_an_error_by_default() {
        let preprocess = Preprocess {
            columns: vec![one_hot("Title", &["Mr", "Mrs"], HandleUnknown::Error)],
        };
        let error = preprocess
            .transform(&frame(PresetId::ChildSample))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "found unknown category 'Master' in column 'Title' during transform"
        );
    }

    #[test]
    fn unknown_category_can_be_ignored() {
        let preprocess = Preprocess {
            columns: vec![one_hot("Title", &["Mr", "Mrs"], HandleUnknown::Ignore)],
        };
        let features = preprocess.transform(&frame(PresetId::ChildSample)).unwrap();
        assert_eq!(features, vec![0.0, 0.0]);
    }

    #[test]
    fn missing_column_surfaces_polars_message() {
        let preprocess = Preprocess {
            columns: vec![ColumnSpec::Passthrough {
                name: "Fare".to_string(),
            }],
        };
        let error = preprocess
            .transform(&frame(PresetId::Female1stClass))
            .unwrap_err();
        assert!(error.to_string().contains("Fare"), "{error}");
    }

    #[test]
    fn passthrough_of_text_column_is_a_dtype_error() {
        let preprocess = Preprocess {
            columns: vec![ColumnSpec::Passthrough {
                name: Field::Embarked.name().to_string(),
            }],
        };
        let error = preprocess
            .transform(&frame(PresetId::Female1stClass))
            .unwrap_err();
        assert!(matches!(error, ModelError::Dtype { .. }), "{error}");
    }

    #[test]
    fn validation_rejects_bad_category_lists() {
        let empty = Preprocess {
            columns: vec![one_hot("Sex", &[], HandleUnknown::Error)],
        };
        assert_eq!(
            empty.validate(),
            Err(ArtifactError::NoCategories("Sex".to_string()))
        );
        let duplicate = Preprocess {
            columns: vec![one_hot("Sex", &["male", "male"], HandleUnknown::Error)],
        };
        assert!(matches!(
            duplicate.validate(),
            Err(ArtifactError::DuplicateCategory { .. })
        ));
    }
}
