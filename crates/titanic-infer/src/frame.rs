//! Single-row frame conversion.
//!
//! Artifacts receive the record as a one-row `DataFrame` with the canonical
//! columns in order: `Int64` for integer fields, `String` for categories.

use polars::prelude::{Column, DataFrame, DataType, PolarsResult};
use titanic_model::{FieldValue, PassengerRecord};

use crate::error::ModelError;

/// Build the one-row input frame for `record`.
pub fn record_frame(record: &PassengerRecord) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = record
        .fields()
        .into_iter()
        .map(|(field, value)| match value {
            FieldValue::Int(value) => Column::new(field.name().into(), vec![value]),
            FieldValue::Text(value) => Column::new(field.name().into(), vec![value]),
        })
        .collect();
    DataFrame::new(columns)
}

/// Read the only row of an integer column.
pub(crate) fn int_cell(input: &DataFrame, name: &str) -> Result<i64, ModelError> {
    let column = input.column(name)?;
    let value = match column.dtype() {
        DataType::Int64 => column.i64()?.get(0),
        DataType::Int32 => column.i32()?.get(0).map(i64::from),
        other => {
            return Err(ModelError::Dtype {
                column: name.to_string(),
                expected: "i64",
                actual: other.to_string(),
            });
        }
    };
    value.ok_or_else(|| ModelError::NullValue {
        column: name.to_string(),
    })
}

/// Read the only row of a string column.
pub(crate) fn str_cell<'a>(input: &'a DataFrame, name: &str) -> Result<&'a str, ModelError> {
    let column = input.column(name)?;
    if column.dtype() != &DataType::String {
        return Err(ModelError::Dtype {
            column: name.to_string(),
            expected: "str",
            actual: column.dtype().to_string(),
        });
    }
    column
        .str()?
        .get(0)
        .ok_or_else(|| ModelError::NullValue {
            column: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_model::{Field, PresetId, Selections};

    fn typical_male() -> PassengerRecord {
        Selections::with_preset(Some(PresetId::TypicalMale3rdClass))
            .build()
            .unwrap()
    }

    #[test]
    fn frame_has_canonical_columns_and_dtypes() {
        let frame = record_frame(&typical_male()).unwrap();
        assert_eq!(frame.height(), 1);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        let expected: Vec<String> = Field::ALL.iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, expected);

        for field in Field::ALL {
            let dtype = frame.column(field.name()).unwrap().dtype().clone();
            if field.is_integer() {
                assert_eq!(dtype, DataType::Int64, "{field}");
            } else {
                assert_eq!(dtype, DataType::String, "{field}");
            }
        }
    }

    #[test]
    fn cells_read_back() {
        let frame = record_frame(&typical_male()).unwrap();
        assert_eq!(int_cell(&frame, "Pclass").unwrap(), 3);
        assert_eq!(str_cell(&frame, "GrpSize").unwrap(), "Couple");
    }

    #[test]
    fn wrong_dtype_is_reported() {
        let frame = record_frame(&typical_male()).unwrap();
        let error = int_cell(&frame, "Sex").unwrap_err();
        assert!(error.to_string().starts_with("column 'Sex' has dtype"));
        assert!(str_cell(&frame, "Pclass").is_err());
    }

    #[test]
    fn missing_column_is_a_polars_error() {
        let frame = record_frame(&typical_male()).unwrap();
        let error = int_cell(&frame, "Fare").unwrap_err();
        assert!(matches!(error, ModelError::Polars(_)));
    }
}
