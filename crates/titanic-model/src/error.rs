use thiserror::Error;

use crate::field::Field;

/// Everything that can make a prediction unavailable for one interaction.
///
/// None of these are fatal: front ends report them and stay interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("no model loaded; upload a trained pipeline or place one at the default path")]
    NoModel,
    #[error("failed to load model: {0}")]
    LoadFailed(String),
    #[error("prediction failed: {0}")]
    SchemaMismatch(String),
    #[error("cannot use {value} for {field}: {message}")]
    TypeCoercionFailed {
        field: Field,
        value: String,
        message: String,
    },
}

impl InferenceError {
    pub(crate) fn coercion(
        field: Field,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TypeCoercionFailed {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;
