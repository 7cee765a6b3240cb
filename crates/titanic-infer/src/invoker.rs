//! Single-record inference against a loaded artifact.

use serde::Serialize;
use titanic_model::{InferenceError, PassengerRecord, Result};

use crate::artifact::{ClassLabel, ModelArtifact};
use crate::frame::record_frame;

/// Outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: ClassLabel,
    /// Probability of the second class in the artifact's class order, when
    /// the artifact can score.
    pub probability: Option<f64>,
}

/// Run the artifact on `record`.
///
/// Failures raised by the artifact come back as
/// [`InferenceError::SchemaMismatch`] with the artifact's own message.
pub fn infer(record: &PassengerRecord, model: Option<&ModelArtifact>) -> Result<PredictionResult> {
    let model = model.ok_or(InferenceError::NoModel)?;
    let frame = record_frame(record).map_err(mismatch)?;

    let label = model.classifier().classify(&frame).map_err(mismatch)?;

    let probability = match model.scorer() {
        Some(scorer) => {
            let scores = scorer.score(&frame).map_err(mismatch)?;
            Some(positive_class(&scores)?)
        }
        None => None,
    };

    tracing::info!(
        label = %label,
        probability = ?probability,
        model = %model.info().name,
        "prediction complete"
    );
    Ok(PredictionResult { label, probability })
}

/// Transformed feature vector of `record`, if the artifact has a
/// preprocessing step. Failures are logged and yield `None`.
pub fn preview_features(record: &PassengerRecord, model: &ModelArtifact) -> Option<Vec<f64>> {
    let transform = model.preprocess()?;
    let preview = record_frame(record)
        .map_err(crate::ModelError::from)
        .and_then(|frame| transform.transform(&frame));
    match preview {
        Ok(features) => Some(features),
        Err(error) => {
            tracing::debug!(%error, "skipping feature preview");
            None
        }
    }
}

fn positive_class(scores: &[f64]) -> Result<f64> {
    let Some(&probability) = scores.get(1) else {
        return Err(InferenceError::SchemaMismatch(format!(
            "probability output has {} classes; at least two are required",
            scores.len()
        )));
    };
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(InferenceError::SchemaMismatch(format!(
            "probability {probability} is not in [0, 1]"
        )));
    }
    Ok(probability)
}

fn mismatch(error: impl std::fmt::Display) -> InferenceError {
    InferenceError::SchemaMismatch(error.to_string())
}
