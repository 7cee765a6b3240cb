//! Per-front-end session state.
//!
//! A session owns the form selections, the chosen preset, the live artifact
//! and the outcome of the last load. Front ends create one at startup and
//! drop it on exit.

use std::fmt;
use std::path::{Path, PathBuf};

use titanic_model::{
    DEFAULT_PASSENGER_ID, Field, FieldValue, InferenceError, PassengerRecord, PresetId, Result,
    Selections,
};

use crate::artifact::ModelArtifact;
use crate::invoker::{PredictionResult, infer, preview_features};
use crate::loader::{Upload, load, load_upload};

/// File name the app looks for when nothing was uploaded.
pub const DEFAULT_MODEL_PATH: &str = "Tree_clf.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub default_model_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Result of the most recent load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    LoadedDefault { path: PathBuf },
    Uploaded { name: Option<String> },
    NoModel { path: PathBuf },
    UploadFailed { message: String, kept_previous: bool },
}

impl LoadStatus {
    pub fn severity(&self) -> Severity {
        match self {
            LoadStatus::LoadedDefault { .. } => Severity::Info,
            LoadStatus::Uploaded { .. } => Severity::Success,
            LoadStatus::NoModel { .. } => Severity::Warning,
            LoadStatus::UploadFailed { .. } => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            LoadStatus::LoadedDefault { path } => {
                format!("Loaded your model from {}.", path.display())
            }
            LoadStatus::Uploaded { .. } => "Model uploaded and loaded successfully.".to_string(),
            LoadStatus::NoModel { path } => format!(
                "No model found at {}. Please upload a trained pipeline (.json or .toml).",
                path.display()
            ),
            LoadStatus::UploadFailed {
                message,
                kept_previous,
            } => {
                let mut text = format!("Failed to load uploaded model: {message}");
                if *kept_previous {
                    text.push_str(" The previous model is still in use.");
                }
                text
            }
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

pub struct Session {
    config: SessionConfig,
    selections: Selections,
    preset: Option<PresetId>,
    artifact: Option<ModelArtifact>,
    status: LoadStatus,
}

impl Session {
    /// Start a session with default selections and the default artifact, if
    /// one can be loaded.
    pub fn start(config: SessionConfig) -> Self {
        let path = config.default_model_path.clone();
        let (artifact, status) = match load(None, &path) {
            Ok(artifact) => (Some(artifact), LoadStatus::LoadedDefault { path }),
            Err(_) => (None, LoadStatus::NoModel { path }),
        };
        Self {
            config,
            selections: Selections::defaults(),
            preset: None,
            artifact,
            status,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn default_model_path(&self) -> &Path {
        &self.config.default_model_path
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn preset(&self) -> Option<PresetId> {
        self.preset
    }

    pub fn artifact(&self) -> Option<&ModelArtifact> {
        self.artifact.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Reset the form to defaults plus `preset`, keeping the PassengerId.
    pub fn apply_preset(&mut self, preset: Option<PresetId>) {
        let passenger_id = self
            .selections
            .get(Field::PassengerId)
            .cloned()
            .unwrap_or(FieldValue::Int(DEFAULT_PASSENGER_ID));
        let mut selections = Selections::with_preset(preset);
        selections.set(Field::PassengerId, passenger_id);
        self.selections = selections;
        self.preset = preset;
        tracing::debug!(preset = ?preset.as_ref().map(PresetId::slug), "applied preset");
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.selections.set(field, value);
    }

    pub fn record(&self) -> Result<PassengerRecord> {
        self.selections.build()
    }

    pub fn predict(&self) -> Result<PredictionResult> {
        let record = self.record()?;
        infer(&record, self.artifact.as_ref())
    }

    /// Transformed features of the current record, when available.
    pub fn preview(&self) -> Option<Vec<f64>> {
        let record = self.record().ok()?;
        preview_features(&record, self.artifact.as_ref()?)
    }

    /// Replace the live artifact with an uploaded one.
    ///
    /// On failure the previous artifact stays loaded.
    pub fn upload(&mut self, upload: Upload<'_>) -> Result<()> {
        match load_upload(upload) {
            Ok(artifact) => {
                self.artifact = Some(artifact);
                self.status = LoadStatus::Uploaded {
                    name: upload.name.map(str::to_string),
                };
                Ok(())
            }
            Err(error) => {
                let message = match &error {
                    InferenceError::LoadFailed(message) => message.clone(),
                    other => other.to_string(),
                };
                self.status = LoadStatus::UploadFailed {
                    message,
                    kept_previous: self.artifact.is_some(),
                };
                Err(error)
            }
        }
    }

    /// Record an upload that never reached the loader, e.g. an unreadable file.
    pub fn upload_failed(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::UploadFailed {
            message: message.into(),
            kept_previous: self.artifact.is_some(),
        };
    }

    /// Reload the default artifact, replacing the live one when it loads.
    pub fn reload_default(&mut self) -> Result<()> {
        let path = self.config.default_model_path.clone();
        match load(None, &path) {
            Ok(artifact) => {
                self.artifact = Some(artifact);
                self.status = LoadStatus::LoadedDefault { path };
                Ok(())
            }
            Err(error) => {
                if self.artifact.is_none() {
                    self.status = LoadStatus::NoModel { path };
                }
                Err(error)
            }
        }
    }
}
