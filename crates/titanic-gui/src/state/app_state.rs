//! Application-level state

use std::fs;
use std::path::Path;

use rand::Rng;
use titanic_infer::{ArtifactFormat, LoadStatus, PredictionResult, Session, SessionConfig, Upload};
use titanic_model::{Field, FieldValue, InferenceError, PassengerRecord, PresetId};

use crate::settings::Settings;

/// Upper bound of the PassengerId seeded into a fresh form.
const MAX_SEED_PASSENGER_ID: i64 = 100_000;

/// Result of the last Predict click.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub result: Result<PredictionResult, InferenceError>,
    pub preview: Option<Vec<f64>>,
}

/// Top-level application state
pub struct AppState {
    pub settings: Settings,
    session: Session,
    /// Cleared whenever an input or the model changes.
    pub outcome: Option<PredictionOutcome>,
    /// Settings changed since the last save.
    pub settings_dirty: bool,
}

impl AppState {
    /// Start a session from `settings` with a random PassengerId.
    pub fn new(settings: Settings) -> Self {
        Self::with_passenger_id(settings, random_passenger_id())
    }

    pub fn with_passenger_id(settings: Settings, passenger_id: i64) -> Self {
        let mut session = Session::start(SessionConfig {
            default_model_path: settings.model.default_path.clone(),
        });
        session.set(Field::PassengerId, passenger_id);
        session.apply_preset(settings.startup_preset());
        Self {
            settings,
            session,
            outcome: None,
            settings_dirty: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn preset(&self) -> Option<PresetId> {
        self.session.preset()
    }

    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        self.session.selections().get(field)
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.session.status()
    }

    pub fn record(&self) -> Result<PassengerRecord, InferenceError> {
        self.session.record()
    }

    pub fn select_preset(&mut self, preset: Option<PresetId>) {
        if preset == self.session.preset() {
            return;
        }
        self.session.apply_preset(preset);
        self.outcome = None;
        if self.settings.form.remember_preset {
            self.settings.form.last_preset = preset;
            self.settings_dirty = true;
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<FieldValue>) {
        let value = value.into();
        if self.value(field) == Some(&value) {
            return;
        }
        self.session.set(field, value);
        self.outcome = None;
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        if self.settings.general.dark_mode != dark_mode {
            self.settings.general.dark_mode = dark_mode;
            self.settings_dirty = true;
        }
    }

    pub fn set_remember_preset(&mut self, remember: bool) {
        if self.settings.form.remember_preset != remember {
            self.settings.form.remember_preset = remember;
            self.settings.form.last_preset = if remember { self.preset() } else { None };
            self.settings_dirty = true;
        }
    }

    pub fn predict(&mut self) {
        let result = self.session.predict();
        let preview = result.as_ref().ok().and_then(|_| self.session.preview());
        if let Err(error) = &result {
            tracing::warn!(%error, "prediction unavailable");
        }
        self.outcome = Some(PredictionOutcome { result, preview });
    }

    /// Upload the artifact at `path`. The format follows the file extension.
    ///
    /// A failed upload leaves the current model in place; the load status
    /// carries the message either way.
    pub fn upload_file(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!("Failed to read {:?}: {}", path, error);
                self.session
                    .upload_failed(format!("cannot read {}: {error}", path.display()));
                return;
            }
        };
        let mut upload = Upload::new(&bytes, ArtifactFormat::from_path(path));
        if let Some(name) = name.as_deref() {
            upload = upload.named(name);
        }
        if self.session.upload(upload).is_ok() {
            self.outcome = None;
        }
    }
}

/// A PassengerId for a fresh form, in `1..=100000`.
pub fn random_passenger_id() -> i64 {
    rand::rng().random_range(1..=MAX_SEED_PASSENGER_ID)
}
