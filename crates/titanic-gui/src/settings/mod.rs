//! User settings for the predictor GUI, persisted as TOML.

mod persistence;

pub use persistence::{
    SettingsError, load_settings, load_settings_from, save_settings, save_settings_to,
    settings_path,
};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use titanic_infer::DEFAULT_MODEL_PATH;
use titanic_model::PresetId;

/// Application settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub form: FormSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable dark mode theme.
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Artifact loaded at startup when nothing has been uploaded.
    pub default_path: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Reopen with the preset chosen last time.
    pub remember_preset: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_preset: Option<PresetId>,
}

impl Settings {
    /// Preset to apply at startup.
    pub fn startup_preset(&self) -> Option<PresetId> {
        if self.form.remember_preset {
            self.form.last_preset
        } else {
            None
        }
    }
}
