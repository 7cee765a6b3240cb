//! Settings persistence - load and save settings to disk.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/com.titanic-predictor.Titanic Predictor/
//! - Windows: %APPDATA%/titanic-predictor/Titanic Predictor/config/
//! - Linux: ~/.config/titanicpredictor/

use super::Settings;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "titanic-predictor";
const APP_NAME: &str = "Titanic Predictor";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine settings path")]
    NoConfigDir,
    #[error("failed to create config directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write settings file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Path to the settings file, if the platform has a config directory.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from the platform config directory, falling back to defaults.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Load settings from `path`. Missing or unparsable files give the defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Save settings to the platform config directory.
pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;
    save_settings_to(settings, &path)
}

/// Save settings to `path`, creating the parent directory if needed.
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Saved settings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_model::PresetId;

    #[test]
    fn test_default_settings_serializable() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings);
        assert!(toml.is_ok());
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = Settings::default();
        settings.general.dark_mode = true;
        settings.form.remember_preset = true;
        settings.form.last_preset = Some(PresetId::ChildSample);

        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("last_preset = \"child-sample\""), "{toml_str}");
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Settings = toml::from_str("[general]\ndark_mode = true\n").unwrap();
        assert!(parsed.general.dark_mode);
        assert_eq!(parsed.model, Settings::default().model);
        assert_eq!(parsed.startup_preset(), None);
    }

    #[test]
    fn test_documented_preset_slug_loads() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            concat!(
                "[general]\ndark_mode = true\n\n",
                "[form]\nremember_preset = true\nlast_preset = \"female-1st-class\"\n",
            ),
        )
        .unwrap();

        let settings = load_settings_from(&path);
        assert!(settings.general.dark_mode);
        assert_eq!(settings.startup_preset(), Some(PresetId::Female1stClass));
    }
}
