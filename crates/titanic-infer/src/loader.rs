//! Artifact loading from an upload or the default path.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};
use titanic_model::{InferenceError, Result};

use crate::artifact::{ArtifactInfo, ArtifactSource, ModelArtifact};
use crate::hash::sha256_hex;
use crate::pipeline::{Pipeline, PipelineSpec};

/// Serialization of an artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Json,
    Toml,
}

impl ArtifactFormat {
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Json, ArtifactFormat::Toml];

    pub fn tag(self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Toml => "toml",
        }
    }

    /// Format implied by a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ArtifactFormat::Toml,
            _ => ArtifactFormat::Json,
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ArtifactFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ArtifactFormat::Json),
            "toml" => Ok(ArtifactFormat::Toml),
            other => Err(format!(
                "unknown artifact format '{other}' (expected json or toml)"
            )),
        }
    }
}

/// User-supplied artifact bytes.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub bytes: &'a [u8],
    pub format: ArtifactFormat,
    pub name: Option<&'a str>,
}

impl<'a> Upload<'a> {
    pub fn new(bytes: &'a [u8], format: ArtifactFormat) -> Self {
        Self {
            bytes,
            format,
            name: None,
        }
    }

    pub fn named(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }
}

/// Load the uploaded artifact if there is one, otherwise the default file.
///
/// Upload failures are [`InferenceError::LoadFailed`]. A default file that is
/// missing or cannot be decoded is [`InferenceError::NoModel`].
pub fn load(upload: Option<Upload<'_>>, default_path: &Path) -> Result<ModelArtifact> {
    match upload {
        Some(upload) => load_upload(upload),
        None => load_default(default_path),
    }
}

pub fn load_upload(upload: Upload<'_>) -> Result<ModelArtifact> {
    let source = ArtifactSource::Upload {
        name: upload.name.map(str::to_string),
    };
    match decode(upload.bytes, upload.format, source) {
        Ok(artifact) => {
            tracing::info!(
                name = %artifact.info().name,
                estimator = %artifact.info().estimator,
                format = %upload.format,
                "loaded uploaded model"
            );
            Ok(artifact)
        }
        Err(message) => {
            tracing::warn!(format = %upload.format, error = %message, "uploaded model rejected");
            Err(InferenceError::LoadFailed(message))
        }
    }
}

pub fn load_default(path: &Path) -> Result<ModelArtifact> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "no default model");
            return Err(InferenceError::NoModel);
        }
    };
    let format = ArtifactFormat::from_path(path);
    match decode(&bytes, format, ArtifactSource::DefaultPath(path.to_path_buf())) {
        Ok(artifact) => {
            tracing::info!(
                path = %path.display(),
                estimator = %artifact.info().estimator,
                "loaded default model"
            );
            Ok(artifact)
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "default model could not be decoded");
            Err(InferenceError::NoModel)
        }
    }
}

/// Deserialize and validate artifact bytes.
pub fn decode(
    bytes: &[u8],
    format: ArtifactFormat,
    source: ArtifactSource,
) -> std::result::Result<ModelArtifact, String> {
    let spec: PipelineSpec = match format {
        ArtifactFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string())?,
        ArtifactFormat::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
            toml::from_str(text).map_err(|e| e.to_string())?
        }
    };
    let pipeline = Pipeline::from_spec(spec).map_err(|e| e.to_string())?;

    let name = pipeline
        .name()
        .map(str::to_string)
        .or_else(|| match &source {
            ArtifactSource::Upload { name } => name.clone(),
            ArtifactSource::DefaultPath(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            ArtifactSource::InMemory => None,
        })
        .unwrap_or_else(|| "unnamed model".to_string());

    let info = ArtifactInfo {
        name,
        source,
        format: Some(format),
        estimator: String::new(),
        classes: Vec::new(),
        sha256: Some(sha256_hex(bytes)),
        loaded_at: Local::now(),
    };
    Ok(ModelArtifact::from_pipeline(pipeline, info))
}
