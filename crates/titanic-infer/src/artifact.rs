//! Loaded model artifacts and the capabilities they expose.
//!
//! An artifact always classifies. Probability scoring and the transformed
//! feature preview are optional; which ones an artifact offers is decided
//! once at load time and stored as handles.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::loader::ArtifactFormat;
use crate::pipeline::Pipeline;

/// A class value as the artifact reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassLabel(pub i64);

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClassLabel {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Predicts one class label for a single-row frame.
pub trait Classifier: Send + Sync {
    fn classify(&self, input: &DataFrame) -> Result<ClassLabel, ModelError>;

    /// Class labels in scoring order.
    fn classes(&self) -> &[ClassLabel];
}

/// Per-class probabilities for a single-row frame, in `classes()` order.
pub trait ProbabilityScorer: Send + Sync {
    fn score(&self, input: &DataFrame) -> Result<Vec<f64>, ModelError>;
}

/// The pipeline's preprocessing step on its own.
pub trait FeatureTransform: Send + Sync {
    fn transform(&self, input: &DataFrame) -> Result<Vec<f64>, ModelError>;
}

/// Where an artifact came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    Upload { name: Option<String> },
    DefaultPath(PathBuf),
    InMemory,
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactSource::Upload { name: Some(name) } => write!(f, "upload '{name}'"),
            ArtifactSource::Upload { name: None } => f.write_str("upload"),
            ArtifactSource::DefaultPath(path) => write!(f, "{}", path.display()),
            ArtifactSource::InMemory => f.write_str("in memory"),
        }
    }
}

/// Descriptive metadata shown next to a loaded artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactInfo {
    pub name: String,
    pub source: ArtifactSource,
    pub format: Option<ArtifactFormat>,
    pub estimator: String,
    pub classes: Vec<ClassLabel>,
    pub sha256: Option<String>,
    pub loaded_at: DateTime<Local>,
}

impl ArtifactInfo {
    /// Metadata for an artifact built in code rather than decoded from bytes.
    pub fn in_memory(name: impl Into<String>, estimator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ArtifactSource::InMemory,
            format: None,
            estimator: estimator.into(),
            classes: Vec::new(),
            sha256: None,
            loaded_at: Local::now(),
        }
    }
}

/// Which optional capabilities an artifact exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub probability: bool,
    pub preprocess: bool,
}

#[derive(Clone)]
pub struct ModelArtifact {
    info: ArtifactInfo,
    classifier: Arc<dyn Classifier>,
    scorer: Option<Arc<dyn ProbabilityScorer>>,
    preprocess: Option<Arc<dyn FeatureTransform>>,
}

impl ModelArtifact {
    /// An artifact that only classifies. `info.classes` is taken from the
    /// classifier.
    pub fn new(mut info: ArtifactInfo, classifier: Arc<dyn Classifier>) -> Self {
        info.classes = classifier.classes().to_vec();
        Self {
            info,
            classifier,
            scorer: None,
            preprocess: None,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn ProbabilityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_preprocess(mut self, preprocess: Arc<dyn FeatureTransform>) -> Self {
        self.preprocess = Some(preprocess);
        self
    }

    /// Wrap a validated pipeline, resolving its capabilities.
    pub fn from_pipeline(pipeline: Pipeline, mut info: ArtifactInfo) -> Self {
        info.estimator = pipeline.estimator().kind().to_string();
        let has_probabilities = pipeline.estimator().has_probabilities();
        let has_preprocess = pipeline.preprocess().is_some();
        let pipeline = Arc::new(pipeline);

        let mut artifact = Self::new(info, pipeline.clone());
        if has_probabilities {
            artifact = artifact.with_scorer(pipeline.clone());
        }
        if has_preprocess {
            artifact = artifact.with_preprocess(pipeline);
        }
        tracing::debug!(
            estimator = %artifact.info.estimator,
            probability = has_probabilities,
            preprocess = has_preprocess,
            "resolved artifact capabilities"
        );
        artifact
    }

    pub fn info(&self) -> &ArtifactInfo {
        &self.info
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn scorer(&self) -> Option<&dyn ProbabilityScorer> {
        self.scorer.as_deref()
    }

    pub fn preprocess(&self) -> Option<&dyn FeatureTransform> {
        self.preprocess.as_deref()
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            probability: self.scorer.is_some(),
            preprocess: self.preprocess.is_some(),
        }
    }
}

impl fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("info", &self.info)
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}
