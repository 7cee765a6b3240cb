//! Error types raised by model artifacts.

use polars::prelude::PolarsError;
use thiserror::Error;

/// A failure raised by an artifact while handling a record.
///
/// The invoker reports any of these as a schema mismatch, passing the
/// message through unchanged.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error("expected a single input row, got {0}")]
    RowCount(usize),
    #[error("column '{column}' has dtype {actual}, expected {expected}")]
    Dtype {
        column: String,
        expected: &'static str,
        actual: String,
    },
    #[error("column '{column}' is null")]
    NullValue { column: String },
    #[error("found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },
    #[error("X has {actual} features, but {estimator} is expecting {expected} features as input")]
    FeatureCount {
        estimator: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{0}")]
    Other(String),
}

/// Structural problems in a serialized pipeline, found before any record is seen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArtifactError {
    #[error("unsupported artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("artifact declares {0} classes; at least two are required")]
    TooFewClasses(usize),
    #[error("duplicate class label {0}")]
    DuplicateClass(i64),
    #[error("{estimator} is a binary classifier but the artifact declares {classes} classes")]
    NotBinary {
        estimator: &'static str,
        classes: usize,
    },
    #[error("decision tree has no nodes")]
    EmptyTree,
    #[error("tree node {node} has invalid child index {child}")]
    InvalidChild { node: usize, child: usize },
    #[error("tree leaf {node} has {width} class weights, expected {classes}")]
    LeafWidth {
        node: usize,
        width: usize,
        classes: usize,
    },
    #[error("tree leaf {node} has no positive class weight")]
    EmptyLeaf { node: usize },
    #[error("{what} must be a finite number")]
    NonFinite { what: String },
    #[error("column '{0}' has no categories")]
    NoCategories(String),
    #[error("category '{value}' appears twice in column '{column}'")]
    DuplicateCategory { column: String, value: String },
}
