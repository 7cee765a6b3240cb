//! Model artifacts and single-record inference for the Titanic survival
//! predictor.
//!
//! [`loader`] turns uploaded bytes or the default file into a
//! [`ModelArtifact`], [`invoker`] runs a [`PassengerRecord`] through it, and
//! [`session`] keeps both together for a front end.
//!
//! [`PassengerRecord`]: titanic_model::PassengerRecord

pub mod artifact;
pub mod error;
pub mod frame;
pub mod hash;
pub mod invoker;
pub mod loader;
pub mod pipeline;
pub mod session;

pub use artifact::{
    ArtifactInfo, ArtifactSource, Capabilities, ClassLabel, Classifier, FeatureTransform,
    ModelArtifact, ProbabilityScorer,
};
pub use error::{ArtifactError, ModelError};
pub use frame::record_frame;
pub use hash::sha256_hex;
pub use invoker::{PredictionResult, infer, preview_features};
pub use loader::{ArtifactFormat, Upload, decode, load, load_default, load_upload};
pub use pipeline::{FORMAT_VERSION, Pipeline, PipelineSpec};
pub use session::{DEFAULT_MODEL_PATH, LoadStatus, Session, SessionConfig, Severity};
