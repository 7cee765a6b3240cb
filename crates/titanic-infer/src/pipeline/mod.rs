//! Serialized classification pipelines: an optional preprocessing step
//! followed by a fitted estimator.

mod estimator;
mod preprocess;

pub use estimator::{Estimator, TreeNode};
pub use preprocess::{ColumnSpec, HandleUnknown, Preprocess};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::artifact::{ClassLabel, Classifier, FeatureTransform, ProbabilityScorer};
use crate::error::{ArtifactError, ModelError};
use crate::frame::int_cell;

/// The only artifact layout this build understands.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk form of a pipeline, shared by the JSON and TOML encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSpec {
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub classes: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocess: Option<Preprocess>,
    pub estimator: Estimator,
}

/// A validated pipeline, ready to score records.
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: Option<String>,
    classes: Vec<ClassLabel>,
    preprocess: Option<Preprocess>,
    estimator: Estimator,
}

impl Pipeline {
    /// Check everything that can be checked without a record.
    pub fn from_spec(spec: PipelineSpec) -> Result<Self, ArtifactError> {
        if spec.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: spec.format_version,
                expected: FORMAT_VERSION,
            });
        }
        if spec.classes.len() < 2 {
            return Err(ArtifactError::TooFewClasses(spec.classes.len()));
        }
        let mut seen = BTreeSet::new();
        for class in &spec.classes {
            if !seen.insert(*class) {
                return Err(ArtifactError::DuplicateClass(*class));
            }
        }
        if let Some(preprocess) = &spec.preprocess {
            preprocess.validate()?;
        }
        spec.estimator.validate(spec.classes.len())?;

        Ok(Self {
            name: spec.name,
            classes: spec.classes.into_iter().map(ClassLabel).collect(),
            preprocess: spec.preprocess,
            estimator: spec.estimator,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn preprocess(&self) -> Option<&Preprocess> {
        self.preprocess.as_ref()
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Feature vector handed to the estimator.
    ///
    /// Without a preprocessing step every input column is used as is, which
    /// only works for all-integer frames.
    fn features(&self, input: &DataFrame) -> Result<Vec<f64>, ModelError> {
        if let Some(preprocess) = &self.preprocess {
            return preprocess.transform(input);
        }
        if input.height() != 1 {
            return Err(ModelError::RowCount(input.height()));
        }
        input
            .get_column_names()
            .into_iter()
            .map(|name| int_cell(input, name.as_str()).map(|v| v as f64))
            .collect()
    }
}

impl Classifier for Pipeline {
    fn classify(&self, input: &DataFrame) -> Result<ClassLabel, ModelError> {
        let features = self.features(input)?;
        let index = self.estimator.predict_index(&features)?;
        self.classes.get(index).copied().ok_or_else(|| {
            ModelError::Other(format!(
                "estimator predicted class index {index} but only {} classes are known",
                self.classes.len()
            ))
        })
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }
}

impl ProbabilityScorer for Pipeline {
    fn score(&self, input: &DataFrame) -> Result<Vec<f64>, ModelError> {
        let features = self.features(input)?;
        self.estimator.predict_proba(&features)?.ok_or_else(|| {
            ModelError::Other(format!(
                "{} does not provide class probabilities",
                self.estimator.kind()
            ))
        })
    }
}

impl FeatureTransform for Pipeline {
    fn transform(&self, input: &DataFrame) -> Result<Vec<f64>, ModelError> {
        match &self.preprocess {
            Some(preprocess) => preprocess.transform(input),
            None => Err(ModelError::Other(
                "pipeline has no preprocess step".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::record_frame;
    use titanic_model::{PresetId, Selections};

    fn logistic_spec() -> PipelineSpec {
        PipelineSpec {
            format_version: FORMAT_VERSION,
            name: Some("sex only".to_string()),
            classes: vec![0, 1],
            preprocess: Some(Preprocess {
                columns: vec![ColumnSpec::OneHot {
                    name: "Sex".to_string(),
                    categories: vec!["female".to_string(), "male".to_string()],
                    handle_unknown: HandleUnknown::Error,
                }],
            }),
            estimator: Estimator::LogisticRegression {
                coef: vec![1.0, -1.0],
                intercept: 0.0,
            },
        }
    }

    fn frame(preset: PresetId) -> DataFrame {
        record_frame(&Selections::with_preset(Some(preset)).build().unwrap()).unwrap()
    }

    #[test]
    fn classifies_through_preprocess() {
        let pipeline = Pipeline::from_spec(logistic_spec()).unwrap();
        assert_eq!(
            pipeline.classify(&frame(PresetId::Female1stClass)).unwrap(),
            ClassLabel(1)
        );
        assert_eq!(
            pipeline
                .classify(&frame(PresetId::TypicalMale3rdClass))
                .unwrap(),
            ClassLabel(0)
        );
        let proba = pipeline.score(&frame(PresetId::Female1stClass)).unwrap();
        assert_eq!(proba.len(), 2);
        assert!(proba[1] > 0.5);
    }

    #[test]
    fn rejects_unsupported_version() {
        let spec = PipelineSpec {
            format_version: 7,
            ..logistic_spec()
        };
        assert_eq!(
            Pipeline::from_spec(spec).unwrap_err(),
            ArtifactError::UnsupportedVersion {
                found: 7,
                expected: FORMAT_VERSION
            }
        );
    }

    #[test]
    fn rejects_bad_class_lists() {
        let single = PipelineSpec {
            classes: vec![1],
            ..logistic_spec()
        };
        assert_eq!(
            Pipeline::from_spec(single).unwrap_err(),
            ArtifactError::TooFewClasses(1)
        );
        let duplicate = PipelineSpec {
            classes: vec![1, 1],
            ..logistic_spec()
        };
        assert_eq!(
            Pipeline::from_spec(duplicate).unwrap_err(),
            ArtifactError::DuplicateClass(1)
        );
    }

    #[test]
    fn without_preprocess_text_columns_fail_at_call_time() {
        let spec = PipelineSpec {
            preprocess: None,
            ..logistic_spec()
        };
        let pipeline = Pipeline::from_spec(spec).unwrap();
        let error = pipeline
            .classify(&frame(PresetId::ChildSample))
            .unwrap_err();
        assert!(matches!(error, ModelError::Dtype { .. }), "{error}");
        assert!(FeatureTransform::transform(&pipeline, &frame(PresetId::ChildSample)).is_err());
    }
}
