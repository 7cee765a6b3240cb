//! Invoker behavior against stub and fixture artifacts.

use std::sync::Arc;

use polars::prelude::DataFrame;
use titanic_infer::{
    ArtifactFormat, ArtifactInfo, ClassLabel, Classifier, ModelArtifact, ModelError,
    PredictionResult, ProbabilityScorer, Upload, infer, load_upload, preview_features,
};
use titanic_model::{Field, InferenceError, PassengerRecord, PresetId, Selections};

const TREE_JSON: &[u8] = include_bytes!("fixtures/tree_clf.json");
const SVC_JSON: &[u8] = include_bytes!("fixtures/svc.json");

const CLASSES: [ClassLabel; 2] = [ClassLabel(0), ClassLabel(1)];

/// Always answers class 0 with the given survival probability.
struct StubModel {
    probability: f64,
}

impl Classifier for StubModel {
    fn classify(&self, input: &DataFrame) -> Result<ClassLabel, ModelError> {
        assert_eq!(input.height(), 1);
        assert_eq!(input.width(), 10);
        Ok(ClassLabel(0))
    }

    fn classes(&self) -> &[ClassLabel] {
        &CLASSES
    }
}

impl ProbabilityScorer for StubModel {
    fn score(&self, _input: &DataFrame) -> Result<Vec<f64>, ModelError> {
        Ok(vec![1.0 - self.probability, self.probability])
    }
}

struct FailingModel;

impl Classifier for FailingModel {
    fn classify(&self, _input: &DataFrame) -> Result<ClassLabel, ModelError> {
        Err(ModelError::Other(
            "columns are missing: {'Fare'}".to_string(),
        ))
    }

    fn classes(&self) -> &[ClassLabel] {
        &CLASSES
    }
}

fn stub_artifact(probability: f64) -> ModelArtifact {
    let stub = Arc::new(StubModel { probability });
    ModelArtifact::new(ArtifactInfo::in_memory("stub", "StubModel"), stub.clone()).with_scorer(stub)
}

fn record(preset: PresetId) -> PassengerRecord {
    Selections::with_preset(Some(preset)).build().unwrap()
}

fn tree() -> ModelArtifact {
    load_upload(Upload::new(TREE_JSON, ArtifactFormat::Json)).unwrap()
}

#[test]
fn stub_prediction_for_typical_male() {
    let record = record(PresetId::TypicalMale3rdClass);
    assert_eq!(record.passenger_id.get(), 1);
    let artifact = stub_artifact(0.12);

    let result = infer(&record, Some(&artifact)).unwrap();
    assert_eq!(
        result,
        PredictionResult {
            label: ClassLabel(0),
            probability: Some(0.12),
        }
    );
}

#[test]
fn infer_is_idempotent() {
    let artifact = tree();
    for preset in PresetId::ALL {
        let record = record(*preset);
        let first = infer(&record, Some(&artifact)).unwrap();
        let second = infer(&record, Some(&artifact)).unwrap();
        assert_eq!(first, second, "{preset}");
    }
}

#[test]
fn no_artifact_is_no_model() {
    let record = record(PresetId::ChildSample);
    assert_eq!(infer(&record, None), Err(InferenceError::NoModel));
}

#[test]
fn classifier_without_scorer_has_no_probability() {
    let stub = Arc::new(StubModel { probability: 0.3 });
    let artifact = ModelArtifact::new(ArtifactInfo::in_memory("stub", "StubModel"), stub);
    let result = infer(&record(PresetId::Female1stClass), Some(&artifact)).unwrap();
    assert_eq!(result.probability, None);

    let svc = load_upload(Upload::new(SVC_JSON, ArtifactFormat::Json)).unwrap();
    assert!(!svc.capabilities().probability);
    let result = infer(&record(PresetId::Female1stClass), Some(&svc)).unwrap();
    assert_eq!(result.label, ClassLabel(1));
    assert_eq!(result.probability, None);
}

#[test]
fn artifact_failures_become_schema_mismatch_verbatim() {
    let artifact = ModelArtifact::new(
        ArtifactInfo::in_memory("broken", "FailingModel"),
        Arc::new(FailingModel),
    );
    assert_eq!(
        infer(&record(PresetId::ChildSample), Some(&artifact)),
        Err(InferenceError::SchemaMismatch(
            "columns are missing: {'Fare'}".to_string()
        ))
    );
}

#[test]
fn out_of_range_probability_is_schema_mismatch() {
    let artifact = stub_artifact(1.5);
    assert!(matches!(
        infer(&record(PresetId::ChildSample), Some(&artifact)),
        Err(InferenceError::SchemaMismatch(_))
    ));
}

#[test]
fn sample_tree_predictions() {
    let artifact = tree();

    let male = infer(&record(PresetId::TypicalMale3rdClass), Some(&artifact)).unwrap();
    assert_eq!(male.label, ClassLabel(0));
    assert_eq!(male.probability, Some(47.0 / 407.0));

    let female = infer(&record(PresetId::Female1stClass), Some(&artifact)).unwrap();
    assert_eq!(female.label, ClassLabel(1));
    assert_eq!(female.probability, Some(161.0 / 170.0));

    let child = infer(&record(PresetId::ChildSample), Some(&artifact)).unwrap();
    assert_eq!(child.label, ClassLabel(1));
    assert_eq!(child.probability, Some(23.0 / 40.0));
}

#[test]
fn unknown_category_in_artifact_vocabulary_is_schema_mismatch() {
    let json = std::str::from_utf8(TREE_JSON)
        .unwrap()
        .replace("\"Rare Title\"", "\"Rev\"");
    let artifact = load_upload(Upload::new(json.as_bytes(), ArtifactFormat::Json)).unwrap();

    let mut selections = Selections::with_preset(Some(PresetId::TypicalMale3rdClass));
    selections.set(Field::Title, "Rare Title");
    let record = selections.build().unwrap();

    assert_eq!(
        infer(&record, Some(&artifact)),
        Err(InferenceError::SchemaMismatch(
            "found unknown category 'Rare Title' in column 'Title' during transform".to_string()
        ))
    );
}

#[test]
fn preview_shows_transformed_features() {
    let artifact = tree();
    let features = preview_features(&record(PresetId::TypicalMale3rdClass), &artifact).unwrap();
    assert_eq!(
        features,
        vec![
            3.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
            0.0, 1.0,
        ]
    );

    let stub = stub_artifact(0.5);
    assert_eq!(preview_features(&record(PresetId::ChildSample), &stub), None);
}
