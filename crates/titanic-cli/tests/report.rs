//! Rendering of prediction reports and tables.

use titanic_cli::report::{
    fields_table, format_features, input_summary, model_info_table, prediction_report,
    presets_table, record_table,
};
use titanic_infer::{
    ArtifactFormat, ClassLabel, PredictionResult, Upload, infer, load_upload, preview_features,
};
use titanic_model::{PresetId, Selections};

const SAMPLE_MODEL: &[u8] = include_bytes!("../../../Tree_clf.json");

#[test]
fn report_with_probability() {
    let result = PredictionResult {
        label: ClassLabel(0),
        probability: Some(0.12),
    };
    insta::assert_snapshot!(prediction_report(&result, None), @r"
    Predicted class: 0
    Survival probability: 0.120
    ");
}

#[test]
fn report_without_probability_says_so() {
    let result = PredictionResult {
        label: ClassLabel(1),
        probability: None,
    };
    insta::assert_snapshot!(prediction_report(&result, Some(&[1.0, 0.5])), @r"
    Predicted class: 1
    Survival probability: not available for this model
    Transformed array preview: [1, 0.5]
    ");
}

#[test]
fn sample_model_report_for_child() {
    let artifact = load_upload(Upload::new(SAMPLE_MODEL, ArtifactFormat::Json)).unwrap();
    let record = Selections::with_preset(Some(PresetId::ChildSample))
        .build()
        .unwrap();
    let result = infer(&record, Some(&artifact)).unwrap();
    let preview = preview_features(&record, &artifact);

    let mut text = input_summary(&record);
    text.push('\n');
    text.push_str(&prediction_report(&result, preview.as_deref()));
    insta::assert_snapshot!(text, @r"
    Input summary (no column names): [[1, 2, 'male', 0, 1, 'Q', 'Master', 'Single', '10-25', '0-16']]
    Predicted class: 1
    Survival probability: 0.575
    Transformed array preview: [2, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0]
    ");
}

#[test]
fn feature_list_formatting() {
    assert_eq!(format_features(&[]), "[]");
    assert_eq!(format_features(&[3.0, 0.25]), "[3, 0.25]");
}

#[test]
fn tables_list_every_field_and_preset() {
    let fields = fields_table().to_string();
    for name in ["PassengerId", "SibSp (siblings/spouses)", "Rare Title", "0..=10"] {
        assert!(fields.contains(name), "missing {name}");
    }

    let presets = presets_table().to_string();
    for id in PresetId::ALL {
        assert!(presets.contains(id.label()), "missing {id}");
        assert!(presets.contains(id.slug()), "missing {id}");
    }
}

#[test]
fn record_and_model_tables() {
    let record = Selections::with_preset(Some(PresetId::Female1stClass))
        .build()
        .unwrap();
    let table = record_table(&record).to_string();
    assert!(table.contains("70-100"));
    assert!(table.contains("female"));

    let upload = Upload::new(SAMPLE_MODEL, ArtifactFormat::Json).named("Tree_clf.json");
    let artifact = load_upload(upload).unwrap();
    let info = model_info_table(&artifact).to_string();
    assert!(info.contains("DecisionTreeClassifier"));
    assert!(info.contains("upload 'Tree_clf.json'"));
    assert!(info.contains("0, 1"));
}
