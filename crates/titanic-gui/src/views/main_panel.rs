//! Central panel: about card, input summary, prediction and model info.

use egui::{RichText, Ui};
use titanic_gui::state::{AppState, PredictionOutcome};
use titanic_gui::theme::{self, colors, spacing};
use titanic_infer::Severity;

const ABOUT_TEXT: &str = "This app takes Titanic passenger features and returns a survival \
    prediction from a pre-trained pipeline. The pipeline carries both the preprocessing \
    (column encoders) and the trained classifier. Upload your pipeline (.json or .toml) \
    from training, or place one in the app folder.";

const MODEL_INFO_TEXT: &str =
    "This model predicts the survival of a Titanic passenger from the input data you provide.";

/// Main panel view
pub struct MainPanelView;

impl MainPanelView {
    pub fn show(ui: &mut Ui, state: &mut AppState) {
        ui.add_space(spacing::SM);
        ui.horizontal(|ui| {
            ui.heading(
                RichText::new(format!(
                    "{} Titanic Survival Predictor",
                    egui_phosphor::regular::BOAT
                ))
                .size(26.0)
                .strong(),
            );
        });
        ui.add_space(spacing::MD);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("About this app").size(18.0).strong());
            ui.add_space(spacing::XS);
            ui.label(RichText::new(ABOUT_TEXT).small());
        });
        ui.add_space(spacing::MD);

        let mut predict_clicked = false;
        ui.columns(2, |columns| {
            predict_clicked = input_column(&mut columns[0], state);
            model_column(&mut columns[1], state);
        });
        if predict_clicked {
            state.predict();
        }

        ui.add_space(spacing::LG);
        ui.separator();
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Titanic Survival Predictor · built with egui")
                    .weak()
                    .small(),
            );
        });
    }
}

/// Returns true when Predict was clicked.
fn input_column(ui: &mut Ui, state: &AppState) -> bool {
    ui.label(
        RichText::new("Provide inputs and click Predict")
            .size(18.0)
            .strong(),
    );
    ui.add_space(spacing::XS);
    ui.label(RichText::new("Input summary (no column names):").strong());
    match state.record() {
        Ok(record) => {
            ui.code(record.summary_row());
        }
        Err(error) => {
            message(ui, Severity::Error, &error.to_string());
        }
    }
    ui.separator();

    let clicked = ui
        .button(RichText::new(format!("{} Predict", egui_phosphor::regular::PLAY)).size(16.0))
        .clicked();
    ui.add_space(spacing::SM);

    let status = state.load_status();
    message(ui, status.severity(), &status.message());

    if let Some(outcome) = &state.outcome {
        outcome_messages(ui, outcome);
    }
    clicked
}

fn outcome_messages(ui: &mut Ui, outcome: &PredictionOutcome) {
    match &outcome.result {
        Ok(result) => {
            message(
                ui,
                Severity::Success,
                &format!("Predicted class: {}", result.label),
            );
            if let Some(probability) = result.probability {
                message(
                    ui,
                    Severity::Info,
                    &format!("Survival probability: {probability:.3}"),
                );
            }
            if let Some(features) = &outcome.preview {
                ui.add_space(spacing::XS);
                ui.label("Transformed array preview:");
                let values: Vec<String> = features.iter().map(ToString::to_string).collect();
                ui.code(format!("[{}]", values.join(", ")));
            }
        }
        Err(error) => message(ui, Severity::Error, &error.to_string()),
    }
}

fn model_column(ui: &mut Ui, state: &AppState) {
    ui.label(RichText::new("Model Info").size(18.0).strong());
    ui.add_space(spacing::XS);
    ui.label(MODEL_INFO_TEXT);
    ui.add_space(spacing::SM);

    let Some(artifact) = state.session().artifact() else {
        ui.label(RichText::new("No model loaded").weak());
        return;
    };
    let info = artifact.info();
    let capabilities = artifact.capabilities();
    let classes: Vec<String> = info.classes.iter().map(ToString::to_string).collect();
    egui::Grid::new("model_info")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            row(ui, "Name", &info.name);
            row(ui, "Source", &info.source.to_string());
            row(ui, "Estimator", &info.estimator);
            row(ui, "Classes", &classes.join(", "));
            row(
                ui,
                "Probabilities",
                if capabilities.probability { "yes" } else { "no" },
            );
            row(
                ui,
                "Loaded at",
                &info.loaded_at.format("%H:%M:%S").to_string(),
            );
        });
    if let Some(hash) = &info.sha256 {
        ui.add_space(spacing::XS);
        ui.label(
            RichText::new(format!("sha256 {}", &hash[..hash.len().min(16)]))
                .weak()
                .small()
                .monospace(),
        );
    }
}

fn row(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).strong());
    ui.label(value);
    ui.end_row();
}

fn message(ui: &mut Ui, severity: Severity, text: &str) {
    let color = theme::severity_color(severity);
    let text_color = if severity == Severity::Error {
        colors::ERROR
    } else {
        ui.visuals().text_color()
    };
    egui::Frame::new()
        .fill(color.gamma_multiply(0.15))
        .corner_radius(4.0)
        .inner_margin(spacing::SM)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{} {text}", theme::severity_icon(severity)))
                    .color(text_color),
            );
        });
    ui.add_space(spacing::XS);
}
