//! Sidebar: theme toggle, quick presets, feature inputs and model upload.

use egui::{ComboBox, DragValue, RichText, Ui};
use std::path::PathBuf;
use titanic_gui::state::AppState;
use titanic_gui::theme::spacing;
use titanic_model::{Field, FieldKind, FieldValue, PresetId};

/// Sidebar view
pub struct SidebarView;

impl SidebarView {
    /// Render the sidebar.
    ///
    /// Returns a model file if the user picked one to upload.
    pub fn show(ui: &mut Ui, state: &mut AppState) -> Option<PathBuf> {
        let mut upload = None;

        ui.add_space(spacing::SM);
        ui.heading("Input Controls");
        ui.label(RichText::new("Adjust model inputs below").weak());
        ui.add_space(spacing::SM);

        let mut dark_mode = state.settings.general.dark_mode;
        if ui.checkbox(&mut dark_mode, "Dark mode").changed() {
            state.set_dark_mode(dark_mode);
        }

        ui.add_space(spacing::MD);
        ui.label(
            RichText::new(format!("{} Quick presets", egui_phosphor::regular::SLIDERS)).strong(),
        );
        let mut preset = state.preset();
        ui.radio_value(&mut preset, None, "Select...");
        for id in PresetId::ALL {
            ui.radio_value(&mut preset, Some(*id), id.label());
        }
        state.select_preset(preset);

        let mut remember = state.settings.form.remember_preset;
        if ui
            .checkbox(&mut remember, RichText::new("Remember preset").small())
            .changed()
        {
            state.set_remember_preset(remember);
        }

        ui.add_space(spacing::SM);
        ui.separator();
        ui.label(RichText::new("Feature inputs").strong());
        ui.add_space(spacing::XS);

        egui::Grid::new("feature_inputs")
            .num_columns(2)
            .spacing([spacing::SM, spacing::XS])
            .show(ui, |ui| {
                for field in Field::ALL {
                    ui.label(field.label());
                    field_widget(ui, state, field);
                    ui.end_row();
                }
            });

        ui.add_space(spacing::SM);
        ui.separator();
        ui.label(RichText::new("Model").strong());
        ui.add_space(spacing::XS);
        if ui
            .button(format!(
                "{} Upload pipeline (.json, .toml)",
                egui_phosphor::regular::UPLOAD_SIMPLE
            ))
            .clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("Model artifact", &["json", "toml"])
                .pick_file()
        {
            tracing::info!("Selected model file: {:?}", path);
            upload = Some(path);
        }
        if let Some(artifact) = state.session().artifact() {
            ui.label(
                RichText::new(format!("Using {}", artifact.info().name))
                    .weak()
                    .small(),
            );
        }

        upload
    }
}

/// One input restricted to the field's domain.
fn field_widget(ui: &mut Ui, state: &mut AppState, field: Field) {
    let current = state.value(field).cloned();
    match field.kind() {
        FieldKind::Integer { min, max } => {
            let mut value = current
                .as_ref()
                .and_then(FieldValue::as_int)
                .unwrap_or(min);
            let drag = DragValue::new(&mut value)
                .range(min..=max.unwrap_or(i64::MAX))
                .speed(1);
            if ui.add(drag).changed() {
                state.set_field(field, value);
            }
        }
        FieldKind::IntegerChoice(values) => {
            let fallback = values.first().copied().unwrap_or_default();
            let mut value = current
                .as_ref()
                .and_then(FieldValue::as_int)
                .unwrap_or(fallback);
            ComboBox::from_id_salt(field.name())
                .selected_text(value.to_string())
                .show_ui(ui, |ui| {
                    for option in values {
                        ui.selectable_value(&mut value, *option, option.to_string());
                    }
                });
            state.set_field(field, value);
        }
        FieldKind::Categorical(tokens) => {
            let fallback = tokens.first().copied().unwrap_or_default();
            let mut value = current
                .as_ref()
                .and_then(FieldValue::as_text)
                .unwrap_or(fallback)
                .to_string();
            ComboBox::from_id_salt(field.name())
                .selected_text(value.as_str())
                .show_ui(ui, |ui| {
                    for token in tokens {
                        ui.selectable_value(&mut value, (*token).to_string(), *token);
                    }
                });
            state.set_field(field, value);
        }
    }
}
