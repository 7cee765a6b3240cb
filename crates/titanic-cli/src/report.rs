//! Terminal rendering of records, predictions and model metadata.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::fmt::Write as _;

use titanic_infer::{ModelArtifact, PredictionResult};
use titanic_model::{Field, PassengerRecord, PresetId, Selections};

pub fn fields_table() -> Table {
    let defaults = Selections::defaults();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Values"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    for field in Field::ALL {
        let default = defaults
            .get(field)
            .map_or_else(|| dim_cell("-"), Cell::new);
        table.add_row(vec![
            field_cell(field),
            Cell::new(field.label()),
            Cell::new(if field.is_integer() { "integer" } else { "category" }),
            Cell::new(field.domain()),
            default,
        ]);
    }
    table
}

pub fn presets_table() -> Table {
    let fields: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|field| *field != Field::PassengerId)
        .collect();
    let mut table = Table::new();
    let mut header = vec![header_cell("Preset"), header_cell("Slug")];
    header.extend(fields.iter().map(|field| header_cell(field.name())));
    table.set_header(header);
    apply_table_style(&mut table);
    table.set_width(160);
    for id in PresetId::ALL {
        let preset = id.preset();
        let mut row = vec![
            Cell::new(id.label()).add_attribute(Attribute::Bold),
            dim_cell(id.slug()),
        ];
        row.extend(fields.iter().map(|field| {
            preset
                .get(*field)
                .map_or_else(|| dim_cell("-"), Cell::new)
        }));
        table.add_row(row);
    }
    table
}

pub fn record_table(record: &PassengerRecord) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (field, value) in record.fields() {
        table.add_row(vec![field_cell(field), Cell::new(value)]);
    }
    table
}

/// The line shown above the Predict button.
pub fn input_summary(record: &PassengerRecord) -> String {
    format!("Input summary (no column names): {}", record.summary_row())
}

/// Plain-text prediction outcome.
pub fn prediction_report(result: &PredictionResult, preview: Option<&[f64]>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Predicted class: {}", result.label);
    match result.probability {
        Some(probability) => {
            let _ = writeln!(out, "Survival probability: {probability:.3}");
        }
        None => out.push_str("Survival probability: not available for this model\n"),
    }
    if let Some(features) = preview {
        let _ = writeln!(out, "Transformed array preview: {}", format_features(features));
    }
    out
}

pub fn model_info_table(artifact: &ModelArtifact) -> Table {
    let info = artifact.info();
    let capabilities = artifact.capabilities();
    let classes = info
        .classes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Name"), Cell::new(&info.name)]);
    table.add_row(vec![Cell::new("Source"), Cell::new(&info.source)]);
    table.add_row(vec![
        Cell::new("Format"),
        info.format
            .map_or_else(|| dim_cell("-"), Cell::new),
    ]);
    table.add_row(vec![Cell::new("Estimator"), Cell::new(&info.estimator)]);
    table.add_row(vec![Cell::new("Classes"), Cell::new(classes)]);
    table.add_row(vec![
        Cell::new("Probabilities"),
        flag_cell(capabilities.probability),
    ]);
    table.add_row(vec![
        Cell::new("Preprocess step"),
        flag_cell(capabilities.preprocess),
    ]);
    table.add_row(vec![
        Cell::new("SHA-256"),
        info.sha256
            .as_deref()
            .map_or_else(|| dim_cell("-"), dim_cell),
    ]);
    table.add_row(vec![
        Cell::new("Loaded at"),
        Cell::new(info.loaded_at.format("%Y-%m-%d %H:%M:%S")),
    ]);
    table
}

/// Feature values as a bracketed list; whole numbers print without a fraction.
pub fn format_features(features: &[f64]) -> String {
    let values: Vec<String> = features.iter().map(ToString::to_string).collect();
    format!("[{}]", values.join(", "))
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: Field) -> Cell {
    Cell::new(field.name())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
