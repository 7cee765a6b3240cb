//! Record and model inputs shared by the subcommands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::trace;

use titanic_infer::{ArtifactFormat, ModelArtifact, Upload, load};
use titanic_model::{Field, FieldValue, PassengerRecord, PresetId, Selections};

use crate::logging::redact_value;

/// Defaults, then the preset, then `sets` in order, then the id.
pub fn build_record(
    preset: Option<PresetId>,
    sets: &[(Field, String)],
    passenger_id: Option<i64>,
) -> Result<PassengerRecord> {
    let mut selections = Selections::with_preset(preset);
    for (field, raw) in sets {
        selections.set(*field, FieldValue::parse_for(*field, raw));
    }
    if let Some(id) = passenger_id {
        selections.set(Field::PassengerId, id);
    }
    let record = selections.build()?;
    trace!(record = %redact_value(&record.summary_row()), "built passenger record");
    Ok(record)
}

/// Load `upload` when given, otherwise the default model at `model`.
///
/// The upload format comes from `format`, or from the file extension.
pub fn load_model(
    model: &Path,
    upload: Option<&Path>,
    format: Option<ArtifactFormat>,
) -> Result<ModelArtifact> {
    let Some(path) = upload else {
        return Ok(load(None, model)?);
    };
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let format = format.unwrap_or_else(|| ArtifactFormat::from_path(path));
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let mut upload = Upload::new(&bytes, format);
    if let Some(name) = name.as_deref() {
        upload = upload.named(name);
    }
    Ok(load(Some(upload), model)?)
}
