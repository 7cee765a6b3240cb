use anyhow::{Context, Result};
use tracing::info_span;

use titanic_infer::{ArtifactFormat, ModelArtifact, infer, preview_features};
use titanic_model::PassengerRecord;

use crate::cli::{InputArgs, ModelArgs, PredictArgs, RecordArgs};
use titanic_cli::input::{build_record, load_model};
use titanic_cli::report::{
    fields_table, input_summary, model_info_table, prediction_report, presets_table, record_table,
};

pub fn run_fields() {
    println!("{}", fields_table());
}

pub fn run_presets() {
    println!("{}", presets_table());
}

pub fn run_record(args: &RecordArgs) -> Result<()> {
    let record = record_from(&args.input)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("serialize record")?
        );
    } else {
        println!("{}", record_table(&record));
        println!("{}", input_summary(&record));
    }
    Ok(())
}

pub fn run_predict(args: &PredictArgs) -> Result<()> {
    let span = info_span!("predict");
    let _guard = span.enter();

    let record = record_from(&args.input)?;
    let artifact = model_from(&args.model)?;
    let result = infer(&record, Some(&artifact))?;
    let preview = preview_features(&record, &artifact);

    if args.json {
        let output = serde_json::json!({
            "record": record,
            "prediction": result,
            "features": preview,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serialize prediction")?
        );
    } else {
        println!("{}", input_summary(&record));
        print!("{}", prediction_report(&result, preview.as_deref()));
    }
    Ok(())
}

pub fn run_model_info(args: &ModelArgs) -> Result<()> {
    let artifact = model_from(args)?;
    println!("{}", model_info_table(&artifact));
    Ok(())
}

fn record_from(input: &InputArgs) -> Result<PassengerRecord> {
    build_record(input.preset, &input.set, input.passenger_id)
}

fn model_from(args: &ModelArgs) -> Result<ModelArtifact> {
    load_model(
        &args.model,
        args.upload.as_deref(),
        args.format.map(ArtifactFormat::from),
    )
}
