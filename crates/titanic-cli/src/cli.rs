//! CLI argument definitions for the survival predictor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use titanic_infer::{ArtifactFormat, DEFAULT_MODEL_PATH};
use titanic_model::{Field, PresetId};

#[derive(Parser)]
#[command(
    name = "titanic",
    version,
    about = "Titanic survival predictor - score a passenger with a trained pipeline",
    long_about = "Build a passenger record from presets and field overrides, then run it\n\
                  through a trained classification pipeline.\n\n\
                  Pipelines are JSON or TOML artifacts; see `titanic model-info`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Allow passenger values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the record fields and the values each accepts.
    Fields,

    /// List the quick presets.
    Presets,

    /// Build a passenger record and print it.
    Record(RecordArgs),

    /// Build a passenger record and predict survival.
    Predict(PredictArgs),

    /// Load a model and describe it.
    ModelInfo(ModelArgs),
}

/// Where record values come from.
#[derive(Args)]
pub struct InputArgs {
    /// Start from a preset (slug or label, e.g. typical-male-3rd-class).
    #[arg(long = "preset", value_name = "PRESET", value_parser = parse_preset)]
    pub preset: Option<PresetId>,

    /// Override one field, e.g. --set Sex=female --set FareCat=100+.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(Field, String)>,

    /// Passenger identifier (defaults to 1).
    #[arg(long = "passenger-id", value_name = "ID")]
    pub passenger_id: Option<i64>,
}

#[derive(Args)]
pub struct RecordArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the record as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Print the prediction as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// Which artifact to load.
#[derive(Args)]
pub struct ModelArgs {
    /// Default model file, used when nothing is uploaded.
    #[arg(long = "model", value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Artifact file to upload; takes precedence over --model.
    #[arg(long = "upload", value_name = "PATH")]
    pub upload: Option<PathBuf>,

    /// Format of the uploaded file (inferred from its extension when omitted).
    #[arg(long = "format", value_enum, requires = "upload")]
    pub format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Toml,
}

impl From<FormatArg> for ArtifactFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ArtifactFormat::Json,
            FormatArg::Toml => ArtifactFormat::Toml,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_preset(raw: &str) -> Result<PresetId, String> {
    raw.parse()
}

fn parse_assignment(raw: &str) -> Result<(Field, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field: Field = field.trim().parse()?;
    Ok((field, value.to_string()))
}
