use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::input::ArtifactPaths;
use crate::pipeline::PipelineOptions;
use crate::pipeline::factors::FactorPolicy;

#[derive(Debug, Parser)]
#[command(name = "stress-predictor", version, about = "Predict student stress levels from well-being features")]
pub struct Cli {
    #[command(flatten)]
    pub shared: SharedArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct SharedArgs {
    /// Serialized linear model (JSON, optionally .gz).
    #[arg(long, global = true, env = "STRESS_MODEL", default_value = "stress_model.json")]
    pub model: PathBuf,

    /// Ordered feature-name list the model was trained on.
    #[arg(long, global = true, env = "STRESS_FEATURES", default_value = "features.json")]
    pub features: PathBuf,

    /// Reference dataset used by the dashboard charts.
    #[arg(long, global = true, env = "STRESS_DATASET", default_value = "StressLevelDataset.csv")]
    pub dataset: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = FactorPolicy::InputScaled)]
    pub factor_policy: FactorPolicy,

    /// Reject inputs with missing fields instead of filling them with 0.
    #[arg(long, global = true)]
    pub strict_fields: bool,
}

impl SharedArgs {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model.clone(),
            features: self.features.clone(),
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            factor_policy: self.factor_policy,
            strict_fields: self.strict_fields,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API and the dashboard.
    Serve(ServeArgs),
    /// Predict once from command-line values or a JSON file.
    Predict(PredictArgs),
    /// Render the dashboard page for the given slider values to a file.
    Dashboard(DashboardArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// Feature value as `name=value`; repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, i64)>,

    /// JSON object of feature values; `--set` entries override it.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    /// Slider position as `name=value`; repeatable. Unset sliders sit at 1.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, i64)>,

    #[arg(long, default_value = "dashboard.html")]
    pub out: PathBuf,
}

pub fn parse_assignment(raw: &str) -> Result<(String, i64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty feature name in {raw:?}"));
    }
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("value for {name} must be an integer, got {:?}", value.trim()))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
