mod config;
mod dashboard;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod server;

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
mod fixtures;

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use serde_json::{Map, Value};

use crate::config::{Cli, Command, DashboardArgs, OutputFormat, PredictArgs, ServeArgs, SharedArgs};
use crate::dashboard::{Dashboard, slider_values};
use crate::input::dataset::load_dataset;
use crate::input::{InputError, load_artifacts};
use crate::model::schema::API_FIELDS;
use crate::pipeline::feature_row::{MissingFieldPolicy, build_row, integer_fields};
use crate::pipeline::{PredictError, assess};
use crate::report::json::render_report_json;
use crate::report::text::render_report_text;
use crate::server::AppState;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Predict(#[from] PredictError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Config(String),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init();

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match &cli.command {
        Command::Serve(args) => run_serve(&cli.shared, args),
        Command::Predict(args) => run_predict(&cli.shared, args),
        Command::Dashboard(args) => run_dashboard(&cli.shared, args),
    }
}

fn run_serve(shared: &SharedArgs, args: &ServeArgs) -> Result<(), RunError> {
    let artifacts = Arc::new(load_artifacts(&shared.artifact_paths())?);
    let dashboard = load_dashboard_if_present(&shared.dataset)?.map(Arc::new);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|_| RunError::Config(format!("invalid listen address {}:{}", args.host, args.port)))?;

    let state = AppState {
        artifacts,
        dashboard,
        options: shared.pipeline_options(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(state, addr))?;
    Ok(())
}

/// The API works without the dataset; only the dashboard needs it.
fn load_dashboard_if_present(path: &Path) -> Result<Option<Dashboard>, RunError> {
    match load_dataset(path) {
        Ok(dataset) => Ok(Some(Dashboard::build(&dataset))),
        Err(InputError::MissingInput(p)) => {
            tracing::warn!(path = %p, "reference dataset not found; dashboard disabled");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn run_predict(shared: &SharedArgs, args: &PredictArgs) -> Result<(), RunError> {
    let artifacts = load_artifacts(&shared.artifact_paths())?;

    let fields = match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let Value::Object(fields) = serde_json::from_str::<Value>(&text)? else {
                return Err(RunError::Config(format!(
                    "{} must contain a JSON object",
                    path.display()
                )));
            };
            fields
        }
        None => Map::new(),
    };
    let input = cli_input(&artifacts.features, fields, &args.set)?;

    let policy = if shared.strict_fields {
        MissingFieldPolicy::Reject
    } else {
        MissingFieldPolicy::Default(0)
    };
    let row = build_row(&artifacts.features, &input, policy)?;
    let assessment = assess(&artifacts, &row, shared.factor_policy)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_report_text(&assessment)),
        OutputFormat::Json => println!("{}", render_report_json(&assessment)?),
    }
    Ok(())
}

/// `--input` fields overlaid with `--set` pairs, filtered the same way as an API body.
fn cli_input(
    features: &[String],
    mut fields: Map<String, Value>,
    set: &[(String, i64)],
) -> Result<BTreeMap<String, i64>, PredictError> {
    fields.extend(set.iter().map(|(name, v)| (name.clone(), Value::from(*v))));
    integer_fields(features, &API_FIELDS, &fields)
}

fn run_dashboard(shared: &SharedArgs, args: &DashboardArgs) -> Result<(), RunError> {
    let artifacts = load_artifacts(&shared.artifact_paths())?;
    let dataset = load_dataset(&shared.dataset)?;
    let dashboard = Dashboard::build(&dataset);

    let query: HashMap<String, String> = args
        .set
        .iter()
        .map(|(name, v)| (name.clone(), v.to_string()))
        .collect();
    let values = slider_values(&artifacts.features, &query)?;
    let page = dashboard.render(
        &artifacts,
        &shared.pipeline_options(),
        &values,
        server::routes::DASHBOARD_PATH,
    )?;

    std::fs::write(&args.out, page)?;
    tracing::info!(path = %args.out.display(), "dashboard written");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
