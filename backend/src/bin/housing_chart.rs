//! housing-chart binary
//!
//! Loads the housing table and writes a box-plot SVG, or prints the
//! underlying statistics as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Price by property type, linear axis, to stdout
//! cargo run --bin housing-chart -- --data data/ma_housing_merged.json
//!
//! # Price per sqft on a log axis, written to a file
//! cargo run --bin housing-chart -- --metric pricePerSqft --log-scale --out chart.svg
//!
//! # Statistics only
//! cargo run --bin housing-chart -- --summary
//!
//! # Five cheapest and five most expensive towns, top 30 for the risk breakdown
//! cargo run --bin housing-chart -- --towns 5 --risk-towns 30
//! ```
//!
//! # Environment Variables
//!
//! - `HOUSING_VIZ_DATA_PATH`: Dataset path (overrides the config file)
//! - `HOUSING_VIZ_FETCH_TIMEOUT_SECS`: Fetch timeout in seconds (default: 10)
//! - `HOUSING_VIZ_ELEMENT_ID`: Root element id (default: box-plot)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use housing_viz::api::{DatasetInfo, SummaryReport, TownsReport, DEFAULT_RISK_TOWNS};
use housing_viz::config::ChartConfig;
use housing_viz::controller::ChartController;
use housing_viz::data::{load_state, DatasetState, FileSource};
use housing_viz::models::{Metric, ScaleType};
use housing_viz::render::{BoxPlotRenderer, RenderTarget};
use housing_viz::services::compute_box_plot_data;

#[derive(Debug, Parser)]
#[command(
    name = "housing-chart",
    version,
    about = "Box-and-whisker charts of housing metrics by property type"
)]
struct Cli {
    /// Dataset file (JSON array of listings)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Configuration file (default: housing-viz.toml in standard locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metric to plot: price, pricePerSqft, sqft, priceToIncomeRatio, medianIncome
    #[arg(long)]
    metric: Option<Metric>,

    /// Use a logarithmic value axis
    #[arg(long)]
    log_scale: bool,

    /// Write the SVG here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print box-plot statistics as JSON instead of drawing
    #[arg(long, conflicts_with = "towns")]
    summary: bool,

    /// Print the N cheapest and N most expensive towns as JSON
    #[arg(long, value_name = "N")]
    towns: Option<usize>,

    /// Number of most expensive towns in the risk breakdown of --towns
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RISK_TOWNS)]
    risk_towns: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::load_or_default()?,
    }
    .apply_env_overrides()?;

    let mut options = config.chart_options()?;
    if let Some(metric) = cli.metric {
        options.metric = metric;
    }
    if cli.log_scale {
        options.scale = ScaleType::Log;
    }

    let data_path = cli.data.clone().unwrap_or_else(|| config.data.path.clone());
    info!(
        "Loading {} (timeout {:?})",
        data_path.display(),
        config.fetch_timeout()
    );
    let state = load_state(&FileSource::new(&data_path), config.fetch_timeout()).await;

    if cli.summary || cli.towns.is_some() {
        let dataset = match &state {
            DatasetState::Ready(dataset) => dataset,
            DatasetState::Failed { message } => anyhow::bail!("{}", message),
            DatasetState::Loading => anyhow::bail!("dataset did not finish loading"),
        };
        let json = if let Some(n) = cli.towns {
            serde_json::to_string_pretty(&TownsReport::from_dataset(dataset, n, cli.risk_towns))?
        } else {
            let box_plot = compute_box_plot_data(dataset.listings(), options.metric);
            serde_json::to_string_pretty(&SummaryReport {
                dataset: DatasetInfo::from_dataset(dataset),
                options,
                box_plot,
            })?
        };
        println!("{}", json);
        return Ok(());
    }

    if let DatasetState::Failed { message } = &state {
        warn!("Rendering error state: {}", message);
    }

    let controller = ChartController::new(
        state,
        options,
        BoxPlotRenderer::new(config.layout()),
        RenderTarget::new(config.chart.element_id.clone()),
    );
    let svg = controller.target().to_svg();

    match &cli.out {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} ({} bytes)", path.display(), svg.len());
        }
        None => println!("{}", svg),
    }

    Ok(())
}
