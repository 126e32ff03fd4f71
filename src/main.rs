//! riskchart - render risk forecast and prediction history charts
//!
//! Reads a JSON array of forecast samples or stored predictions and writes the
//! chart as SVG, PNG or PDF, or prints the forecast summary.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use riskchart::export::{export_forecast, export_history, ExportFormat, ExportOptions};
use riskchart::forecast::Placeholder;
use riskchart::samples::{forecast_from_json, history_from_json};
use riskchart::settings::ChartSettings;
use riskchart::stats::summarize_with_threshold;
use riskchart::{build_forecast, build_history};

#[derive(Parser)]
#[command(name = "riskchart", version, about = "Render risk forecast and history charts")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the forecast chart
    Forecast(RenderArgs),
    /// Render the prediction history chart
    History(RenderArgs),
    /// Print forecast summary statistics
    Summary {
        /// Forecast JSON file
        #[arg(short, long)]
        input: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a settings file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Input JSON file
    #[arg(short, long)]
    input: PathBuf,
    /// Output file
    #[arg(short, long)]
    output: PathBuf,
    /// Output format (svg, png, pdf); inferred from the output extension if omitted
    #[arg(short, long)]
    format: Option<ExportFormat>,
}

impl RenderArgs {
    fn export_options(&self, settings: &ChartSettings) -> ExportOptions {
        let format = self
            .format
            .or_else(|| ExportFormat::from_path(&self.output))
            .unwrap_or_default();
        ExportOptions {
            format,
            png_scale: settings.png_scale,
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<ChartSettings> {
    match path {
        Some(path) => ChartSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(ChartSettings::load()),
    }
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => ChartSettings::get_settings_path()
            .context("Could not determine config directory for settings")?,
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ChartSettings::default()
        .save_to(&path)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Command::InitConfig { force } => init_config(config, force)?,
        Command::Forecast(args) => {
            let settings = load_settings(config)?;
            let layout = settings.forecast_layout();
            layout.validate()?;
            let samples = forecast_from_json(&read_input(&args.input)?)
                .with_context(|| format!("Invalid forecast in {}", args.input.display()))?;
            let view = build_forecast(&samples, &layout, settings.high_risk_threshold);
            export_forecast(&view, &layout, &args.output, args.export_options(&settings))
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
        }
        Command::History(args) => {
            let settings = load_settings(config)?;
            let layout = settings.history_layout();
            layout.validate()?;
            let predictions = history_from_json(&read_input(&args.input)?)
                .with_context(|| format!("Invalid history in {}", args.input.display()))?;
            let view = build_history(&predictions, &layout, settings.recent_limit);
            if let Some(chart) = view.chart() {
                let unknown = chart.unknown_risk_count();
                if unknown > 0 {
                    eprintln!("warning: {} prediction(s) have an unknown risk level", unknown);
                }
            }
            export_history(&view, &layout, &args.output, args.export_options(&settings))
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
        }
        Command::Summary { input, json } => {
            let settings = load_settings(config)?;
            let samples = forecast_from_json(&read_input(&input)?)
                .with_context(|| format!("Invalid forecast in {}", input.display()))?;
            let values: Vec<f64> = samples.iter().map(|s| s.premise_index).collect();
            let summary = summarize_with_threshold(&values, settings.high_risk_threshold);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                if samples.is_empty() {
                    let placeholder = Placeholder::FORECAST;
                    println!("{}", placeholder.title);
                    println!("{}", placeholder.detail);
                }
                for card in summary.cards() {
                    println!("{:<16} {}", card.label, card.value);
                }
            }
        }
    }

    Ok(())
}
