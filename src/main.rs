//! MenuSnap - dish names from photographed menus
//!
//! Reads a PaddleOCR detection dump and prints the dishes found on the menu.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use menu_snap::config::{self, AppConfig, OutputFormat};
use menu_snap::{MenuReport, MenuService, PaddleJsonDetector};

/// MenuSnap - structure OCR output into dish names
#[derive(Parser, Debug)]
#[command(name = "menu-snap")]
#[command(about = "Reconstruct dish names from OCR text detections of a menu")]
struct Args {
    /// PaddleOCR JSON dump (rec_texts + dt_polys) for one menu image
    #[arg(required_unless_present = "dump_config")]
    input: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Skip the dish-name filter
    #[arg(long)]
    no_filter: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(args.verbose, env.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = load_or_default_config(args.config.as_deref())?;
    if args.no_filter {
        config.filter.enabled = false;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    if args.dump_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let input = args.input.context("no input file given")?;
    let output = config.output.clone();

    let service = MenuService::new(PaddleJsonDetector::new(), config)
        .context("invalid configuration")?;
    let report = service
        .process(&input)
        .with_context(|| format!("failed to process {:?}", input))?;

    info!("Found {} dishes in {:?}", report.dishes.len(), input);
    print_report(&report, output.format, output.pretty)?;

    Ok(())
}

/// `RUST_LOG` directives win; `-v` only picks the default level
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(env.unwrap_or_default())
}

/// Load configuration from an explicit path, the user config file, or defaults
fn load_or_default_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let config = config::load_config(path)
            .with_context(|| format!("failed to load configuration from {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_path) = config::default_config_path() {
        if config_path.exists() {
            let config = config::load_config(&config_path)
                .with_context(|| format!("failed to load configuration from {:?}", config_path))?;
            info!("Loaded configuration from {:?}", config_path);
            return Ok(config);
        }
    }

    info!("Using default configuration");
    Ok(AppConfig::default())
}

fn print_report(report: &MenuReport, format: OutputFormat, pretty: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{}", json);
        }
        OutputFormat::Text => {
            for dish in &report.dishes {
                println!("{}", dish.name);
            }
        }
    }
    Ok(())
}
