//! Barometer CLI
//!
//! Polls the weather provider and shows pressure trend and headache risk,
//! or runs the same computations offline.

#![allow(clippy::print_stdout)]

mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::DashboardService;
use clap::{Parser, Subcommand};
use domain::{PollPhase, classify_trend, score_risk};
use infrastructure::{AppConfig, WeatherAdapter, init_telemetry};
use tracing::info;

/// Barometer CLI
#[derive(Parser)]
#[command(name = "barometer")]
#[command(author, version, about = "Weather-based headache risk dashboard", long_about = None)]
struct Cli {
    /// Configuration file (default: ./barometer.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll continuously and print every update until Ctrl-C
    Watch,

    /// Run a single polling cycle and print the result
    Once {
        /// Print the dashboard state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute headache risk from given values without network access
    ///
    /// Example: barometer score --pressure 1012 --change 2 --humidity 75 --condition Mist
    Score {
        /// Forecast pressure in hPa
        #[arg(long)]
        pressure: f64,

        /// Pressure change in hPa (signed)
        #[arg(long, allow_negative_numbers = true)]
        change: f64,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: f64,

        /// Condition label (Clear, Clouds, Rain, Drizzle, Thunderstorm, Snow, Mist, Fog)
        #[arg(long, default_value = "Clear")]
        condition: String,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify the pressure trend between two readings
    Trend {
        /// Current pressure in hPa
        current: f64,

        /// Next pressure in hPa
        next: f64,

        /// Print the trend as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration (secrets omitted)
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&Path>, verbose: u8) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(path).context("failed to load configuration")?;
    if verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(verbose).to_string();
    }
    Ok(config)
}

fn build_service(config: &AppConfig) -> anyhow::Result<Arc<DashboardService>> {
    let location = config
        .weather
        .location
        .to_geo_location()
        .context("weather.location is out of range")?;
    let adapter = WeatherAdapter::new(config.weather.to_client_config(), location)?;

    Ok(Arc::new(DashboardService::new(
        Arc::new(adapter),
        config.dashboard.to_service_config(),
    )))
}

async fn watch(service: &Arc<DashboardService>) -> anyhow::Result<()> {
    let handle = service.spawn();
    let mut updates = handle.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                println!("{}", render::render_state(&state));
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                info!("Interrupt received");
                break;
            },
        }
    }

    handle.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            pressure,
            change,
            humidity,
            condition,
            json,
        } => {
            let assessment = score_risk(pressure, change, humidity, &condition);
            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", render::render_assessment(&assessment));
            }
        },

        Commands::Trend {
            current,
            next,
            json,
        } => {
            let trend = classify_trend(current, next);
            if json {
                println!("{}", serde_json::to_string_pretty(&trend)?);
            } else {
                println!("{}", render::render_trend(&trend));
            }
        },

        Commands::Config => {
            let config = load_config(cli.config.as_deref(), cli.verbose)?;
            println!("{}", toml::to_string_pretty(&config)?);
            let key = if config.weather.has_api_key() {
                "configured"
            } else {
                "missing"
            };
            println!("# weather.api_key: {key}");
        },

        Commands::Once { json } => {
            let config = load_config(cli.config.as_deref(), cli.verbose)?;
            init_telemetry(&config.telemetry)?;
            let service = build_service(&config)?;

            // Failures are reported through the state
            let _ = service.refresh().await;
            let state = service.snapshot();

            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", render::render_state(&state));
            }
            if state.phase == PollPhase::Failed {
                std::process::exit(1);
            }
        },

        Commands::Watch => {
            let config = load_config(cli.config.as_deref(), cli.verbose)?;
            init_telemetry(&config.telemetry)?;
            let service = build_service(&config)?;
            watch(&service).await?;
        },
    }

    Ok(())
}
