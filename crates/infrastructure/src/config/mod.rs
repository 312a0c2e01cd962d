//! Application configuration
//!
//! Layered, lowest precedence first:
//! - built-in defaults
//! - `barometer.toml` in the working directory, or an explicit file
//! - `BAROMETER_*` environment variables (`__` separates nested keys,
//!   e.g. `BAROMETER_WEATHER__API_KEY`)
//! - `OPENWEATHER_API_KEY` when no key was configured otherwise

mod dashboard;
mod integrations;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use dashboard::DashboardAppConfig;
pub use integrations::{GeoLocationConfig, WeatherAppConfig};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "barometer";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BAROMETER";

/// Conventional variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Polling cadence
    #[serde(default)]
    pub dashboard: DashboardAppConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from defaults, file, and environment
    ///
    /// With `path`, that file must exist. Without it, `barometer.toml` in
    /// the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_api_key_fallback(std::env::var(API_KEY_ENV).ok());
        config.validate()?;

        debug!(
            api_key_configured = config.weather.has_api_key(),
            refresh_interval_secs = config.dashboard.refresh_interval_secs,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Use `fallback` as the API key when none is configured
    pub fn apply_api_key_fallback(&mut self, fallback: Option<String>) {
        if self.weather.has_api_key() {
            return;
        }
        if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key.into());
            debug!("Using API key from {API_KEY_ENV}");
        }
    }

    /// Reject values the service cannot run with
    ///
    /// A missing API key is not rejected; it is reported on every cycle.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.weather.validate()?;
        self.dashboard.validate()
    }
}
