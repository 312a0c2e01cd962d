//! Infrastructure layer - Adapters for external systems
//!
//! Implements the weather port on top of the OpenWeatherMap client and
//! provides configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DashboardAppConfig, GeoLocationConfig, WeatherAppConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
