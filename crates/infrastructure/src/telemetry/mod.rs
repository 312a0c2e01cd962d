//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
