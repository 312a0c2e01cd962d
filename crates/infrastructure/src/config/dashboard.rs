//! Polling cadence configuration

use std::time::Duration;

use application::DashboardServiceConfig;
use serde::{Deserialize, Serialize};

/// Dashboard polling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardAppConfig {
    /// Seconds between polling cycles (default: 600)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Upper bound for one cycle's fetch in seconds (default: 30)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

const fn default_refresh_interval() -> u64 {
    600
}

const fn default_fetch_timeout() -> u64 {
    30
}

impl Default for DashboardAppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl DashboardAppConfig {
    /// Convert to the service configuration
    #[must_use]
    pub const fn to_service_config(&self) -> DashboardServiceConfig {
        DashboardServiceConfig {
            refresh_interval: Duration::from_secs(self.refresh_interval_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), config::ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "dashboard.refresh_interval_secs must be at least 1".into(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "dashboard.fetch_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
