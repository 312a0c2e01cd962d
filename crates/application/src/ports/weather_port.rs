//! Weather service port
//!
//! Defines the interface for weather data retrieval. The location is fixed
//! by the adapter's configuration, so no parameters cross this boundary.

use async_trait::async_trait;
use domain::Reading;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get the current conditions
    ///
    /// Fails with `ApplicationError::Configuration` when no credential is
    /// configured and with `ExternalService`/`RateLimited` when the provider
    /// does not answer successfully.
    async fn fetch_current_reading(&self) -> Result<Reading, ApplicationError>;

    /// Get upcoming forecast points, nearest first
    async fn fetch_forecast(&self) -> Result<Vec<Reading>, ApplicationError>;

    /// Check if the weather service is available
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }
}
