//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap 2.5 API (`/weather` and `/forecast`).

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{Forecast, ForecastResponse, Observation, ObservationResponse};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key was configured
    #[error("OpenWeather API key is not configured")]
    MissingApiKey,

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of 3-hour forecast points to request (default: 8)
    #[serde(default = "default_forecast_count")]
    pub forecast_count: u8,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_count() -> u8 {
    8
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            forecast_count: default_forecast_count(),
        }
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_count", &self.forecast_count)
            .finish()
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a location
    async fn get_current(&self, latitude: f64, longitude: f64)
    -> Result<Observation, WeatherError>;

    /// Get up to `count` forecast points for a location
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        count: u8,
    ) -> Result<Forecast, WeatherError>;

    /// Check that the service answers for a location
    async fn is_healthy(&self, latitude: f64, longitude: f64) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// A missing API key is not an error here; requests fail with
    /// [`WeatherError::MissingApiKey`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }

    /// Issue a GET to `endpoint` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        latitude: f64,
        longitude: f64,
        extra: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, "Requesting OpenWeatherMap");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .query(extra)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.without_url().to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Observation, WeatherError> {
        let raw: ObservationResponse = self.get_json("weather", latitude, longitude, &[]).await?;
        raw.into_observation()
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, count = %count))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        count: u8,
    ) -> Result<Forecast, WeatherError> {
        let count = count.max(1);
        let raw: ForecastResponse = self
            .get_json(
                "forecast",
                latitude,
                longitude,
                &[("cnt", count.to_string())],
            )
            .await?;
        raw.into_forecast()
    }

    async fn is_healthy(&self, latitude: f64, longitude: f64) -> bool {
        self.get_current(latitude, longitude).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.forecast_count, 8);
    }

    #[test]
    fn config_debug_redacts_api_key() {
        let config = WeatherConfig {
            api_key: Some("super-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn config_serialization_skips_api_key() {
        let config = WeatherConfig {
            base_url: "https://custom.api.com".to_string(),
            api_key: Some("super-secret".to_string()),
            timeout_secs: 60,
            forecast_count: 4,
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        assert!(!json.contains("super-secret"));

        let deserialized: WeatherConfig = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(deserialized.base_url, "https://custom.api.com");
        assert_eq!(deserialized.timeout_secs, 60);
        assert_eq!(deserialized.forecast_count, 4);
        assert!(deserialized.api_key.is_none());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: WeatherConfig =
            serde_json::from_str(r#"{"api_key":"abc"}"#).expect("should deserialize");
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.forecast_count, 8);
    }

    #[test]
    fn validate_coordinates_bounds() {
        assert!(OpenWeatherClient::validate_coordinates(35.4229, 136.7604).is_ok());
        assert!(OpenWeatherClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenWeatherClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenWeatherClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenWeatherClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let client = OpenWeatherClient::new(WeatherConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        })
        .expect("client creation should succeed");
        assert!(matches!(client.api_key(), Err(WeatherError::MissingApiKey)));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_request() {
        let client = OpenWeatherClient::new(WeatherConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .expect("client creation should succeed");

        let result = client.get_current(35.0, 136.0).await;
        assert!(matches!(result, Err(WeatherError::MissingApiKey)));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            WeatherError::MissingApiKey.to_string(),
            "OpenWeather API key is not configured"
        );
        assert!(WeatherError::RateLimitExceeded.to_string().contains("Rate limit"));
        assert!(WeatherError::InvalidCoordinates.to_string().contains("latitude"));
    }
}
