//! Weather provider configuration

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// OpenWeatherMap settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Number of 3-hour forecast points to request
    #[serde(default = "default_forecast_count")]
    pub forecast_count: u8,

    /// Location to poll
    ///
    /// Configured as inline table: `{ latitude = 35.4229, longitude = 136.7604 }`
    #[serde(default)]
    pub location: GeoLocationConfig,
}

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl Default for GeoLocationConfig {
    fn default() -> Self {
        let gifu = domain::GeoLocation::gifu();
        Self {
            latitude: gifu.latitude(),
            longitude: gifu.longitude(),
        }
    }
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<domain::GeoLocation> {
        domain::GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_weather_timeout() -> u64 {
    30
}

const fn default_forecast_count() -> u8 {
    8
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_weather_timeout(),
            forecast_count: default_forecast_count(),
            location: GeoLocationConfig::default(),
        }
    }
}

impl fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_count", &self.forecast_count)
            .field("location", &self.location)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Build the client configuration, exposing the key only here
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            forecast_count: self.forecast_count,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), config::ConfigError> {
        if self.location.to_geo_location().is_none() {
            return Err(config::ConfigError::Message(format!(
                "weather.location ({}, {}) is out of range",
                self.location.latitude, self.location.longitude
            )));
        }
        if self.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "weather.timeout_secs must be at least 1".into(),
            ));
        }
        if self.forecast_count == 0 {
            return Err(config::ConfigError::Message(
                "weather.forecast_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_is_gifu() {
        let location = GeoLocationConfig::default().to_geo_location().unwrap();
        assert_eq!(location, domain::GeoLocation::gifu());
    }

    #[test]
    fn invalid_location_converts_to_none() {
        let location = GeoLocationConfig {
            latitude: 0.0,
            longitude: 200.0,
        };
        assert!(location.to_geo_location().is_none());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = WeatherAppConfig {
            api_key: Some("super-secret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn client_config_carries_key_and_settings() {
        let config = WeatherAppConfig {
            base_url: "http://localhost:8080".to_string(),
            api_key: Some("abc".into()),
            timeout_secs: 5,
            forecast_count: 3,
            location: GeoLocationConfig::default(),
        };

        let client = config.to_client_config();
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.api_key.as_deref(), Some("abc"));
        assert_eq!(client.timeout_secs, 5);
        assert_eq!(client.forecast_count, 3);
    }

    #[test]
    fn blank_key_is_not_configured() {
        let config = WeatherAppConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(!config.has_api_key());
        assert!(!WeatherAppConfig::default().has_api_key());
    }

    #[test]
    fn zero_forecast_count_is_rejected() {
        let config = WeatherAppConfig {
            forecast_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
