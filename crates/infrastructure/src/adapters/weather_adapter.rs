//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{GeoLocation, Humidity, Reading, WeatherCondition};
use integration_weather::{Observation, OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
use tracing::{debug, instrument};

/// Adapter for weather services using the OpenWeatherMap API
pub struct WeatherAdapter {
    client: OpenWeatherClient,
    location: GeoLocation,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenWeatherClient")
            .field("location", &self.location)
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter polling `location`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig, location: GeoLocation) -> Result<Self, ApplicationError> {
        let client =
            OpenWeatherClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;

        Ok(Self { client, location })
    }

    /// Location this adapter reports on
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::MissingApiKey | WeatherError::InvalidCoordinates => {
                ApplicationError::Configuration(err.to_string())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::ParseError(_)
            | WeatherError::ServiceUnavailable(_) => {
                ApplicationError::ExternalService(err.to_string())
            },
        }
    }

    /// Convert a provider observation into a domain reading
    fn map_observation(observation: Observation) -> Result<Reading, ApplicationError> {
        let humidity = Humidity::new(observation.humidity)?;
        let condition = WeatherCondition::from_label(&observation.condition);

        Ok(Reading::new(
            observation.time,
            observation.pressure,
            humidity,
            observation.temperature,
            condition,
        )
        .with_description(observation.description)
        .with_icon_code(observation.icon))
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = self.location.latitude(), lon = self.location.longitude()))]
    async fn fetch_current_reading(&self) -> Result<Reading, ApplicationError> {
        let result = self
            .client
            .get_current(self.location.latitude(), self.location.longitude())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(current) => {
                debug!(
                    pressure = current.pressure,
                    humidity = current.humidity,
                    condition = %current.condition,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        Self::map_observation(result?)
    }

    #[instrument(skip(self), fields(lat = self.location.latitude(), lon = self.location.longitude()))]
    async fn fetch_forecast(&self) -> Result<Vec<Reading>, ApplicationError> {
        let count = self.client.config().forecast_count;
        let result = self
            .client
            .get_forecast(self.location.latitude(), self.location.longitude(), count)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => {
                debug!(points = forecast.points.len(), "Retrieved weather forecast");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get weather forecast");
            },
        }

        result?
            .points
            .into_iter()
            .map(Self::map_observation)
            .collect()
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client
            .is_healthy(self.location.latitude(), self.location.longitude())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn observation(humidity: u8, condition: &str) -> Observation {
        Observation {
            time: Utc.with_ymd_and_hms(2025, 10, 9, 9, 0, 0).unwrap(),
            temperature: 19.5,
            pressure: 1008.0,
            humidity,
            condition: condition.to_string(),
            description: "light rain".to_string(),
            icon: "10d".to_string(),
        }
    }

    #[test]
    fn new_creates_adapter() {
        let adapter = WeatherAdapter::new(WeatherConfig::default(), GeoLocation::gifu());
        assert!(adapter.is_ok());
        assert_eq!(adapter.unwrap().location(), GeoLocation::gifu());
    }

    #[test]
    fn debug_impl() {
        let adapter = WeatherAdapter::new(WeatherConfig::default(), GeoLocation::gifu()).unwrap();
        let debug_str = format!("{adapter:?}");
        assert!(debug_str.contains("WeatherAdapter"));
    }

    #[test]
    fn missing_key_maps_to_configuration() {
        let err = WeatherAdapter::map_error(WeatherError::MissingApiKey);
        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: OpenWeather API key is not configured"
        );
    }

    #[test]
    fn rate_limit_maps_to_rate_limited() {
        let err = WeatherAdapter::map_error(WeatherError::RateLimitExceeded);
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[test]
    fn transport_and_status_errors_map_to_external_service() {
        for err in [
            WeatherError::ConnectionFailed("refused".into()),
            WeatherError::RequestFailed("HTTP 401 Unauthorized".into()),
            WeatherError::ParseError("eof".into()),
            WeatherError::ServiceUnavailable("HTTP 503".into()),
        ] {
            let mapped = WeatherAdapter::map_error(err);
            assert!(
                matches!(mapped, ApplicationError::ExternalService(_)),
                "got {mapped:?}"
            );
            assert!(mapped.is_retryable());
        }
    }

    #[test]
    fn maps_observation_to_reading() {
        let reading = WeatherAdapter::map_observation(observation(85, "Rain")).unwrap();
        assert!((reading.pressure - 1008.0).abs() < f64::EPSILON);
        assert_eq!(reading.humidity.value(), 85);
        assert_eq!(reading.condition, WeatherCondition::Rain);
        assert_eq!(reading.description, "light rain");
        assert_eq!(reading.icon_code, "10d");
    }

    #[test]
    fn unknown_or_missing_condition_maps_to_other() {
        let reading = WeatherAdapter::map_observation(observation(50, "")).unwrap();
        assert_eq!(reading.condition, WeatherCondition::Other);

        let reading = WeatherAdapter::map_observation(observation(50, "Squall")).unwrap();
        assert_eq!(reading.condition, WeatherCondition::Other);
    }

    #[test]
    fn out_of_range_humidity_is_domain_error() {
        let result = WeatherAdapter::map_observation(observation(120, "Clear"));
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }
}
