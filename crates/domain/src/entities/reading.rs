//! A single weather observation or forecast point

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Humidity, WeatherCondition, weather_icon};

/// Point-in-time weather reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// When the observation applies (UTC)
    pub observed_at: DateTime<Utc>,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Relative humidity
    pub humidity: Humidity,
    /// Temperature in °C
    pub temperature: f64,
    /// Condition group
    pub condition: WeatherCondition,
    /// Provider description, e.g. "light rain"
    #[serde(default)]
    pub description: String,
    /// Provider icon code, e.g. "10d"
    #[serde(default)]
    pub icon_code: String,
}

impl Reading {
    /// Create a reading without description or icon code
    #[must_use]
    pub fn new(
        observed_at: DateTime<Utc>,
        pressure: f64,
        humidity: Humidity,
        temperature: f64,
        condition: WeatherCondition,
    ) -> Self {
        Self {
            observed_at,
            pressure,
            humidity,
            temperature,
            condition,
            description: String::new(),
            icon_code: String::new(),
        }
    }

    /// Set the provider description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the provider icon code
    #[must_use]
    pub fn with_icon_code(mut self, icon_code: impl Into<String>) -> Self {
        self.icon_code = icon_code.into();
        self
    }

    /// Display glyph for this reading's icon code
    #[must_use]
    pub fn icon(&self) -> &'static str {
        weather_icon(&self.icon_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Reading {
        Reading::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            1012.0,
            Humidity::clamped(75),
            21.5,
            WeatherCondition::Rain,
        )
    }

    #[test]
    fn builder_sets_optional_fields() {
        let r = sample().with_description("light rain").with_icon_code("10d");
        assert_eq!(r.description, "light rain");
        assert_eq!(r.icon_code, "10d");
        assert_eq!(r.icon(), "🌦️");
    }

    #[test]
    fn missing_icon_code_uses_fallback_glyph() {
        assert_eq!(sample().icon(), "🌤️");
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "observed_at": "2025-06-01T09:00:00Z",
            "pressure": 1012.0,
            "humidity": 75,
            "temperature": 21.5,
            "condition": "rain"
        }"#;
        let r: Reading = serde_json::from_str(json).expect("deserialize");
        assert_eq!(r, sample());
    }
}
