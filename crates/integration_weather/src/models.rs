//! OpenWeatherMap data models
//!
//! Wire types mirror the JSON the provider returns; [`Observation`] and
//! [`Forecast`] are the decoded shapes handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::WeatherError;

/// A single decoded observation or forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation or forecast time
    pub time: DateTime<Utc>,
    /// Temperature in °C
    pub temperature: f64,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Condition group label (`"Rain"`, `"Clouds"`, ...); empty when absent
    pub condition: String,
    /// Human-readable description (`"light rain"`)
    pub description: String,
    /// Provider icon code (`"10d"`)
    pub icon: String,
}

/// Decoded forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// City name reported by the provider
    pub city: Option<String>,
    /// Forecast points, ascending by time
    pub points: Vec<Observation>,
}

// Wire types

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
    pub pressure: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionBlock {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// `/weather` response and one element of the `/forecast` list
#[derive(Debug, Deserialize)]
pub(crate) struct ObservationResponse {
    pub dt: i64,
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CityBlock {
    #[serde(default)]
    pub name: Option<String>,
}

/// `/forecast` response
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ObservationResponse>,
    #[serde(default)]
    pub city: Option<CityBlock>,
}

impl ObservationResponse {
    pub(crate) fn into_observation(self) -> Result<Observation, WeatherError> {
        let time = DateTime::from_timestamp(self.dt, 0)
            .ok_or_else(|| WeatherError::ParseError(format!("Invalid timestamp: {}", self.dt)))?;

        let (condition, description, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|c| (c.main, c.description, c.icon))
            .unwrap_or_default();

        Ok(Observation {
            time,
            temperature: self.main.temp,
            pressure: self.main.pressure,
            humidity: self.main.humidity,
            condition,
            description,
            icon,
        })
    }
}

impl ForecastResponse {
    pub(crate) fn into_forecast(self) -> Result<Forecast, WeatherError> {
        let mut points = self
            .list
            .into_iter()
            .map(ObservationResponse::into_observation)
            .collect::<Result<Vec<_>, _>>()?;
        points.sort_by_key(|p| p.time);

        Ok(Forecast {
            city: self.city.and_then(|c| c.name),
            points,
        })
    }
}
