//! Weather condition vocabulary and display glyphs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse weather condition group as reported by the provider
///
/// Labels match the OpenWeatherMap `weather[].main` field; anything outside
/// the known vocabulary becomes [`WeatherCondition::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    /// Clear sky
    Clear,
    /// Any cloud cover
    Clouds,
    /// Rain
    Rain,
    /// Drizzle
    Drizzle,
    /// Thunderstorm
    Thunderstorm,
    /// Snow
    Snow,
    /// Mist
    Mist,
    /// Fog
    Fog,
    /// Haze, smoke, dust, tornado and anything unrecognised
    #[default]
    Other,
}

impl WeatherCondition {
    /// Map a provider label to a condition, ignoring case and surrounding whitespace
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            "fog" => Self::Fog,
            _ => Self::Other,
        }
    }

    /// Canonical label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WeatherCondition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// Glyph for an OpenWeatherMap icon code such as `"10d"`
///
/// Unknown codes fall back to a sun-behind-cloud glyph.
#[must_use]
pub fn weather_icon(icon_code: &str) -> &'static str {
    match icon_code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌤️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_is_case_insensitive() {
        assert_eq!(WeatherCondition::from_label("RAIN"), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_label("rain"), WeatherCondition::Rain);
        assert_eq!(
            WeatherCondition::from_label("ThunderStorm"),
            WeatherCondition::Thunderstorm
        );
    }

    #[test]
    fn from_label_trims_whitespace() {
        assert_eq!(WeatherCondition::from_label("  Mist "), WeatherCondition::Mist);
    }

    #[test]
    fn unknown_labels_fall_back_to_other() {
        assert_eq!(WeatherCondition::from_label("Haze"), WeatherCondition::Other);
        assert_eq!(WeatherCondition::from_label(""), WeatherCondition::Other);
        assert_eq!(WeatherCondition::from_label("🌧"), WeatherCondition::Other);
    }

    #[test]
    fn from_str_never_fails() {
        let parsed: WeatherCondition = "Tornado".parse().unwrap_or_default();
        assert_eq!(parsed, WeatherCondition::Other);
        let parsed: WeatherCondition = "snow".parse().unwrap_or_default();
        assert_eq!(parsed, WeatherCondition::Snow);
    }

    #[test]
    fn label_round_trips_through_from_label() {
        for condition in [
            WeatherCondition::Clear,
            WeatherCondition::Clouds,
            WeatherCondition::Rain,
            WeatherCondition::Drizzle,
            WeatherCondition::Thunderstorm,
            WeatherCondition::Snow,
            WeatherCondition::Mist,
            WeatherCondition::Fog,
        ] {
            assert_eq!(WeatherCondition::from_label(condition.label()), condition);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&WeatherCondition::Thunderstorm).expect("serialize");
        assert_eq!(json, "\"thunderstorm\"");
    }

    #[test]
    fn weather_icon_known_codes() {
        assert_eq!(weather_icon("01d"), "☀️");
        assert_eq!(weather_icon("01n"), "🌙");
        assert_eq!(weather_icon("02d"), "⛅");
        assert_eq!(weather_icon("02n"), "☁️");
        assert_eq!(weather_icon("10d"), "🌦️");
        assert_eq!(weather_icon("10n"), "🌧️");
        assert_eq!(weather_icon("11n"), "⛈️");
        assert_eq!(weather_icon("13d"), "❄️");
        assert_eq!(weather_icon("50n"), "🌫️");
    }

    #[test]
    fn weather_icon_unknown_code_falls_back() {
        assert_eq!(weather_icon("99x"), "🌤️");
        assert_eq!(weather_icon(""), "🌤️");
    }
}
