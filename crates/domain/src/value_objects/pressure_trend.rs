//! Barometric pressure trend between two readings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Changes smaller than this (in hPa, absolute) count as stable
pub const STABLE_THRESHOLD_HPA: f64 = 1.0;

/// Direction of a pressure change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Pressure increased by at least 1 hPa
    Rising,
    /// Pressure decreased by at least 1 hPa
    Falling,
    /// Pressure moved by less than 1 hPa
    Stable,
}

impl Trend {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed pressure change and its classified direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureTrend {
    /// `next - current` in hPa
    pub change: f64,
    /// Direction of the change
    pub trend: Trend,
}

impl PressureTrend {
    /// Classify the change from `current_pressure` to `next_pressure`
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::value_objects::{PressureTrend, Trend};
    ///
    /// let t = PressureTrend::between(1013.0, 1008.0);
    /// assert_eq!(t.trend, Trend::Falling);
    /// assert!((t.change + 5.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn between(current_pressure: f64, next_pressure: f64) -> Self {
        let change = next_pressure - current_pressure;
        let trend = if change.abs() < STABLE_THRESHOLD_HPA {
            Trend::Stable
        } else if change > 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        };
        Self { change, trend }
    }
}

/// Free-function form of [`PressureTrend::between`]
#[must_use]
pub fn classify_trend(current_pressure: f64, next_pressure: f64) -> PressureTrend {
    PressureTrend::between(current_pressure, next_pressure)
}
