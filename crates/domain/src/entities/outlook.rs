//! Derived pressure trend and headache risk for the next forecast point

use serde::Serialize;

use super::reading::Reading;
use crate::value_objects::{PressureTrend, RiskAssessment, assess};

/// What the nearest forecast point means relative to the current reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outlook {
    /// Change from the current pressure to the next forecast pressure
    pub pressure_trend: PressureTrend,
    /// Risk scored on the next forecast point
    pub headache_risk: RiskAssessment,
}

impl Outlook {
    /// Derive the outlook from the current reading and an ascending forecast
    ///
    /// Returns `None` when the forecast is empty.
    #[must_use]
    pub fn from_readings(current: &Reading, forecast: &[Reading]) -> Option<Self> {
        let next = forecast.first()?;
        let pressure_trend = PressureTrend::between(current.pressure, next.pressure);
        let headache_risk = assess(
            next.pressure,
            pressure_trend.change,
            next.humidity.percent(),
            next.condition,
        );
        Some(Self {
            pressure_trend,
            headache_risk,
        })
    }
}
