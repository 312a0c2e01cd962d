//! Heuristic headache risk from weather factors
//!
//! The score is additive: four independent factors each contribute a fixed
//! increment chosen by threshold band, and the sum is capped at 100.
//!
//! | Factor | Band | Points |
//! |---|---|---|
//! | pressure change `|Δ|` | `> 5` / `> 3` / `> 1` | 40 / 25 / 10 |
//! | pressure | `< 1010` / `< 1015` | 20 / 10 |
//! | humidity | `> 80` / `> 70` | 15 / 8 |
//! | condition | thunderstorm / rain, drizzle / snow / mist, fog | 25 / 15 / 10 / 8 |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::weather_condition::WeatherCondition;

/// Upper bound of the risk score
pub const MAX_RISK: f64 = 100.0;

/// Scores below this are [`RiskLevel::Low`]
pub const MEDIUM_THRESHOLD: f64 = 30.0;

/// Scores at or above this are [`RiskLevel::High`]
pub const HIGH_THRESHOLD: f64 = 60.0;

/// Risk category derived from the clamped score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 30
    Low,
    /// Score from 30 up to 60
    Medium,
    /// Score of 60 or more
    High,
}

impl RiskLevel {
    /// Categorise a score
    #[must_use]
    pub fn from_score(risk: f64) -> Self {
        if risk < MEDIUM_THRESHOLD {
            Self::Low
        } else if risk < HIGH_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Face glyph shown next to the score
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Low => "😊",
            Self::Medium => "😐",
            Self::High => "😣",
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points contributed by each factor before clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    /// From the magnitude of the pressure change
    pub pressure_change: f64,
    /// From the absolute pressure level
    pub pressure_level: f64,
    /// From relative humidity
    pub humidity: f64,
    /// From the weather condition
    pub condition: f64,
}

impl RiskFactors {
    /// Evaluate every factor for the given readings
    #[must_use]
    pub fn evaluate(
        pressure: f64,
        pressure_change: f64,
        humidity: f64,
        condition: WeatherCondition,
    ) -> Self {
        Self {
            pressure_change: pressure_change_points(pressure_change),
            pressure_level: pressure_level_points(pressure),
            humidity: humidity_points(humidity),
            condition: condition_points(condition),
        }
    }

    /// Unclamped sum of all factors
    #[must_use]
    pub fn total(&self) -> f64 {
        self.pressure_change + self.pressure_level + self.humidity + self.condition
    }
}

/// Bounded risk score with its category and glyph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Score in `[0, 100]`
    pub risk: f64,
    /// Category of `risk`
    pub level: RiskLevel,
    /// Glyph for `level`
    pub icon: &'static str,
    /// Individual contributions that produced the score
    pub factors: RiskFactors,
}

impl RiskAssessment {
    /// Build an assessment from evaluated factors, capping the score at 100
    #[must_use]
    pub fn from_factors(factors: RiskFactors) -> Self {
        let risk = factors.total().min(MAX_RISK);
        let level = RiskLevel::from_score(risk);
        Self {
            risk,
            level,
            icon: level.icon(),
            factors,
        }
    }

    /// Score rounded to a whole percentage for display
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, 100]
    pub fn percent(&self) -> u8 {
        self.risk.round().clamp(0.0, MAX_RISK) as u8
    }
}

/// Score the headache risk for a typed weather condition
#[must_use]
pub fn assess(
    pressure: f64,
    pressure_change: f64,
    humidity: f64,
    condition: WeatherCondition,
) -> RiskAssessment {
    RiskAssessment::from_factors(RiskFactors::evaluate(
        pressure,
        pressure_change,
        humidity,
        condition,
    ))
}

/// Score the headache risk for a provider condition label
///
/// The label is matched case-insensitively; unknown labels add nothing.
///
/// # Examples
///
/// ```
/// use domain::value_objects::{RiskLevel, score_risk};
///
/// let r = score_risk(1012.0, 2.0, 75.0, "Mist");
/// assert!((r.risk - 36.0).abs() < f64::EPSILON);
/// assert_eq!(r.level, RiskLevel::Medium);
/// ```
#[must_use]
pub fn score_risk(
    pressure: f64,
    pressure_change: f64,
    humidity: f64,
    weather_condition: &str,
) -> RiskAssessment {
    assess(
        pressure,
        pressure_change,
        humidity,
        WeatherCondition::from_label(weather_condition),
    )
}

fn pressure_change_points(pressure_change: f64) -> f64 {
    let magnitude = pressure_change.abs();
    if magnitude > 5.0 {
        40.0
    } else if magnitude > 3.0 {
        25.0
    } else if magnitude > 1.0 {
        10.0
    } else {
        0.0
    }
}

fn pressure_level_points(pressure: f64) -> f64 {
    if pressure < 1010.0 {
        20.0
    } else if pressure < 1015.0 {
        10.0
    } else {
        0.0
    }
}

fn humidity_points(humidity: f64) -> f64 {
    if humidity > 80.0 {
        15.0
    } else if humidity > 70.0 {
        8.0
    } else {
        0.0
    }
}

const fn condition_points(condition: WeatherCondition) -> f64 {
    match condition {
        WeatherCondition::Thunderstorm => 25.0,
        WeatherCondition::Rain | WeatherCondition::Drizzle => 15.0,
        WeatherCondition::Snow => 10.0,
        WeatherCondition::Mist | WeatherCondition::Fog => 8.0,
        WeatherCondition::Clear | WeatherCondition::Clouds | WeatherCondition::Other => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_risk(actual: &RiskAssessment, expected: f64) {
        assert!(
            (actual.risk - expected).abs() < f64::EPSILON,
            "expected risk {expected}, got {}",
            actual.risk
        );
    }

    #[test]
    fn worst_case_is_capped_at_hundred() {
        let r = score_risk(1005.0, 6.0, 85.0, "Thunderstorm");
        assert!((r.factors.total() - 100.0).abs() < f64::EPSILON);
        assert_risk(&r, 100.0);
        assert_eq!(r.level, RiskLevel::High);
        assert_eq!(r.icon, "😣");
    }

    #[test]
    fn sum_above_hundred_is_clamped() {
        // 40 + 20 + 15 + 25 = 100; a negative change of the same size adds the same
        let r = score_risk(900.0, -50.0, 100.0, "thunderstorm");
        assert_risk(&r, 100.0);

        let factors = RiskFactors {
            pressure_change: 40.0,
            pressure_level: 20.0,
            humidity: 15.0,
            condition: 40.0,
        };
        let r = RiskAssessment::from_factors(factors);
        assert!((factors.total() - 115.0).abs() < f64::EPSILON);
        assert_risk(&r, 100.0);
        assert_eq!(r.level, RiskLevel::High);
    }

    #[test]
    fn calm_clear_day_scores_zero() {
        let r = score_risk(1020.0, 0.5, 50.0, "Clear");
        assert_risk(&r, 0.0);
        assert_eq!(r.level, RiskLevel::Low);
        assert_eq!(r.icon, "😊");
    }

    #[test]
    fn misty_mid_pressure_day_is_medium() {
        let r = score_risk(1012.0, 2.0, 75.0, "Mist");
        assert_eq!(
            r.factors,
            RiskFactors {
                pressure_change: 10.0,
                pressure_level: 10.0,
                humidity: 8.0,
                condition: 8.0,
            }
        );
        assert_risk(&r, 36.0);
        assert_eq!(r.level, RiskLevel::Medium);
        assert_eq!(r.icon, "😐");
    }

    #[test]
    fn pressure_change_bands() {
        assert!((pressure_change_points(1.0)).abs() < f64::EPSILON);
        assert!((pressure_change_points(1.01) - 10.0).abs() < f64::EPSILON);
        assert!((pressure_change_points(3.0) - 10.0).abs() < f64::EPSILON);
        assert!((pressure_change_points(3.5) - 25.0).abs() < f64::EPSILON);
        assert!((pressure_change_points(5.0) - 25.0).abs() < f64::EPSILON);
        assert!((pressure_change_points(-5.01) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pressure_level_bands() {
        assert!((pressure_level_points(1009.9) - 20.0).abs() < f64::EPSILON);
        assert!((pressure_level_points(1010.0) - 10.0).abs() < f64::EPSILON);
        assert!((pressure_level_points(1014.9) - 10.0).abs() < f64::EPSILON);
        assert!(pressure_level_points(1015.0).abs() < f64::EPSILON);
    }

    #[test]
    fn humidity_bands() {
        assert!(humidity_points(70.0).abs() < f64::EPSILON);
        assert!((humidity_points(70.5) - 8.0).abs() < f64::EPSILON);
        assert!((humidity_points(80.0) - 8.0).abs() < f64::EPSILON);
        assert!((humidity_points(81.0) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn condition_points_table() {
        assert!((condition_points(WeatherCondition::Thunderstorm) - 25.0).abs() < f64::EPSILON);
        assert!((condition_points(WeatherCondition::Rain) - 15.0).abs() < f64::EPSILON);
        assert!((condition_points(WeatherCondition::Drizzle) - 15.0).abs() < f64::EPSILON);
        assert!((condition_points(WeatherCondition::Snow) - 10.0).abs() < f64::EPSILON);
        assert!((condition_points(WeatherCondition::Mist) - 8.0).abs() < f64::EPSILON);
        assert!((condition_points(WeatherCondition::Fog) - 8.0).abs() < f64::EPSILON);
        assert!(condition_points(WeatherCondition::Clouds).abs() < f64::EPSILON);
        assert!(condition_points(WeatherCondition::Other).abs() < f64::EPSILON);
    }

    #[test]
    fn condition_label_is_case_insensitive() {
        assert_eq!(
            score_risk(1000.0, 0.0, 0.0, "RAIN"),
            score_risk(1000.0, 0.0, 0.0, "rain")
        );
    }

    #[test]
    fn unknown_condition_adds_nothing() {
        let r = score_risk(1020.0, 0.0, 0.0, "Volcanic ash");
        assert_risk(&r, 0.0);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(RiskLevel::from_score(29.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::High);
    }

    #[test]
    fn percent_rounds_score() {
        assert_eq!(score_risk(1012.0, 2.0, 75.0, "Mist").percent(), 36);
        assert_eq!(score_risk(1005.0, 6.0, 85.0, "Thunderstorm").percent(), 100);
    }

    #[test]
    fn serializes_level_and_icon() {
        let json = serde_json::to_value(score_risk(1020.0, 0.0, 0.0, "Clear")).expect("serialize");
        assert_eq!(json["level"], "low");
        assert_eq!(json["icon"], "😊");
        assert_eq!(json["risk"], 0.0);
    }
}
