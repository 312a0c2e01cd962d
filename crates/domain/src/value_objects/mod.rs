//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
pub mod headache_risk;
mod humidity;
pub mod pressure_trend;
mod weather_condition;

pub use geo_location::GeoLocation;
pub use headache_risk::{RiskAssessment, RiskFactors, RiskLevel, assess, score_risk};
pub use humidity::Humidity;
pub use pressure_trend::{PressureTrend, Trend, classify_trend};
pub use weather_condition::{WeatherCondition, weather_icon};
