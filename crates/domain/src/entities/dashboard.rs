//! Dashboard state published to observers
//!
//! The state moves `Idle -> Loading -> {Ready, Failed}` and back to
//! `Loading` on every polling cycle. Cycles are numbered from 1 and may
//! overlap. A result is accepted when its cycle is not older than the
//! result already shown; starting a cycle never raises that bar, so a
//! fetch that outlives the polling interval still lands.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use super::outlook::Outlook;
use super::reading::Reading;
use crate::value_objects::{PressureTrend, RiskAssessment};

/// Lifecycle phase of the polling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PollPhase {
    /// No cycle has started yet
    #[default]
    Idle,
    /// A cycle is in flight
    Loading,
    /// The last cycle succeeded
    Ready,
    /// The last cycle failed
    Failed,
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Everything the presentation layer needs to draw the weather panel
///
/// Serializes with a derived `loading` flag next to `phase`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    /// Current phase
    pub phase: PollPhase,
    /// Latest current-conditions reading
    pub current: Option<Reading>,
    /// Latest forecast, ascending by time
    pub forecast: Vec<Reading>,
    /// Trend from current to the first forecast point
    pub pressure_trend: Option<PressureTrend>,
    /// Risk for the first forecast point
    pub headache_risk: Option<RiskAssessment>,
    /// Message of the last failed cycle
    pub error: Option<String>,
    /// When data was last refreshed successfully
    pub updated_at: Option<DateTime<Utc>>,
    /// Cycle whose result is shown; 0 until the first result
    pub cycle: u64,
    /// Most recently started cycle
    pub started_cycle: u64,
}

impl DashboardState {
    /// A cycle is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == PollPhase::Loading
    }

    /// Whether a write from `cycle` may replace this state
    #[must_use]
    pub fn accepts(&self, cycle: u64) -> bool {
        cycle >= self.cycle
    }

    /// Enter `Loading`, clearing the error and keeping last-known data visible
    pub fn begin_cycle(&mut self, cycle: u64) {
        self.phase = PollPhase::Loading;
        self.error = None;
        self.started_cycle = self.started_cycle.max(cycle);
    }

    /// Enter `Ready` with freshly fetched readings
    ///
    /// Trend and risk are re-derived; an empty forecast clears both.
    pub fn complete(
        &mut self,
        cycle: u64,
        current: Reading,
        forecast: Vec<Reading>,
        fetched_at: DateTime<Utc>,
    ) {
        let outlook = Outlook::from_readings(&current, &forecast);
        self.phase = PollPhase::Ready;
        self.pressure_trend = outlook.map(|o| o.pressure_trend);
        self.headache_risk = outlook.map(|o| o.headache_risk);
        self.current = Some(current);
        self.forecast = forecast;
        self.error = None;
        self.updated_at = Some(fetched_at);
        self.cycle = cycle;
    }

    /// Enter `Failed`, keeping data from the last successful cycle
    pub fn fail(&mut self, cycle: u64, message: impl Into<String>) {
        self.phase = PollPhase::Failed;
        self.error = Some(message.into());
        self.cycle = cycle;
    }
}

impl Serialize for DashboardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DashboardState", 10)?;
        state.serialize_field("phase", &self.phase)?;
        state.serialize_field("loading", &self.is_loading())?;
        state.serialize_field("current", &self.current)?;
        state.serialize_field("forecast", &self.forecast)?;
        state.serialize_field("pressure_trend", &self.pressure_trend)?;
        state.serialize_field("headache_risk", &self.headache_risk)?;
        state.serialize_field("error", &self.error)?;
        state.serialize_field("updated_at", &self.updated_at)?;
        state.serialize_field("cycle", &self.cycle)?;
        state.serialize_field("started_cycle", &self.started_cycle)?;
        state.end()
    }
}
