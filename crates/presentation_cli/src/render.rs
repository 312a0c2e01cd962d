//! Plain-text rendering of dashboard state and offline computations

use std::fmt::Write as _;

use domain::{DashboardState, PollPhase, PressureTrend, RiskAssessment, Trend};

/// Arrow glyph for a trend direction
pub const fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "↗️",
        Trend::Falling => "↘️",
        Trend::Stable => "→",
    }
}

/// Signed change with one decimal, e.g. `+0.5 hPa`
pub fn format_change(change: f64) -> String {
    format!("{change:+.1} hPa")
}

/// `😣 75%`, or `-` when no assessment is available
pub fn format_risk(risk: Option<&RiskAssessment>) -> String {
    risk.map_or_else(
        || "-".to_string(),
        |r| format!("{} {}%", r.icon, r.percent()),
    )
}

/// Arrow and signed change, e.g. `↘️ -5.0 hPa (falling)`
pub fn render_trend(trend: &PressureTrend) -> String {
    format!(
        "{} {} ({})",
        trend_arrow(trend.trend),
        format_change(trend.change),
        trend.trend
    )
}

/// Score, level and the points each factor contributed
pub fn render_assessment(assessment: &RiskAssessment) -> String {
    let f = &assessment.factors;
    let mut out = format!(
        "Headache risk: {} {}% ({})\n",
        assessment.icon,
        assessment.percent(),
        assessment.level
    );
    let _ = writeln!(out, "  pressure change  +{:.0}", f.pressure_change);
    let _ = writeln!(out, "  pressure level   +{:.0}", f.pressure_level);
    let _ = writeln!(out, "  humidity         +{:.0}", f.humidity);
    let _ = writeln!(out, "  condition        +{:.0}", f.condition);
    if f.total() > assessment.risk {
        let _ = writeln!(out, "  (capped from {:.0})", f.total());
    }
    out
}

/// The weather panel
pub fn render_state(state: &DashboardState) -> String {
    let mut out = String::new();

    match state.phase {
        PollPhase::Idle => out.push_str("Waiting for first update\n"),
        PollPhase::Loading => out.push_str("⏳ Updating...\n"),
        PollPhase::Ready | PollPhase::Failed => {},
    }

    if let Some(current) = &state.current {
        let trend = state
            .pressure_trend
            .as_ref()
            .map(|t| format!(" {} {}", trend_arrow(t.trend), format_change(t.change)))
            .unwrap_or_default();
        let _ = writeln!(out, "Pressure: {:.0} hPa{trend}", current.pressure);
        let _ = writeln!(
            out,
            "Weather:  {} {:.0}°C {}",
            current.icon(),
            current.temperature,
            current.humidity
        );
        let _ = writeln!(
            out,
            "Risk:     {}",
            format_risk(state.headache_risk.as_ref())
        );
        if let Some(updated_at) = state.updated_at {
            let _ = writeln!(out, "Updated:  {}", updated_at.format("%Y-%m-%d %H:%M UTC"));
        }
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "⚠️  {error}");
    }

    out
}
