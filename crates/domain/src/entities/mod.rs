//! Domain entities

mod dashboard;
mod outlook;
mod reading;

pub use dashboard::{DashboardState, PollPhase};
pub use outlook::Outlook;
pub use reading::Reading;
