//! Application services

mod dashboard_service;

pub use dashboard_service::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_REFRESH_INTERVAL, DashboardService, DashboardServiceConfig,
    PollingHandle,
};
