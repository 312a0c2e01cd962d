//! Weather dashboard polling service
//!
//! Fetches current conditions and the forecast on a fixed interval, derives
//! the pressure trend and headache risk, and publishes the result through a
//! `watch` channel. Every write goes through [`DashboardService::publish`],
//! which drops writes after cancellation and results from cycles older than
//! the result already published. Cycles still in flight when a newer one
//! starts keep the right to publish.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use domain::{DashboardState, Reading};
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::WeatherPort;

/// Default polling interval: 10 minutes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Default upper bound for one fetch (current + forecast together)
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// `tokio::time::interval` rejects a zero period
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Polling cadence and fetch bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardServiceConfig {
    /// Time between cycle starts
    pub refresh_interval: Duration,
    /// Maximum time a cycle waits for the provider
    pub fetch_timeout: Duration,
}

impl Default for DashboardServiceConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Orchestrates weather polling and owns the published dashboard state
pub struct DashboardService {
    weather: Arc<dyn WeatherPort>,
    config: DashboardServiceConfig,
    state: watch::Sender<DashboardState>,
    next_cycle: AtomicU64,
    cancelled: AtomicBool,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService")
            .field("weather", &"dyn WeatherPort")
            .field("config", &self.config)
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Create a service in the `Idle` phase
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, config: DashboardServiceConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            weather,
            config,
            state,
            next_cycle: AtomicU64::new(0),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Polling configuration
    #[must_use]
    pub const fn config(&self) -> &DashboardServiceConfig {
        &self.config
    }

    /// Receive every published state
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Copy of the latest published state
    #[must_use]
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Stop publishing; results of in-flight cycles are discarded
    ///
    /// Cancellation is permanent. Build a new service to poll again.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether [`cancel`](Self::cancel) has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run one polling cycle
    ///
    /// The outcome is always published to the state. The error is also
    /// returned so callers can log it; it never needs to be propagated.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ApplicationError> {
        let cycle = self.next_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(cycle, |state| state.begin_cycle(cycle));
        debug!(cycle, "Weather refresh started");

        match self.fetch().await {
            Ok((current, forecast)) => {
                let points = forecast.len();
                let published = self.publish(cycle, |state| {
                    state.complete(cycle, current, forecast, Utc::now());
                });
                if published {
                    let state = self.state.borrow();
                    info!(
                        cycle,
                        forecast_points = points,
                        trend = ?state.pressure_trend.map(|t| t.trend),
                        risk = ?state.headache_risk.map(|r| r.risk),
                        "Weather dashboard updated"
                    );
                } else {
                    debug!(cycle, "Discarded weather result from superseded or cancelled cycle");
                }
                Ok(())
            },
            Err(e) => {
                let message = e.to_string();
                if !self.publish(cycle, |state| state.fail(cycle, message)) {
                    debug!(cycle, "Discarded weather error from superseded or cancelled cycle");
                }
                warn!(
                    cycle,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Weather refresh failed"
                );
                Err(e)
            },
        }
    }

    /// Start polling: one cycle immediately, then one per interval
    ///
    /// Each tick starts its cycle independently of earlier cycles that may
    /// still be running. Dropping or stopping the returned handle cancels
    /// the service and aborts in-flight cycles. A cancelled service does not
    /// poll again; the returned handle then has no task.
    pub fn spawn(self: &Arc<Self>) -> PollingHandle {
        if self.is_cancelled() {
            warn!("Weather polling not started: service was cancelled");
            return PollingHandle {
                service: Arc::clone(self),
                task: None,
            };
        }

        let service = Arc::clone(self);
        let period = self.config.refresh_interval.max(MIN_REFRESH_INTERVAL);

        info!(
            interval_secs = period.as_secs(),
            "Starting weather polling task"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut cycles = JoinSet::new();

            loop {
                ticker.tick().await;
                if service.is_cancelled() {
                    break;
                }
                while cycles.try_join_next().is_some() {}

                let service = Arc::clone(&service);
                cycles.spawn(async move {
                    // Outcome is already published and logged
                    let _ = service.refresh().await;
                });
            }
        });

        PollingHandle {
            service: Arc::clone(self),
            task: Some(task),
        }
    }

    async fn fetch(&self) -> Result<(Reading, Vec<Reading>), ApplicationError> {
        let both = async {
            tokio::try_join!(
                self.weather.fetch_current_reading(),
                self.weather.fetch_forecast()
            )
        };

        tokio::time::timeout(self.config.fetch_timeout, both)
            .await
            .map_err(|_| {
                ApplicationError::ExternalService(format!(
                    "Weather fetch timed out after {:?}",
                    self.config.fetch_timeout
                ))
            })?
    }

    /// Apply `update` unless cancelled or `cycle` is older than the shown result
    fn publish(&self, cycle: u64, update: impl FnOnce(&mut DashboardState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.is_cancelled() || !state.accepts(cycle) {
                return false;
            }
            update(state);
            true
        })
    }
}

/// Handle to a running polling task
#[derive(Debug)]
pub struct PollingHandle {
    service: Arc<DashboardService>,
    task: Option<JoinHandle<()>>,
}

impl PollingHandle {
    /// Receive every published state
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.service.subscribe()
    }

    /// Cancel the service and abort the polling task
    pub fn stop(&self) {
        self.service.cancel();
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Stop and wait for the polling task to finish
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("Weather polling task stopped");
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
