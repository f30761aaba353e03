//! Producer loop: look up departures and publish them.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::domain::truncate_to_minute;
use crate::schedule::{OperatingWindow, ScheduleFetcher, ScheduleFinder};

use super::pause;
use super::snapshot::{ScheduleSnapshot, SnapshotPublisher};

/// What one fetch cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Outside the operating window; nothing was fetched.
    Inactive,
    /// Both departures found and published.
    Published(ScheduleSnapshot),
    /// A page was fetched but a departure was missing.
    NotFound,
    /// A fetch failed.
    Failed,
}

/// Looks up the next two departures on a fixed period.
pub struct FetchLoop<F: ScheduleFetcher> {
    finder: ScheduleFinder<F>,
    window: OperatingWindow,
    clock: Arc<dyn Clock>,
    walk: chrono::Duration,
    period: Duration,
    publisher: SnapshotPublisher,
}

impl<F: ScheduleFetcher> FetchLoop<F> {
    /// Create a new fetch loop.
    pub fn new(
        finder: ScheduleFinder<F>,
        window: OperatingWindow,
        clock: Arc<dyn Clock>,
        walk: chrono::Duration,
        period: Duration,
        publisher: SnapshotPublisher,
    ) -> Self {
        Self {
            finder,
            window,
            clock,
            walk,
            period,
            publisher,
        }
    }

    /// Run one cycle: check the window, look up, publish on full success.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let now = self.clock.now();
        if !self.window.is_active(now) {
            debug!(%now, "outside operating window, not fetching");
            return CycleOutcome::Inactive;
        }

        let origin = truncate_to_minute(now) + self.walk;

        match self.finder.find_next_two_departures(origin).await {
            Ok(Some(pair)) => {
                let snapshot = ScheduleSnapshot::from(pair);
                info!(
                    first = %snapshot.first,
                    second = %snapshot.second,
                    "publishing departures"
                );
                self.publisher.publish(snapshot);
                CycleOutcome::Published(snapshot)
            }
            Ok(None) => {
                info!(%origin, "departures not found, keeping previous snapshot");
                CycleOutcome::NotFound
            }
            Err(e) => {
                warn!(%origin, error = %e, "departure lookup failed, keeping previous snapshot");
                CycleOutcome::Failed
            }
        }
    }

    /// Repeat cycles until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        debug!(period = ?self.period, "fetch loop started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.run_cycle() => {}
            }
            if pause(&cancel, self.period).await {
                break;
            }
        }
        debug!("fetch loop stopped");
    }
}
