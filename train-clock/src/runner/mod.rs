//! The producer and consumer loops and their coordinator.
//!
//! The fetch loop looks departures up and publishes a [`ScheduleSnapshot`];
//! the render loop reads the latest one and drives the display. Both check
//! the operating window on every cycle and stop when their cancellation
//! token fires.

mod coordinator;
mod fetch_loop;
mod render_loop;
mod snapshot;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub use coordinator::Coordinator;
pub use fetch_loop::{CycleOutcome, FetchLoop};
pub use render_loop::RenderLoop;
pub use snapshot::{ScheduleSnapshot, SnapshotPublisher, SnapshotReader, snapshot_channel};

/// Sleep for `duration` unless cancelled first. Returns `true` if cancelled.
async fn pause(cancel: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}
