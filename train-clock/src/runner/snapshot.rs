//! The published departure pair.
//!
//! The fetch loop is the only writer and the render loop the only reader.
//! A snapshot is a small `Copy` value sent whole through a watch channel,
//! so a reader can never see a new first departure next to a stale second.

use tokio::sync::watch;

use crate::domain::DisplayCode;
use crate::schedule::DeparturePair;

/// The two departure codes currently on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleSnapshot {
    pub first: DisplayCode,
    pub second: DisplayCode,
}

impl From<DeparturePair> for ScheduleSnapshot {
    fn from(pair: DeparturePair) -> Self {
        Self {
            first: DisplayCode::from_time(pair.first.time()),
            second: DisplayCode::from_time(pair.second.time()),
        }
    }
}

/// Create a channel holding the placeholder snapshot.
pub fn snapshot_channel() -> (SnapshotPublisher, SnapshotReader) {
    let (tx, rx) = watch::channel(ScheduleSnapshot::default());
    (SnapshotPublisher { tx }, SnapshotReader { rx })
}

/// Write half; there is exactly one.
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<ScheduleSnapshot>,
}

impl SnapshotPublisher {
    /// Replace the snapshot. Works whether or not anyone is reading.
    pub fn publish(&self, snapshot: ScheduleSnapshot) {
        self.tx.send_replace(snapshot);
    }
}

/// Read half; cheap to clone.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<ScheduleSnapshot>,
}

impl SnapshotReader {
    /// The latest snapshot.
    pub fn current(&self) -> ScheduleSnapshot {
        *self.rx.borrow()
    }

    /// Wait until a snapshot newer than the last one seen is published.
    ///
    /// Returns `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<ScheduleSnapshot> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
