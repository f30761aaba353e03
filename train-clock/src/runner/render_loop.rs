//! Consumer loop: alternate the two departures on the display.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clock::Clock;
use crate::display::Display;
use crate::schedule::OperatingWindow;

use super::pause;
use super::snapshot::SnapshotReader;

/// Drives the display from the published snapshot.
pub struct RenderLoop<D: Display> {
    display: D,
    window: OperatingWindow,
    clock: Arc<dyn Clock>,
    reader: SnapshotReader,
    hold: Duration,
    idle: Duration,
}

impl<D: Display> RenderLoop<D> {
    /// Create a new render loop.
    pub fn new(
        display: D,
        window: OperatingWindow,
        clock: Arc<dyn Clock>,
        reader: SnapshotReader,
        hold: Duration,
        idle: Duration,
    ) -> Self {
        Self {
            display,
            window,
            clock,
            reader,
            hold,
            idle,
        }
    }

    /// Show both departures once, or blank the display if out of hours.
    ///
    /// Returns `true` if cancelled part-way.
    pub async fn run_cycle(&mut self, cancel: &CancellationToken) -> bool {
        if !self.window.is_active(self.clock.now()) {
            debug!("outside operating window, display off");
            self.display.clear();
            return pause(cancel, self.idle).await;
        }

        // Both halves come from the same snapshot.
        let snapshot = self.reader.current();

        self.display.show_code(snapshot.first);
        if pause(cancel, self.hold).await {
            return true;
        }

        self.display.show_code(snapshot.second);
        pause(cancel, self.hold).await
    }

    /// Repeat cycles until `cancel` fires, then blank the display.
    pub async fn run(mut self, cancel: CancellationToken) {
        debug!(hold = ?self.hold, "render loop started");
        while !self.run_cycle(&cancel).await {}
        self.display.clear();
        debug!("render loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::display::{DisplayCommand, RecordingDisplay};
    use crate::domain::DisplayCode;
    use crate::runner::snapshot::{ScheduleSnapshot, snapshot_channel};
    use crate::schedule::{TimeRange, WeeklyWindowTable, WindowLookup};
    use chrono::{NaiveDate, NaiveDateTime};

    fn monday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn morning() -> OperatingWindow {
        let table = WeeklyWindowTable {
            weekday: vec![TimeRange::new(700, 830).unwrap()],
            weekend: vec![],
        };
        OperatingWindow::new(table, WindowLookup::Inherited)
    }

    fn snapshot(first: &str, second: &str) -> ScheduleSnapshot {
        ScheduleSnapshot {
            first: DisplayCode::parse(first).unwrap(),
            second: DisplayCode::parse(second).unwrap(),
        }
    }

    fn render_loop(
        display: RecordingDisplay,
        now: NaiveDateTime,
        reader: SnapshotReader,
    ) -> RenderLoop<RecordingDisplay> {
        RenderLoop::new(
            display,
            morning(),
            Arc::new(FixedClock::new(now)),
            reader,
            Duration::from_secs(2),
            Duration::from_secs(60),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn shows_first_then_second() {
        let (publisher, reader) = snapshot_channel();
        publisher.publish(snapshot("0710", "0715"));

        let display = RecordingDisplay::new();
        let mut render = render_loop(display.clone(), monday(7, 15), reader);

        let cancelled = render.run_cycle(&CancellationToken::new()).await;
        assert!(!cancelled);
        assert_eq!(display.shown(), vec![[0, 7, 1, 0], [0, 7, 1, 5]]);
    }

    #[tokio::test(start_paused = true)]
    async fn placeholder_before_first_lookup() {
        let (_publisher, reader) = snapshot_channel();
        let display = RecordingDisplay::new();
        let mut render = render_loop(display.clone(), monday(7, 15), reader);

        render.run_cycle(&CancellationToken::new()).await;
        assert_eq!(display.shown(), vec![[0, 0, 0, 0], [0, 0, 0, 0]]);
    }

    #[tokio::test(start_paused = true)]
    async fn separator_is_on() {
        let (_publisher, reader) = snapshot_channel();
        let display = RecordingDisplay::new();
        let mut render = render_loop(display.clone(), monday(7, 15), reader);

        render.run_cycle(&CancellationToken::new()).await;
        assert!(display.commands().iter().all(|c| matches!(
            c,
            DisplayCommand::Show {
                separator: true,
                ..
            }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn clears_outside_window() {
        let (publisher, reader) = snapshot_channel();
        publisher.publish(snapshot("0710", "0715"));

        let display = RecordingDisplay::new();
        let mut render = render_loop(display.clone(), monday(12, 0), reader);

        let start = tokio::time::Instant::now();
        render.run_cycle(&CancellationToken::new()).await;

        assert_eq!(display.commands(), vec![DisplayCommand::Clear]);
        assert!(start.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn run_alternates_until_cancelled() {
        let (publisher, reader) = snapshot_channel();
        publisher.publish(snapshot("0710", "0715"));

        let display = RecordingDisplay::new();
        let render = render_loop(display.clone(), monday(7, 15), reader);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(render.run(cancel.clone()));

        // Shows at t = 0, 2, 4, 6
        tokio::time::sleep(Duration::from_secs(7)).await;
        cancel.cancel();
        handle.await.unwrap();

        let commands = display.commands();
        assert_eq!(commands.last(), Some(&DisplayCommand::Clear));
        assert_eq!(
            display.shown(),
            vec![[0, 7, 1, 0], [0, 7, 1, 5], [0, 7, 1, 0], [0, 7, 1, 5]]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn picks_up_new_snapshot_next_cycle() {
        let (publisher, reader) = snapshot_channel();
        publisher.publish(snapshot("0710", "0715"));

        let display = RecordingDisplay::new();
        let mut render = render_loop(display.clone(), monday(7, 15), reader);
        let cancel = CancellationToken::new();

        render.run_cycle(&cancel).await;
        publisher.publish(snapshot("0720", "0725"));
        render.run_cycle(&cancel).await;

        assert_eq!(
            display.shown(),
            vec![[0, 7, 1, 0], [0, 7, 1, 5], [0, 7, 2, 0], [0, 7, 2, 5]]
        );
    }
}
