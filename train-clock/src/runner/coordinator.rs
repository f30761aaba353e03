//! Owner of the two loops.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::clock::Clock;
use crate::config::{ClockConfig, ConfigError};
use crate::display::Display;
use crate::schedule::{ScheduleFetcher, ScheduleFinder};

use super::fetch_loop::FetchLoop;
use super::render_loop::RenderLoop;
use super::snapshot::{ScheduleSnapshot, SnapshotReader, snapshot_channel};

/// Runs the fetch and render loops as tasks and stops them on request.
///
/// The loops share nothing but the snapshot channel and the cancellation
/// token, so a slow fetch never delays the display.
pub struct Coordinator {
    cancel: CancellationToken,
    reader: SnapshotReader,
    fetch: JoinHandle<()>,
    render: JoinHandle<()>,
}

impl Coordinator {
    /// Validate `config` and start both loops on the current runtime.
    pub fn spawn<F, D>(
        config: &ClockConfig,
        fetcher: F,
        display: D,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError>
    where
        F: ScheduleFetcher + 'static,
        D: Display,
    {
        config.validate()?;

        let finder = ScheduleFinder::new(
            fetcher,
            config.page.clone(),
            config.origin.clone(),
            config.destination.clone(),
            config.line_filter()?,
        );
        let (publisher, reader) = snapshot_channel();
        let cancel = CancellationToken::new();

        let fetch_loop = FetchLoop::new(
            finder,
            config.operating_window(),
            clock.clone(),
            config.walk(),
            config.schedule_refresh(),
            publisher,
        );
        let render_loop = RenderLoop::new(
            display,
            config.operating_window(),
            clock,
            reader.clone(),
            config.display_delay(),
            config.idle(),
        );

        info!(
            origin = %config.origin,
            destination = %config.destination,
            line = %config.line_filter,
            "starting train clock"
        );

        let fetch = tokio::spawn(fetch_loop.run(cancel.child_token()));
        let render = tokio::spawn(render_loop.run(cancel.child_token()));

        Ok(Self {
            cancel,
            reader,
            fetch,
            render,
        })
    }

    /// The snapshot currently on display.
    pub fn snapshot(&self) -> ScheduleSnapshot {
        self.reader.current()
    }

    /// A new reader of the snapshot channel.
    pub fn subscribe(&self) -> SnapshotReader {
        self.reader.clone()
    }

    /// Stop both loops and wait for them to finish.
    ///
    /// Returns an error if either loop panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.cancel.cancel();
        let fetch = self.fetch.await;
        let render = self.render.await;
        info!("train clock stopped");
        fetch.and(render)
    }
}
