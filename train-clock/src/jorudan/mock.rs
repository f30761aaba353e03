//! Offline fetcher serving canned results pages.
//!
//! Pages are keyed by the search time of day (HHMM), so a test or an offline
//! run can describe a whole morning of departures with a handful of files.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;

use crate::domain::{ScheduleQuery, hhmm};
use crate::schedule::ScheduleFetcher;

use super::error::FetchError;

/// Fetcher that answers from memory instead of the network.
#[derive(Clone, Default)]
pub struct MockFetcher {
    /// Pages keyed by search time (HHMM).
    pages: Arc<RwLock<HashMap<u16, String>>>,
    /// Page served when no time-specific page exists.
    fallback: Arc<RwLock<Option<String>>>,
    /// Every query received, in order.
    queries: Arc<Mutex<Vec<ScheduleQuery>>>,
}

impl MockFetcher {
    /// Create an empty fetcher; every query fails until pages are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load pages from a directory of `HHMM.html` files.
    ///
    /// A file named `default.html` becomes the fallback page.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let dir = dir.as_ref();
        let mut pages = HashMap::new();
        let mut fallback = None;

        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| FetchError::Io { path, source }
        };

        for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
            let entry = entry.map_err(io_error(dir))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let html = std::fs::read_to_string(&path).map_err(io_error(path.as_path()))?;

            if stem == "default" {
                fallback = Some(html);
            } else if let Ok(key) = stem.parse::<u16>() {
                pages.insert(key, html);
            }
        }

        if pages.is_empty() && fallback.is_none() {
            return Err(FetchError::Unavailable(format!(
                "no mock pages found in {dir:?}"
            )));
        }

        Ok(Self {
            pages: Arc::new(RwLock::new(pages)),
            fallback: Arc::new(RwLock::new(fallback)),
            queries: Arc::default(),
        })
    }

    /// Serve `html` for searches at `hhmm` (e.g. 706 for 07:06).
    ///
    /// # Panics
    ///
    /// If this fetcher has already been cloned.
    pub fn with_page(mut self, hhmm: u16, html: impl Into<String>) -> Self {
        unshared(&mut self.pages).insert(hhmm, html.into());
        self
    }

    /// Serve `html` for any search without a specific page.
    ///
    /// # Panics
    ///
    /// If this fetcher has already been cloned.
    pub fn with_fallback(mut self, html: impl Into<String>) -> Self {
        *unshared(&mut self.fallback) = Some(html.into());
        self
    }

    /// Remove every page, so that all further queries fail.
    pub async fn clear(&self) {
        self.pages.write().await.clear();
        *self.fallback.write().await = None;
    }

    fn record(&self, query: &ScheduleQuery) {
        if let Ok(mut log) = self.queries.lock() {
            log.push(query.clone());
        }
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<ScheduleQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

/// Mutable access to state no clone can see yet.
fn unshared<T>(state: &mut Arc<RwLock<T>>) -> &mut T {
    match Arc::get_mut(state) {
        Some(lock) => lock.get_mut(),
        None => panic!("MockFetcher pages must be added before the fetcher is cloned"),
    }
}

impl ScheduleFetcher for MockFetcher {
    async fn fetch(&self, query: &ScheduleQuery) -> Result<String, FetchError> {
        self.record(query);

        let key = hhmm(query.at.time());
        if let Some(html) = self.pages.read().await.get(&key) {
            return Ok(html.clone());
        }

        self.fallback
            .read()
            .await
            .clone()
            .ok_or_else(|| FetchError::Unavailable(format!("no page for {key:04}")))
    }
}
