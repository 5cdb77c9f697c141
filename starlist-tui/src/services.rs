//! Loader adapter for the TUI
//!
//! Bridges the async `CollectionLoader` to the synchronous event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle` owns a tokio runtime and one source per collection
//! - Mounting a screen starts its single fetch and keeps the `LoadHandle`
//! - Outcomes arrive on a crossbeam channel drained with `try_recv`
//!
//! # Example
//!
//! ```no_run
//! use libstarlist::CollectionKind;
//! use starlist_tui::services::ServiceHandle;
//!
//! # fn example() -> starlist_tui::error::Result<()> {
//! let mut services = ServiceHandle::new("https://swapi.tech/api")?;
//! services.ensure_mounted(CollectionKind::Films);
//!
//! // In the event loop
//! for outcome in services.drain_outcomes() {
//!     println!("{:?} finished", outcome.kind());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libstarlist::sources::{Client, CollectionSource, HttpCollectionSource, MockCollectionSource};
use libstarlist::{CollectionKind, CollectionLoader, FetchOutcome, LoadHandle};

use crate::error::{Result, TuiError};

/// Service handle for TUI operations
pub struct ServiceHandle {
    sources: HashMap<CollectionKind, Arc<dyn CollectionSource>>,
    loader: CollectionLoader,
    mounts: HashMap<CollectionKind, LoadHandle>,
    outcome_tx: Sender<FetchOutcome>,
    outcome_rx: Receiver<FetchOutcome>,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Create a service handle fetching from the listing API at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::new();
        let sources = CollectionKind::ALL
            .into_iter()
            .map(|kind| {
                let source: Arc<dyn CollectionSource> =
                    Arc::new(HttpCollectionSource::with_client(kind, base_url, client.clone()));
                (kind, source)
            })
            .collect();
        Self::with_sources(sources)
    }

    /// Create a service handle serving built-in demo data
    pub fn offline() -> Result<Self> {
        let sources = CollectionKind::ALL
            .into_iter()
            .map(|kind| {
                let source: Arc<dyn CollectionSource> = Arc::new(MockCollectionSource::demo(kind));
                (kind, source)
            })
            .collect();
        Self::with_sources(sources)
    }

    /// Create a service handle with explicit sources
    pub fn with_sources(sources: HashMap<CollectionKind, Arc<dyn CollectionSource>>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| TuiError::Runtime(e.to_string()))?;
        let loader = CollectionLoader::new(runtime.handle().clone());
        let (outcome_tx, outcome_rx) = unbounded();

        Ok(Self {
            sources,
            loader,
            mounts: HashMap::new(),
            outcome_tx,
            outcome_rx,
            runtime,
        })
    }

    /// Start the fetch for a newly mounted screen
    ///
    /// Returns `true` if a fetch was started. A screen is fetched at most
    /// once per mount; calling this again is a no-op.
    pub fn ensure_mounted(&mut self, kind: CollectionKind) -> bool {
        if self.mounts.contains_key(&kind) {
            return false;
        }
        let Some(source) = self.sources.get(&kind) else {
            tracing::warn!(screen = %kind, "No source configured");
            return false;
        };

        let handle = self.loader.load(Arc::clone(source), self.outcome_tx.clone());
        self.mounts.insert(kind, handle);
        true
    }

    /// Tear down a screen; a pending outcome for it is suppressed
    pub fn unmount(&mut self, kind: CollectionKind) {
        if let Some(handle) = self.mounts.remove(&kind) {
            handle.cancel();
        }
    }

    pub fn is_mounted(&self, kind: CollectionKind) -> bool {
        self.mounts.contains_key(&kind)
    }

    /// Take every outcome reported so far, without blocking
    pub fn drain_outcomes(&self) -> Vec<FetchOutcome> {
        self.outcome_rx.try_iter().collect()
    }

    /// Blocking variant of [`drain_outcomes`](Self::drain_outcomes) for tests
    pub fn recv_outcome_timeout(&self, timeout: std::time::Duration) -> Option<FetchOutcome> {
        self.outcome_rx.recv_timeout(timeout).ok()
    }

    /// Stop the runtime without waiting on requests still in flight
    pub fn shutdown(self) {
        let ServiceHandle { mounts, runtime, .. } = self;
        drop(mounts);
        runtime.shutdown_background();
    }
}
