//! Fetch lifecycle for mounted screens
//!
//! Each screen mount starts exactly one fetch. The fetch runs as a tokio task
//! and reports a single [`FetchOutcome`] over a crossbeam channel, so a
//! synchronous event loop can drain results with `try_recv`.
//!
//! Every load is tied to a [`LoadHandle`]. Dropping or cancelling the handle
//! (screen unmount) suppresses the outcome: the request itself still runs to
//! completion, but nothing is reported after teardown.

use std::sync::Arc;

use crossbeam_channel::Sender;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::error::{FetchError, StarlistError};
use crate::sources::CollectionSource;
use crate::types::{CollectionKind, CollectionRecord};

/// Result of one screen's fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Succeeded {
        kind: CollectionKind,
        items: Vec<CollectionRecord>,
    },
    Failed {
        kind: CollectionKind,
        error: FetchError,
    },
}

impl FetchOutcome {
    pub fn kind(&self) -> CollectionKind {
        match self {
            FetchOutcome::Succeeded { kind, .. } | FetchOutcome::Failed { kind, .. } => *kind,
        }
    }
}

/// Guard for an in-flight load
///
/// Cancels its token on drop.
#[derive(Debug)]
pub struct LoadHandle {
    kind: CollectionKind,
    token: CancellationToken,
}

impl LoadHandle {
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Suppress the outcome of this load
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if !self.token.is_cancelled() {
            tracing::debug!(screen = %self.kind, "Load handle dropped, suppressing outcome");
        }
        self.token.cancel();
    }
}

/// Spawns collection fetches on a tokio runtime
#[derive(Clone)]
pub struct CollectionLoader {
    runtime: Handle,
}

impl CollectionLoader {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Start the single fetch for a screen mount
    ///
    /// Exactly one outcome is sent on `outcomes` unless the returned handle
    /// is cancelled or dropped first. Failures are logged here and reported
    /// as [`FetchOutcome::Failed`]; they are never retried.
    pub fn load(
        &self,
        source: Arc<dyn CollectionSource>,
        outcomes: Sender<FetchOutcome>,
    ) -> LoadHandle {
        let kind = source.kind();
        let token = CancellationToken::new();
        let task_token = token.clone();

        tracing::info!(screen = %kind, "Loading collection");

        self.runtime.spawn(async move {
            let result = source.fetch().await;

            if task_token.is_cancelled() {
                tracing::debug!(screen = %kind, "Screen unmounted before fetch completed");
                return;
            }

            let outcome = match result {
                Ok(items) => {
                    tracing::info!(screen = %kind, count = items.len(), "Collection loaded");
                    FetchOutcome::Succeeded { kind, items }
                }
                Err(e) => {
                    tracing::error!(screen = %kind, error = %e, "Error fetching {}", kind);
                    FetchOutcome::Failed {
                        kind,
                        error: into_fetch_error(e),
                    }
                }
            };

            if outcomes.send(outcome).is_err() {
                tracing::debug!(screen = %kind, "Outcome receiver dropped");
            }
        });

        LoadHandle { kind, token }
    }
}

fn into_fetch_error(error: StarlistError) -> FetchError {
    match error {
        StarlistError::Fetch(e) => e,
        other => FetchError::Network(other.to_string()),
    }
}
