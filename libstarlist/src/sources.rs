//! Collection sources
//!
//! A source produces the ordered records of one remote collection. The HTTP
//! source talks to the listing API; the mock source is used by integration
//! tests and by the TUI's offline mode.
//!
//! # Examples
//!
//! ```no_run
//! use libstarlist::sources::{CollectionSource, HttpCollectionSource};
//! use libstarlist::types::CollectionKind;
//!
//! # async fn example() -> libstarlist::Result<()> {
//! let source = HttpCollectionSource::new(CollectionKind::Films, "https://swapi.tech/api");
//! let films = source.fetch().await?;
//! println!("{} films", films.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{FetchError, Result};
use crate::types::{CollectionKind, CollectionRecord, ResultsEnvelope};

pub use reqwest::Client;

/// Source of the records shown on one screen
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch the collection once
    ///
    /// # Errors
    ///
    /// - `FetchError::Network` if the request is rejected by the transport
    /// - `FetchError::Parse` if the body is not JSON or lacks `results`
    async fn fetch(&self) -> Result<Vec<CollectionRecord>>;

    /// Which collection this source serves
    fn kind(&self) -> CollectionKind;
}

/// Source backed by a single GET against the listing endpoint
pub struct HttpCollectionSource {
    kind: CollectionKind,
    url: String,
    client: reqwest::Client,
}

impl HttpCollectionSource {
    pub fn new(kind: CollectionKind, base_url: &str) -> Self {
        Self::with_client(kind, base_url, reqwest::Client::new())
    }

    /// Share a client (and its connection pool) between sources
    pub fn with_client(kind: CollectionKind, base_url: &str, client: reqwest::Client) -> Self {
        Self {
            kind,
            url: kind.endpoint(base_url),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CollectionSource for HttpCollectionSource {
    async fn fetch(&self) -> Result<Vec<CollectionRecord>> {
        tracing::debug!(url = %self.url, "Fetching collection");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::from)?;

        // The status is not checked: an error page simply fails to parse.
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %self.url, %status, "Listing endpoint returned non-success status");
        }

        let body = response.text().await.map_err(FetchError::from)?;
        let envelope: ResultsEnvelope = serde_json::from_str(&body).map_err(FetchError::from)?;

        tracing::debug!(url = %self.url, count = envelope.results.len(), "Collection fetched");
        Ok(envelope.results)
    }

    fn kind(&self) -> CollectionKind {
        self.kind
    }
}

/// Configuration for mock source behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub kind: CollectionKind,

    /// Records returned on success
    pub records: Vec<CollectionRecord>,

    /// Error returned instead of the records
    pub error: Option<FetchError>,

    /// Delay before completing (simulates network latency)
    pub delay: Duration,

    /// Number of times fetch has been called
    pub fetch_call_count: Arc<AtomicUsize>,
}

impl MockConfig {
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            error: None,
            delay: Duration::from_millis(0),
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Mock source for tests and offline mode
pub struct MockCollectionSource {
    config: MockConfig,
}

impl MockCollectionSource {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A source that returns `records`
    pub fn success(kind: CollectionKind, records: Vec<CollectionRecord>) -> Self {
        Self::new(MockConfig {
            records,
            ..MockConfig::new(kind)
        })
    }

    /// A source whose request is rejected by the transport
    pub fn network_failure(kind: CollectionKind, error: &str) -> Self {
        Self::new(MockConfig {
            error: Some(FetchError::Network(error.to_string())),
            ..MockConfig::new(kind)
        })
    }

    /// A source whose body cannot be parsed
    pub fn parse_failure(kind: CollectionKind, error: &str) -> Self {
        Self::new(MockConfig {
            error: Some(FetchError::Parse(error.to_string())),
            ..MockConfig::new(kind)
        })
    }

    /// A source with a delay before it completes
    pub fn with_delay(self, delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..self.config
        })
    }

    /// A source serving the built-in demo records for `kind`
    pub fn demo(kind: CollectionKind) -> Self {
        Self::success(kind, demo_records(kind)).with_delay(Duration::from_millis(400))
    }

    /// Get the number of times fetch was called
    pub fn fetch_call_count(&self) -> usize {
        self.config.fetch_call_count.load(Ordering::SeqCst)
    }

    /// Shared counter, readable after the source is moved into a loader
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.config.fetch_call_count)
    }
}

#[async_trait]
impl CollectionSource for MockCollectionSource {
    async fn fetch(&self) -> Result<Vec<CollectionRecord>> {
        self.config.fetch_call_count.fetch_add(1, Ordering::SeqCst);

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        match self.config.error {
            Some(ref error) => Err(error.clone().into()),
            None => Ok(self.config.records.clone()),
        }
    }

    fn kind(&self) -> CollectionKind {
        self.config.kind
    }
}

/// Records served by the offline demo
pub fn demo_records(kind: CollectionKind) -> Vec<CollectionRecord> {
    let values = match kind {
        CollectionKind::Films => vec![
            json!({"uid": "1", "name": "A New Hope", "url": "https://swapi.tech/api/films/1"}),
            json!({"uid": "2", "name": "The Empire Strikes Back", "url": "https://swapi.tech/api/films/2"}),
            json!({"uid": "3", "name": "Return of the Jedi", "url": "https://swapi.tech/api/films/3"}),
            json!({"uid": "4", "name": "The Phantom Menace", "url": "https://swapi.tech/api/films/4"}),
            json!({"uid": "5", "name": "Attack of the Clones", "url": "https://swapi.tech/api/films/5"}),
            json!({"uid": "6", "name": "Revenge of the Sith", "url": "https://swapi.tech/api/films/6"}),
        ],
        CollectionKind::Planets => vec![
            json!({"name": "Tatooine", "population": "200000", "climate": "arid"}),
            json!({"name": "Alderaan", "population": "2000000000", "climate": "temperate"}),
            json!({"name": "Yavin IV", "population": "1000", "climate": "temperate, tropical"}),
            json!({"name": "Hoth", "population": "unknown", "climate": "frozen"}),
            json!({"name": "Dagobah", "population": "unknown", "climate": "murky"}),
            json!({"name": "Bespin", "population": "6000000", "climate": "temperate"}),
        ],
    };

    values
        .into_iter()
        .filter_map(CollectionRecord::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StarlistError;

    #[tokio::test]
    async fn test_mock_success_counts_calls() {
        let records = demo_records(CollectionKind::Films);
        let source = MockCollectionSource::success(CollectionKind::Films, records.clone());

        let fetched = source.fetch().await.unwrap();
        assert_eq!(fetched, records);
        assert_eq!(source.fetch_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_network_failure() {
        let source = MockCollectionSource::network_failure(CollectionKind::Planets, "offline");

        let result = source.fetch().await;
        assert!(matches!(
            result,
            Err(StarlistError::Fetch(FetchError::Network(ref msg))) if msg == "offline"
        ));
    }

    #[tokio::test]
    async fn test_mock_parse_failure() {
        let source = MockCollectionSource::parse_failure(CollectionKind::Films, "not json");

        let result = source.fetch().await;
        assert!(matches!(result, Err(StarlistError::Fetch(FetchError::Parse(_)))));
    }

    #[test]
    fn test_demo_records_have_unique_keys() {
        for kind in CollectionKind::ALL {
            let records = demo_records(kind);
            let mut keys: Vec<String> = records.iter().map(|r| kind.key_of(r)).collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), records.len());
        }
    }

    #[test]
    fn test_http_source_url() {
        let source = HttpCollectionSource::new(CollectionKind::Planets, "https://swapi.tech/api/");
        assert_eq!(source.url(), "https://swapi.tech/api/planets/");
        assert_eq!(source.kind(), CollectionKind::Planets);
    }
}
