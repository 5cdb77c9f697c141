//! Starlist - browse remote collections from the terminal
//!
//! This library provides the core functionality behind the Starlist screens:
//! fetching a collection from a listing API, keeping per-screen state, and
//! scheduling the staggered entrance animation of list rows.

pub mod animation;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod screen;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use animation::{progress, AnimationPhase, EntranceAnimation, RowId, StaggerScheduler};
pub use config::Config;
pub use error::{FetchError, Result, StarlistError};
pub use loader::{CollectionLoader, FetchOutcome, LoadHandle};
pub use screen::ScreenState;
pub use sources::{CollectionSource, HttpCollectionSource, MockCollectionSource};
pub use types::{CollectionKind, CollectionRecord};
