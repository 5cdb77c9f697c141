//! Application state
//!
//! Immutable state structure following functional programming principles.
//! All state transitions happen through the reducer (see `reducer.rs`).

use std::collections::HashMap;

use libstarlist::config::UiSettings;
use libstarlist::{CollectionKind, Config, ScreenState};

/// Root application state
///
/// A screen is mounted the first time it is shown and stays mounted for
/// the rest of the session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Screen currently shown
    pub current_screen: CollectionKind,

    /// Mounted screens
    pub screens: HashMap<CollectionKind, ScreenView>,

    /// UI configuration
    pub config: UiConfig,
}

/// A mounted screen plus its view-only state
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub screen: ScreenState,

    /// Index of the first visible row
    pub scroll: usize,
}

impl ScreenView {
    pub fn mount(kind: CollectionKind) -> Self {
        Self {
            screen: ScreenState::new(kind),
            scroll: 0,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl From<&UiSettings> for UiConfig {
    fn from(settings: &UiSettings) -> Self {
        Self {
            colors_enabled: settings.colors,
            tick_rate_ms: settings.tick_rate_ms.max(1),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        // Honors NO_COLOR and friends
        Self::from(&Config::default().with_env_overrides().ui)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_screen(CollectionKind::Films, UiConfig::default())
    }
}

impl AppState {
    /// Create new application state showing the Films screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state showing (and mounting) `kind`
    pub fn with_screen(kind: CollectionKind, config: UiConfig) -> Self {
        let mut screens = HashMap::new();
        screens.insert(kind, ScreenView::mount(kind));

        Self {
            should_quit: false,
            current_screen: kind,
            screens,
            config,
        }
    }

    pub fn screen(&self, kind: CollectionKind) -> Option<&ScreenView> {
        self.screens.get(&kind)
    }

    /// The screen being shown
    pub fn current(&self) -> Option<&ScreenView> {
        self.screen(self.current_screen)
    }

    pub fn is_mounted(&self, kind: CollectionKind) -> bool {
        self.screens.contains_key(&kind)
    }

    /// Mounted kinds in tab order
    pub fn mounted_kinds(&self) -> Vec<CollectionKind> {
        CollectionKind::ALL
            .into_iter()
            .filter(|kind| self.is_mounted(*kind))
            .collect()
    }

    /// Whether the search dialog of the current screen is open
    pub fn modal_open(&self) -> bool {
        self.current().is_some_and(|view| view.screen.is_modal_open)
    }

    pub fn current_search_text(&self) -> &str {
        self.current()
            .map(|view| view.screen.search_text.as_str())
            .unwrap_or("")
    }
}
