//! Per-screen state
//!
//! `ScreenState` is an immutable snapshot. Each transition consumes the
//! current snapshot and returns the next one; nothing here performs I/O.

use crate::animation::{row_ids, RowId};
use crate::types::{CollectionKind, CollectionRecord};

/// Prefix of the text shown in the search dialog
pub const SEARCH_ECHO_PREFIX: &str = "You searched for: ";

/// State of one collection screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    pub kind: CollectionKind,

    /// Records in API order; empty until a fetch succeeds
    pub items: Vec<CollectionRecord>,

    /// True until the single fetch attempt completes
    pub is_loading: bool,

    /// Raw search field contents
    pub search_text: String,

    pub is_modal_open: bool,
}

impl ScreenState {
    /// Freshly mounted screen: loading, empty, modal closed
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            is_loading: true,
            search_text: String::new(),
            is_modal_open: false,
        }
    }

    /// The fetch returned records
    ///
    /// Ignored once loading has been cleared, so at most one completion is
    /// ever applied.
    pub fn on_fetch_succeeded(self, items: Vec<CollectionRecord>) -> Self {
        if !self.is_loading {
            tracing::warn!(screen = %self.kind, "Ignoring fetch result after loading completed");
            return self;
        }
        Self {
            items,
            is_loading: false,
            ..self
        }
    }

    /// The fetch failed; the screen shows an empty list
    pub fn on_fetch_failed(self) -> Self {
        if !self.is_loading {
            tracing::warn!(screen = %self.kind, "Ignoring fetch failure after loading completed");
            return self;
        }
        Self {
            items: Vec::new(),
            is_loading: false,
            ..self
        }
    }

    pub fn on_text_changed(self, text: String) -> Self {
        Self {
            search_text: text,
            ..self
        }
    }

    /// Open the search dialog; the list is not filtered
    pub fn on_search_pressed(self) -> Self {
        Self {
            is_modal_open: true,
            ..self
        }
    }

    pub fn on_modal_closed(self) -> Self {
        Self {
            is_modal_open: false,
            ..self
        }
    }

    /// Text shown in the search dialog
    pub fn modal_text(&self) -> String {
        format!("{}{}", SEARCH_ECHO_PREFIX, self.search_text)
    }

    /// List key of each item, in render order
    pub fn row_keys(&self) -> Vec<String> {
        self.items.iter().map(|item| self.kind.key_of(item)).collect()
    }

    /// Animation identity of each item, in render order
    pub fn row_ids(&self) -> Vec<RowId> {
        row_ids(&self.row_keys())
    }
}
