//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. Fetch outcomes arrive
//! from the loader and are converted into actions before they touch state.

use crossterm::event::KeyEvent;
use libstarlist::{CollectionKind, CollectionRecord, FetchOutcome};

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input not consumed by the search field
    Key(KeyEvent),

    /// Periodic tick; drives animation frames
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Show a screen, mounting it on first visit
    NavigateTo(CollectionKind),

    Quit,

    /// Move the current list by a signed number of rows
    Scroll(isize),

    // === Screen input ===
    /// Search field contents changed (raw text)
    SearchTextChanged(String),

    /// Search button pressed; opens the dialog
    SearchPressed,

    /// Search dialog dismissed
    ModalClosed,

    // === Fetch completion ===
    FetchSucceeded {
        kind: CollectionKind,
        items: Vec<CollectionRecord>,
    },

    FetchFailed {
        kind: CollectionKind,
    },
}

impl From<FetchOutcome> for Action {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Succeeded { kind, items } => Action::FetchSucceeded { kind, items },
            // The error was already logged by the loader
            FetchOutcome::Failed { kind, .. } => Action::FetchFailed { kind },
        }
    }
}
