//! Row entrance animations per mounted screen
//!
//! Kept outside `AppState` so the reducer stays free of clocks. The event
//! loop calls [`Animations::sync`] after every state change and the UI
//! samples frames while drawing.

use std::collections::HashMap;
use std::time::Instant;

use libstarlist::animation::{RowFrame, RowId, StaggerScheduler};
use libstarlist::CollectionKind;

use super::state::AppState;

#[derive(Debug, Default)]
pub struct Animations {
    schedulers: HashMap<CollectionKind, StaggerScheduler>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount rows that became visible and unmount screens that went away
    ///
    /// Rows are only mounted once their screen has left the loading state,
    /// which is when the list is first rendered.
    pub fn sync(&mut self, state: &AppState, now: Instant) {
        self.schedulers.retain(|kind, _| state.is_mounted(*kind));

        for (kind, view) in &state.screens {
            if view.screen.is_loading {
                continue;
            }
            self.schedulers
                .entry(*kind)
                .or_default()
                .sync(&view.screen.row_keys(), now);
        }
    }

    pub fn frame(&self, kind: CollectionKind, row: &RowId, now: Instant) -> RowFrame {
        self.schedulers
            .get(&kind)
            .map(|scheduler| scheduler.frame_of(row, now))
            .unwrap_or_else(RowFrame::hidden)
    }

    /// Whether any row of any screen is still animating
    pub fn needs_redraw(&self, now: Instant) -> bool {
        self.schedulers
            .values()
            .any(|scheduler| scheduler.needs_redraw(now))
    }

    pub fn scheduler(&self, kind: CollectionKind) -> Option<&StaggerScheduler> {
        self.schedulers.get(&kind)
    }
}
