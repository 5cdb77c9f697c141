//! Pure reducer function for state transitions
//!
//! The reducer is a pure function: `(State, Action) -> State`.
//! Starting fetches and advancing animations happen in the event loop,
//! which watches the resulting state.

use super::actions::Action;
use super::state::{AppState, ScreenView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libstarlist::CollectionKind;

/// Rows moved by PageUp/PageDown
pub const PAGE_ROWS: isize = 5;

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// # Purity Guarantees
///
/// - No network requests
/// - No terminal I/O
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state, // Animations are sampled at render time
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        Action::NavigateTo(kind) => {
            let mut screens = state.screens;
            screens
                .entry(kind)
                .or_insert_with(|| ScreenView::mount(kind));
            AppState {
                current_screen: kind,
                screens,
                ..state
            }
        }

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::Scroll(delta) => {
            let kind = state.current_screen;
            update_screen(state, kind, |view| {
                let last = view.screen.items.len().saturating_sub(1);
                let scroll = view.scroll.saturating_add_signed(delta).min(last);
                ScreenView { scroll, ..view }
            })
        }

        // === Screen input ===
        Action::SearchTextChanged(text) => {
            let kind = state.current_screen;
            update_screen(state, kind, |view| ScreenView {
                screen: view.screen.on_text_changed(text),
                ..view
            })
        }

        Action::SearchPressed => {
            let kind = state.current_screen;
            update_screen(state, kind, |view| ScreenView {
                screen: view.screen.on_search_pressed(),
                ..view
            })
        }

        Action::ModalClosed => {
            let kind = state.current_screen;
            update_screen(state, kind, |view| ScreenView {
                screen: view.screen.on_modal_closed(),
                ..view
            })
        }

        // === Fetch completion ===
        Action::FetchSucceeded { kind, items } => update_screen(state, kind, |view| ScreenView {
            screen: view.screen.on_fetch_succeeded(items),
            ..view
        }),

        Action::FetchFailed { kind } => update_screen(state, kind, |view| ScreenView {
            screen: view.screen.on_fetch_failed(),
            ..view
        }),
    }
}

/// Apply `f` to a mounted screen; unmounted screens are left alone
fn update_screen<F>(state: AppState, kind: CollectionKind, f: F) -> AppState
where
    F: FnOnce(ScreenView) -> ScreenView,
{
    let mut screens = state.screens;
    if let Some(view) = screens.remove(&kind) {
        screens.insert(kind, f(view));
    }
    AppState { screens, ..state }
}

/// Whether a key edits the search field rather than driving the app
///
/// The event loop hands these keys to the text input widget and reports
/// the new contents as `SearchTextChanged`.
pub fn routes_to_search_field(state: &AppState, key: &KeyEvent) -> bool {
    if state.modal_open() || state.current().is_none() {
        return false;
    }

    match key.code {
        KeyCode::Char(_) => !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT),
        KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End => true,
        _ => false,
    }
}

/// Handle keyboard input
///
/// Maps keys to high-level actions. This is where keybindings are defined.
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    // Global keybindings (work everywhere)
    if let (KeyCode::Char('c') | KeyCode::Char('q'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return reduce(state, Action::Quit);
    }

    // The dialog blocks the screen behind it, navigation included
    if state.modal_open() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => reduce(state, Action::ModalClosed),
            _ => state,
        };
    }

    match key.code {
        KeyCode::F(1) => reduce(state, Action::NavigateTo(CollectionKind::Films)),
        KeyCode::F(2) => reduce(state, Action::NavigateTo(CollectionKind::Planets)),
        KeyCode::Tab => {
            let next = state.current_screen.next();
            reduce(state, Action::NavigateTo(next))
        }
        KeyCode::BackTab => {
            let previous = state.current_screen.previous();
            reduce(state, Action::NavigateTo(previous))
        }
        KeyCode::Enter => reduce(state, Action::SearchPressed),
        KeyCode::Up => reduce(state, Action::Scroll(-1)),
        KeyCode::Down => reduce(state, Action::Scroll(1)),
        KeyCode::PageUp => reduce(state, Action::Scroll(-PAGE_ROWS)),
        KeyCode::PageDown => reduce(state, Action::Scroll(PAGE_ROWS)),
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libstarlist::sources::demo_records;

    fn loaded_films() -> AppState {
        reduce(
            AppState::new(),
            Action::FetchSucceeded {
                kind: CollectionKind::Films,
                items: demo_records(CollectionKind::Films),
            },
        )
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let state_clone = state.clone();

        let new_state = reduce(state_clone.clone(), Action::SearchTextChanged("Hope".to_string()));

        // Original state unchanged
        assert_eq!(state_clone.current_search_text(), "");

        // New state has the change
        assert_eq!(new_state.current_search_text(), "Hope");
    }

    #[test]
    fn test_quit_action() {
        let state = AppState::new();
        assert!(!state.should_quit);

        let new_state = reduce(state, Action::Quit);
        assert!(new_state.should_quit);
    }

    #[test]
    fn test_navigate_mounts_once() {
        let state = reduce(AppState::new(), Action::NavigateTo(CollectionKind::Planets));
        assert!(state.is_mounted(CollectionKind::Planets));

        let state = reduce(
            state,
            Action::FetchFailed {
                kind: CollectionKind::Planets,
            },
        );
        let state = reduce(state, Action::NavigateTo(CollectionKind::Films));
        let state = reduce(state, Action::NavigateTo(CollectionKind::Planets));

        // Revisiting keeps the mounted screen, loading stays cleared
        assert!(!state.current().unwrap().screen.is_loading);
    }

    #[test]
    fn test_fetch_for_unmounted_screen_is_ignored() {
        let state = reduce(
            AppState::new(),
            Action::FetchSucceeded {
                kind: CollectionKind::Planets,
                items: demo_records(CollectionKind::Planets),
            },
        );

        assert!(!state.is_mounted(CollectionKind::Planets));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let state = loaded_films();

        let state = reduce(state, Action::Scroll(-3));
        assert_eq!(state.current().unwrap().scroll, 0);

        let state = reduce(state, Action::Scroll(100));
        assert_eq!(state.current().unwrap().scroll, 5);

        let state = reduce(state, Action::Scroll(-PAGE_ROWS));
        assert_eq!(state.current().unwrap().scroll, 0);
    }

    #[test]
    fn test_scroll_on_empty_list_stays_at_zero() {
        let state = reduce(AppState::new(), Action::Scroll(PAGE_ROWS));
        assert_eq!(state.current().unwrap().scroll, 0);
    }
}
