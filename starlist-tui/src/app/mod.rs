//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//! - Animations: row entrance schedulers, advanced by the event loop
//!
//! Screen state transitions are delegated to `libstarlist::ScreenState`;
//! this module adds navigation, scrolling and key handling on top.

pub mod actions;
pub mod animations;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use animations::Animations;
pub use reducer::{reduce, routes_to_search_field};
pub use state::{AppState, ScreenView, UiConfig};
