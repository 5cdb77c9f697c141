//! Test the mount / fetch / render-state flow
//!
//! Drives `ServiceHandle` with mock sources and feeds its outcomes through
//! the reducer, the way the event loop does.

use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use libstarlist::sources::{demo_records, CollectionSource, MockCollectionSource};
use libstarlist::{CollectionKind, CollectionRecord, FetchOutcome};
use serde_json::json;
use starlist_tui::app::{reduce, Action, AppState};
use starlist_tui::services::ServiceHandle;

const WAIT: Duration = Duration::from_secs(2);

fn films() -> Vec<CollectionRecord> {
    vec![
        json!({"uid": "1", "name": "A New Hope", "url": "u1"}),
        json!({"uid": "2", "name": "The Empire Strikes Back", "url": "u2"}),
    ]
    .into_iter()
    .filter_map(CollectionRecord::from_value)
    .collect()
}

fn services_with(sources: Vec<MockCollectionSource>) -> ServiceHandle {
    let sources: HashMap<CollectionKind, Arc<dyn CollectionSource>> = sources
        .into_iter()
        .map(|source| {
            let kind = source.kind();
            let source: Arc<dyn CollectionSource> = Arc::new(source);
            (kind, source)
        })
        .collect();
    ServiceHandle::with_sources(sources).unwrap()
}

/// Wait for one outcome and apply it
fn settle(state: AppState, services: &ServiceHandle) -> AppState {
    let outcome = services.recv_outcome_timeout(WAIT).expect("fetch outcome");
    reduce(state, outcome.into())
}

#[test]
fn test_mount_fetches_exactly_once() {
    let source = MockCollectionSource::success(CollectionKind::Films, films());
    let calls = source.call_counter();
    let mut services = services_with(vec![source]);

    assert!(services.ensure_mounted(CollectionKind::Films));
    assert!(!services.ensure_mounted(CollectionKind::Films));
    assert!(services.is_mounted(CollectionKind::Films));

    let state = settle(AppState::new(), &services);

    // Re-rendering after completion does not refetch
    assert!(!services.ensure_mounted(CollectionKind::Films));
    assert!(services.recv_outcome_timeout(Duration::from_millis(200)).is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!state.current().unwrap().screen.is_loading);

    services.shutdown();
}

#[test]
fn test_success_lists_rows_in_order() {
    let mut services = services_with(vec![MockCollectionSource::success(
        CollectionKind::Films,
        films(),
    )]);
    services.ensure_mounted(CollectionKind::Films);

    let state = settle(AppState::new(), &services);
    let screen = &state.current().unwrap().screen;

    assert!(!screen.is_loading);
    assert_eq!(screen.row_keys(), vec!["1", "2"]);
    assert_eq!(CollectionKind::Films.title_of(&screen.items[0]), "A New Hope");
    assert_eq!(
        CollectionKind::Films.detail_lines(&screen.items[1]),
        vec!["UID: 2", "URL: u2"]
    );

    services.shutdown();
}

#[test]
fn test_network_failure_shows_empty_list() {
    let mut services = services_with(vec![MockCollectionSource::network_failure(
        CollectionKind::Films,
        "connection refused",
    )]);
    services.ensure_mounted(CollectionKind::Films);

    let outcome = services.recv_outcome_timeout(WAIT).unwrap();
    assert!(matches!(outcome, FetchOutcome::Failed { .. }));

    let state = reduce(AppState::new(), outcome.into());
    let screen = &state.current().unwrap().screen;
    assert!(!screen.is_loading);
    assert!(screen.items.is_empty());

    services.shutdown();
}

#[test]
fn test_parse_failure_shows_empty_list() {
    let mut services = services_with(vec![MockCollectionSource::parse_failure(
        CollectionKind::Films,
        "missing results",
    )]);
    services.ensure_mounted(CollectionKind::Films);

    let state = settle(AppState::new(), &services);
    let screen = &state.current().unwrap().screen;
    assert!(!screen.is_loading);
    assert!(screen.items.is_empty());

    services.shutdown();
}

#[test]
fn test_search_echoes_text_without_filtering() {
    let mut services = services_with(vec![MockCollectionSource::success(
        CollectionKind::Films,
        films(),
    )]);
    services.ensure_mounted(CollectionKind::Films);

    let state = settle(AppState::new(), &services);
    let state = reduce(state, Action::SearchTextChanged("T".to_string()));
    let state = reduce(state, Action::SearchPressed);

    let screen = &state.current().unwrap().screen;
    assert!(screen.is_modal_open);
    assert_eq!(screen.modal_text(), "You searched for: T");
    assert_eq!(screen.items.len(), 2);

    let state = reduce(state, Action::ModalClosed);
    assert!(!state.modal_open());
    assert_eq!(state.current_search_text(), "T");

    services.shutdown();
}

#[test]
fn test_empty_search_echoes_prefix_only() {
    let state = reduce(AppState::new(), Action::SearchPressed);

    assert_eq!(state.current().unwrap().screen.modal_text(), "You searched for: ");
}

#[test]
fn test_unmount_before_completion_suppresses_outcome() {
    let source = MockCollectionSource::success(CollectionKind::Films, films())
        .with_delay(Duration::from_millis(200));
    let mut services = services_with(vec![source]);

    services.ensure_mounted(CollectionKind::Films);
    services.unmount(CollectionKind::Films);

    assert!(!services.is_mounted(CollectionKind::Films));
    assert!(services.recv_outcome_timeout(Duration::from_millis(600)).is_none());

    services.shutdown();
}

#[test]
fn test_screens_fetch_independently() {
    let films_source = MockCollectionSource::success(CollectionKind::Films, films());
    let planets_source = MockCollectionSource::success(
        CollectionKind::Planets,
        demo_records(CollectionKind::Planets),
    );
    let film_calls = films_source.call_counter();
    let planet_calls = planets_source.call_counter();
    let mut services = services_with(vec![films_source, planets_source]);

    let state = reduce(AppState::new(), Action::NavigateTo(CollectionKind::Planets));
    for kind in state.mounted_kinds() {
        services.ensure_mounted(kind);
    }

    let state = settle(state, &services);
    let state = settle(state, &services);

    assert!(!state.screen(CollectionKind::Films).unwrap().screen.is_loading);
    let planets = &state.screen(CollectionKind::Planets).unwrap().screen;
    assert_eq!(planets.row_keys()[0], "Tatooine");
    assert_eq!(film_calls.load(Ordering::SeqCst), 1);
    assert_eq!(planet_calls.load(Ordering::SeqCst), 1);

    services.shutdown();
}

#[test]
fn test_offline_services_serve_demo_data() {
    let mut services = ServiceHandle::offline().unwrap();
    services.ensure_mounted(CollectionKind::Films);

    let state = settle(AppState::new(), &services);
    assert_eq!(
        state.current().unwrap().screen.items,
        demo_records(CollectionKind::Films)
    );

    services.shutdown();
}
