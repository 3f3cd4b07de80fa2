//! Integration tests for the remote select coordinator.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::sleep;

use formwork_remote::{
    AffiliationsSuggestions, MockSuggestionSource, RemoteSelectConfig, RemoteSelectField, SearchHooks,
};

fn hit(id: &str) -> Value {
    json!({"id": id, "title": id})
}

fn config() -> RemoteSelectConfig {
    RemoteSelectConfig::new("metadata.subjects", "https://example.org/api/subjects")
        .debounce(Duration::from_millis(500))
}

/// Test that a newer search supersedes a slower earlier one.
#[tokio::test(start_paused = true)]
async fn test_superseded_search_is_never_applied() {
    let source = MockSuggestionSource::new()
        .respond_after("a", vec![hit("from-a")], Duration::from_secs(2))
        .respond_after("ab", vec![hit("from-ab")], Duration::from_millis(100));
    let field = RemoteSelectField::new(config(), source.clone()).unwrap();

    field.on_search_change("a");
    sleep(Duration::from_millis(600)).await;
    assert!(field.state().is_fetching);

    field.on_search_change("ab");
    sleep(Duration::from_secs(5)).await;

    let state = field.state();
    assert_eq!(state.suggestions.values(), vec!["from-ab"]);
    assert_eq!(state.applied_results, 1);
    assert_eq!(state.search_query.as_deref(), Some("ab"));
    assert_eq!(source.queries(), vec!["a", "ab"]);
}

/// Test that typing within the debounce window sends one request.
#[tokio::test(start_paused = true)]
async fn test_debounce_sends_only_trailing_query() {
    let source = MockSuggestionSource::new().respond("phys", vec![hit("physics")]);
    let field = RemoteSelectField::new(config(), source.clone()).unwrap();

    for query in ["p", "ph", "phy", "phys"] {
        field.on_search_change(query);
        sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(source.call_count(), 0);

    sleep(Duration::from_millis(600)).await;
    assert_eq!(source.queries(), vec!["phys"]);
    assert_eq!(field.state().suggestions.values(), vec!["physics"]);
}

/// Test that selected suggestions stay listed across searches.
#[tokio::test(start_paused = true)]
async fn test_selection_survives_new_results() {
    let source = MockSuggestionSource::new()
        .respond("bio", vec![hit("biology"), hit("bioinformatics")])
        .respond("chem", vec![hit("chemistry"), hit("biology")]);
    let field = RemoteSelectField::new(config().multiple(true), source).unwrap();

    field.execute_search("bio").await;
    let selected = field.on_select_value(&["bioinformatics".to_string()]);
    assert_eq!(selected.len(), 1);

    field.on_search_change("chem");
    sleep(Duration::from_secs(1)).await;

    assert_eq!(
        field.state().suggestions.values(),
        vec!["bioinformatics", "chemistry", "biology"]
    );
}

/// Test that an empty query keeps the previous list and sends nothing.
#[tokio::test(start_paused = true)]
async fn test_empty_query_is_ignored() {
    let source = MockSuggestionSource::new().respond("geo", vec![hit("geology")]);
    let field = RemoteSelectField::new(config(), source.clone()).unwrap();

    field.on_search_change("geo");
    sleep(Duration::from_secs(1)).await;
    field.on_search_change("");
    sleep(Duration::from_secs(1)).await;

    assert_eq!(source.call_count(), 1);
    assert_eq!(field.state().suggestions.values(), vec!["geology"]);
}

/// Test that clearing the query within the debounce window cancels the
/// pending search.
#[tokio::test(start_paused = true)]
async fn test_clearing_query_cancels_pending_search() {
    let source = MockSuggestionSource::new().respond("a", vec![hit("from-a")]);
    let field = RemoteSelectField::new(
        config().initial_suggestions(vec![hit("initial")]),
        source.clone(),
    )
    .unwrap();

    field.on_search_change("a");
    sleep(Duration::from_millis(100)).await;
    field.on_search_change("");
    sleep(Duration::from_secs(2)).await;

    assert_eq!(source.call_count(), 0);
    let state = field.state();
    assert_eq!(state.suggestions.values(), vec!["initial"]);
    assert_eq!(state.applied_results, 0);
    assert!(!state.is_fetching);
}

/// Test that unmounting mid-request drops the late response.
#[tokio::test(start_paused = true)]
async fn test_unmount_discards_in_flight_result() {
    let source = MockSuggestionSource::new().respond_after("slow", vec![hit("late")], Duration::from_secs(3));
    let field = RemoteSelectField::new(config(), source.clone()).unwrap();

    field.on_search_change("slow");
    sleep(Duration::from_millis(700)).await;
    field.unmount();
    sleep(Duration::from_secs(5)).await;

    let state = field.state();
    assert_eq!(state.applied_results, 0);
    assert!(state.suggestions.is_empty());
    assert_eq!(source.completed_count(), 0);
}

/// Test that unmounting before the debounce fires sends nothing.
#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_debounce() {
    let source = MockSuggestionSource::new();
    {
        let field = RemoteSelectField::new(config(), source.clone()).unwrap();
        field.on_search_change("pending");
    }
    sleep(Duration::from_secs(1)).await;
    assert_eq!(source.call_count(), 0);
}

/// Test affiliation suggestions through the coordinator.
#[tokio::test]
async fn test_affiliation_search() {
    let source = MockSuggestionSource::new().respond(
        "cern",
        vec![json!({
            "id": "01ggx4157",
            "name": "CERN",
            "country_name": "Switzerland",
            "types": ["facility"]
        })],
    );
    let hooks = SearchHooks::new().serializer(AffiliationsSuggestions::organizations().with_manual_entry());
    let field = RemoteSelectField::with_hooks(config(), source, hooks).unwrap();

    field.execute_search("cern").await;

    let values: Vec<String> = field
        .state()
        .suggestions
        .iter()
        .map(|s| s.value.clone())
        .collect();
    assert_eq!(values, vec!["CERN", "Manual entry"]);

    let state = field.state();
    let record = state.suggestions.iter().next().unwrap();
    let extra = record.extra.as_ref().unwrap();
    assert_eq!(extra["id"], json!("01ggx4157"));
    assert_eq!(extra["content"]["header"], json!("CERN"));
    assert_eq!(extra["content"]["subheader"], json!("Switzerland — Facility"));
}
