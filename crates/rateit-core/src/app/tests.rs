use super::*;
use crate::search::NOT_FOUND_MESSAGE;
use crate::testing::{detail, page, settle_tasks, watched_entry, ScriptedCatalog};
use rateit_catalog::CatalogError;
use rateit_models::{FailureKind, SearchPage};

fn app(catalog: &Arc<ScriptedCatalog>) -> App {
    App::new(catalog.clone(), &SearchConfig::default())
}

/// Select `id`, resolve its detail with `title` and wait for it to load.
async fn open_detail(app: &mut App, catalog: &ScriptedCatalog, id: &str, title: &str) {
    app.toggle_select(id);
    settle_tasks().await;
    assert!(catalog.resolve_detail(id, Ok(detail(id, title))));
    app.settle().await;
}

#[tokio::test]
async fn test_search_scenario() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    app.on_query_change("Ti");
    settle_tasks().await;
    assert!(app.search().results().is_empty());
    assert_eq!(app.search().state().error_message(), "");
    assert!(catalog.search_calls().is_empty());

    app.on_query_change("Titanic");
    assert!(app.search().is_loading());
    settle_tasks().await;
    catalog.resolve_search("Titanic", Ok(page(&[("tt0120338", "Titanic"), ("tt1640571", "Titanic II")])));
    app.settle().await;
    assert_eq!(app.search().results().len(), 2);
    assert_eq!(app.snapshot().result_count, 2);

    app.on_query_change("zzzznotreal");
    settle_tasks().await;
    catalog.resolve_search("zzzznotreal", Ok(SearchPage::not_found("Movie not found!")));
    app.settle().await;
    let failure = app.search().state().failure().expect("search should fail");
    assert_eq!(failure.kind, FailureKind::NotFound);
    assert_eq!(failure.message, NOT_FOUND_MESSAGE);
    assert!(app.search().results().is_empty());
}

#[tokio::test]
async fn test_last_query_wins_with_aborting_transport() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    app.on_query_change("Titanic");
    settle_tasks().await;
    app.on_query_change("Titanic 2");
    settle_tasks().await;

    catalog.resolve_search("Titanic 2", Ok(page(&[("tt2", "Titanic 2")])));
    app.settle().await;

    // The first call was aborted, so there is nobody left to resolve
    assert!(!catalog.resolve_search("Titanic", Ok(page(&[("tt1", "Titanic")]))));
    settle_tasks().await;
    app.drain_ready();

    let results = app.search().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "tt2");
}

#[tokio::test]
async fn test_late_response_has_no_effect() {
    let catalog = ScriptedCatalog::ignoring_cancel();
    let mut app = app(&catalog);

    app.on_query_change("Titanic");
    settle_tasks().await;
    app.on_query_change("Titanic 2");
    settle_tasks().await;

    catalog.resolve_search("Titanic 2", Ok(page(&[("tt2", "Titanic 2")])));
    app.settle().await;
    let before = app.search().state().clone();

    assert!(catalog.resolve_search("Titanic", Err(CatalogError::Status { status: 500, message: "boom".to_string() })));
    settle_tasks().await;
    assert_eq!(app.drain_ready(), 1);

    assert_eq!(*app.search().state(), before);
    assert_eq!(app.search().query(), "Titanic 2");
}

#[tokio::test]
async fn test_stale_response_before_fresh_one_keeps_loading() {
    let catalog = ScriptedCatalog::ignoring_cancel();
    let mut app = app(&catalog);

    app.on_query_change("Titanic");
    settle_tasks().await;
    app.on_query_change("Titanic 2");
    settle_tasks().await;

    catalog.resolve_search("Titanic", Ok(page(&[("tt1", "Titanic")])));
    assert_eq!(app.next_completion().await, Some(false));
    assert!(app.search().is_loading());
    assert!(app.search().results().is_empty());

    catalog.resolve_search("Titanic 2", Ok(page(&[("tt2", "Titanic 2"), ("tt3", "Titanic 3")])));
    assert_eq!(app.next_completion().await, Some(true));
    assert_eq!(app.search().results().len(), 2);
}

#[tokio::test]
async fn test_new_search_closes_detail_view() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    open_detail(&mut app, &catalog, "tt1", "Titanic").await;
    assert_eq!(app.selection().selected_id(), Some("tt1"));

    // Short queries do not start a search and leave the view open
    app.on_query_change("Ti");
    assert_eq!(app.selection().selected_id(), Some("tt1"));

    app.on_query_change("Titanic");
    assert_eq!(app.selection().selected_id(), None);
    assert_eq!(*app.selection().detail(), RequestState::Idle);
}

#[tokio::test]
async fn test_detail_supersession_scenario() {
    let catalog = ScriptedCatalog::ignoring_cancel();
    let mut app = app(&catalog);

    app.toggle_select("tt0");
    settle_tasks().await;
    app.toggle_select("tt1");
    settle_tasks().await;

    catalog.resolve_detail("tt1", Ok(detail("tt1", "Second")));
    app.settle().await;
    catalog.resolve_detail("tt0", Ok(detail("tt0", "First")));
    settle_tasks().await;
    app.drain_ready();

    assert_eq!(app.selection().selected_id(), Some("tt1"));
    assert_eq!(app.selection().detail().success().map(|d| d.id.as_str()), Some("tt1"));
    assert_eq!(app.window_title(), "Movie | Second");
}

#[tokio::test]
async fn test_window_title_follows_detail() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);
    assert_eq!(app.window_title(), DEFAULT_WINDOW_TITLE);

    open_detail(&mut app, &catalog, "tt1", "Titanic").await;
    assert_eq!(app.window_title(), "Movie | Titanic");

    app.handle_signal(UiSignal::Escape);
    assert_eq!(app.window_title(), DEFAULT_WINDOW_TITLE);
}

#[tokio::test]
async fn test_add_selected_moves_detail_to_watched() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    open_detail(&mut app, &catalog, "tt1", "Titanic").await;
    let entry = app.add_selected(9).unwrap();

    assert_eq!(entry.id, "tt1");
    assert_eq!(entry.user_rating, 9);
    assert_eq!(entry.runtime_minutes, Some(120));
    assert_eq!(app.watched().len(), 1);
    assert_eq!(app.selection().selected_id(), None);
}

#[tokio::test]
async fn test_add_selected_rejects_duplicates() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    open_detail(&mut app, &catalog, "tt1", "Titanic").await;
    app.add_selected(9).unwrap();

    open_detail(&mut app, &catalog, "tt1", "Titanic").await;
    assert_eq!(app.snapshot().selected_user_rating, Some(9));
    assert_eq!(
        app.add_selected(4),
        Err(AppError::AlreadyWatched { id: "tt1".to_string(), user_rating: 9 })
    );
    assert_eq!(app.watched().len(), 1);
}

#[tokio::test]
async fn test_watched_entry_keyed_on_selected_id() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    // The catalog echoes the id back in a different case
    app.toggle_select("TT0120338");
    settle_tasks().await;
    assert!(catalog.resolve_detail("TT0120338", Ok(detail("tt0120338", "Titanic"))));
    app.settle().await;
    let entry = app.add_selected(9).unwrap();
    assert_eq!(entry.id, "TT0120338");

    app.toggle_select("TT0120338");
    settle_tasks().await;
    assert!(catalog.resolve_detail("TT0120338", Ok(detail("tt0120338", "Titanic"))));
    app.settle().await;

    assert_eq!(app.snapshot().selected_user_rating, Some(9));
    assert_eq!(
        app.add_selected(4),
        Err(AppError::AlreadyWatched { id: "TT0120338".to_string(), user_rating: 9 })
    );
    assert_eq!(app.watched().len(), 1);
    assert!(app.remove("TT0120338").is_some());
    assert!(app.watched().is_empty());
}

#[tokio::test]
async fn test_detail_without_id_still_keyed_on_selection() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    app.toggle_select("tt2");
    settle_tasks().await;
    assert!(catalog.resolve_detail("tt2", Ok(detail("", "Titanic"))));
    app.settle().await;

    let entry = app.add_selected(6).unwrap();
    assert_eq!(entry.id, "tt2");
    assert!(app.watched().is_watched("tt2"));
}

#[tokio::test]
async fn test_add_selected_preconditions() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    assert_eq!(app.add_selected(5), Err(AppError::NothingSelected));
    assert_eq!(app.add_selected(0), Err(AppError::InvalidRating(0)));
    assert_eq!(app.add_selected(11), Err(AppError::InvalidRating(11)));

    app.toggle_select("tt1");
    assert_eq!(app.add_selected(5), Err(AppError::DetailNotReady("tt1".to_string())));
}

#[tokio::test]
async fn test_watched_aggregates_scenario() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    app.add(watched_entry("tt1", 8.0, 9, 120));
    app.add(watched_entry("tt2", 6.0, 7, 100));

    let summary = app.summary();
    assert_eq!(summary.avg_imdb_rating, 7.0);
    assert_eq!(summary.avg_user_rating, 8.0);
    assert_eq!(summary.avg_runtime_minutes, 110.0);

    assert!(app.remove("tt404").is_none());
    assert_eq!(app.watched().len(), 2);
}

#[tokio::test]
async fn test_snapshot_serializes() {
    let catalog = ScriptedCatalog::new();
    let mut app = app(&catalog);

    app.on_query_change("Titanic");
    settle_tasks().await;
    catalog.resolve_search("Titanic", Ok(page(&[("tt1", "Titanic")])));
    app.settle().await;

    let json = serde_json::to_value(app.snapshot()).unwrap();
    assert_eq!(json["query"], "Titanic");
    assert_eq!(json["search"]["state"], "success");
    assert_eq!(json["search"]["value"][0]["id"], "tt1");
    assert_eq!(json["detail"]["state"], "idle");
    assert_eq!(json["window_title"], DEFAULT_WINDOW_TITLE);
}
