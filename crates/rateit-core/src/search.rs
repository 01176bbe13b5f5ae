use crate::events::{Completion, CompletionSender, SearchCompletion, SearchEvent};
use crate::tracker::RequestTracker;
use rateit_catalog::{CatalogClient, CatalogError};
use rateit_config::SearchConfig;
use rateit_models::{RequestFailure, RequestState, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub const NOT_FOUND_MESSAGE: &str = "Oops! Movie Not Found!";

const EVENT_CAPACITY: usize = 16;

/// Owns the query string and the search-results stream.
///
/// Each accepted query change supersedes the previous request: its token is
/// cancelled and any completion it still delivers is dropped by generation.
pub struct SearchCoordinator {
    catalog: Arc<dyn CatalogClient>,
    completions: CompletionSender,
    events: broadcast::Sender<SearchEvent>,
    min_query_len: usize,
    debounce: Duration,
    query: String,
    state: RequestState<Vec<SearchResult>>,
    total_results: Option<u32>,
    tracker: RequestTracker,
}

impl SearchCoordinator {
    pub fn new(catalog: Arc<dyn CatalogClient>, completions: CompletionSender, config: &SearchConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            catalog,
            completions,
            events,
            min_query_len: config.min_query_len,
            debounce: Duration::from_millis(config.debounce_ms),
            query: String::new(),
            state: RequestState::Idle,
            total_results: None,
            tracker: RequestTracker::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &RequestState<Vec<SearchResult>> {
        &self.state
    }

    /// Catalog-wide match count for the visible results. Only the first page
    /// is fetched, so this can exceed `results().len()`.
    pub fn total_results(&self) -> Option<u32> {
        self.total_results
    }

    /// Visible results: the last successful list, or nothing.
    pub fn results(&self) -> &[SearchResult] {
        self.state.success().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn in_flight(&self) -> bool {
        self.tracker.in_flight()
    }

    fn is_inactive(&self, query: &str) -> bool {
        query.chars().count() < self.min_query_len
    }

    /// Record a new query. Short queries clear the list without touching the
    /// network; anything else starts a fresh search.
    pub fn on_query_change(&mut self, new_query: impl Into<String>) {
        let new_query = new_query.into();
        if new_query == self.query {
            return;
        }
        self.query = new_query;
        self.start_search();
    }

    /// Re-issue the current query, e.g. after a transport failure.
    pub fn retry(&mut self) {
        self.start_search();
    }

    fn start_search(&mut self) {
        if self.is_inactive(&self.query) {
            if let Some(generation) = self.tracker.cancel() {
                debug!("Search generation {} cancelled: query below {} chars", generation, self.min_query_len);
            }
            self.state = RequestState::Idle;
            self.total_results = None;
            return;
        }

        let (generation, token) = self.tracker.begin();
        self.state = RequestState::Loading;
        self.total_results = None;
        info!(query = %self.query, generation, "Searching catalog");

        // No subscribers is fine: nothing is open to close
        let _ = self.events.send(SearchEvent::Started {
            query: self.query.clone(),
            generation,
        });

        let catalog = Arc::clone(&self.catalog);
        let completions = self.completions.clone();
        let debounce = self.debounce;
        let query = self.query.clone();

        tokio::spawn(async move {
            let outcome = if debounce.is_zero() {
                catalog.search_by_title(&query, &token).await
            } else {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(CatalogError::Cancelled),
                    _ = tokio::time::sleep(debounce) => catalog.search_by_title(&query, &token).await,
                }
            };

            // A closed channel means the app is gone
            let _ = completions.send(Completion::Search(SearchCompletion {
                generation,
                query,
                outcome,
            }));
        });
    }

    /// Commit a finished search if it is still the live one. Returns whether
    /// visible state changed.
    pub fn apply(&mut self, completion: SearchCompletion) -> bool {
        let SearchCompletion { generation, query, outcome } = completion;

        if !self.tracker.complete(generation) {
            debug!(query = %query, generation, "Dropping superseded search response");
            return false;
        }

        self.total_results = None;
        self.state = match outcome {
            Ok(page) if page.found => {
                debug!(
                    query = %query,
                    generation,
                    results = page.results.len(),
                    total = ?page.total_results,
                    "Search results received"
                );
                self.total_results = page.total_results;
                RequestState::Success(page.results)
            }
            Ok(page) => {
                info!(query = %query, reason = ?page.message, "No catalog match");
                RequestState::Failure(RequestFailure::not_found(NOT_FOUND_MESSAGE))
            }
            Err(CatalogError::NotFound(reason)) => {
                info!(query = %query, reason = %reason, "No catalog match");
                RequestState::Failure(RequestFailure::not_found(NOT_FOUND_MESSAGE))
            }
            Err(CatalogError::Cancelled) => {
                // Live request cancelled by its transport; just clear Loading
                debug!(query = %query, generation, "Live search was cancelled");
                RequestState::Idle
            }
            Err(e) => {
                warn!(query = %query, generation, "Search failed: {}", e);
                RequestState::Failure(RequestFailure::transport(e.to_string()))
            }
        };
        true
    }
}
