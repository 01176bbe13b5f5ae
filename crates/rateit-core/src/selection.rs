use crate::events::{Completion, CompletionSender, DetailCompletion, SearchEvent, UiSignal};
use crate::tracker::RequestTracker;
use rateit_catalog::{CatalogClient, CatalogError};
use rateit_models::{MovieDetail, RequestFailure, RequestState};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Owns the selected catalog id and the detail stream for it.
pub struct SelectionController {
    catalog: Arc<dyn CatalogClient>,
    completions: CompletionSender,
    search_events: Option<broadcast::Receiver<SearchEvent>>,
    selected: Option<String>,
    detail: RequestState<MovieDetail>,
    tracker: RequestTracker,
}

impl SelectionController {
    pub fn new(catalog: Arc<dyn CatalogClient>, completions: CompletionSender) -> Self {
        Self {
            catalog,
            completions,
            search_events: None,
            selected: None,
            detail: RequestState::Idle,
            tracker: RequestTracker::new(),
        }
    }

    /// Close the detail view whenever a new search starts.
    pub fn subscribe_to(mut self, search_events: broadcast::Receiver<SearchEvent>) -> Self {
        self.search_events = Some(search_events);
        self
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> &RequestState<MovieDetail> {
        &self.detail
    }

    pub fn in_flight(&self) -> bool {
        self.tracker.in_flight()
    }

    /// Select `id`, or clear the selection if `id` is already selected.
    pub fn toggle_select(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.close();
        } else {
            self.select(id);
        }
    }

    pub fn close(&mut self) {
        if let Some(generation) = self.tracker.cancel() {
            debug!(generation, "Detail request cancelled by close");
        }
        if let Some(id) = self.selected.take() {
            debug!(id = %id, "Selection cleared");
        }
        self.detail = RequestState::Idle;
    }

    pub fn handle_signal(&mut self, signal: UiSignal) {
        match signal {
            UiSignal::Escape | UiSignal::Back => self.close(),
        }
    }

    /// Drain pending search events. Returns how many were handled.
    pub fn process_search_events(&mut self) -> usize {
        let mut handled = 0;
        let mut closed = false;

        if let Some(events) = self.search_events.as_mut() {
            loop {
                match events.try_recv() {
                    Ok(SearchEvent::Started { query, generation }) => {
                        debug!(query = %query, generation, "New search started, closing detail view");
                        handled += 1;
                    }
                    Err(TryRecvError::Lagged(missed)) => {
                        // Missed events can only have been search starts
                        warn!("Selection missed {} search events", missed);
                        handled += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Closed) => {
                        closed = true;
                        break;
                    }
                }
            }
        }

        if closed {
            self.search_events = None;
        }
        if handled > 0 {
            self.close();
        }
        handled
    }

    fn select(&mut self, id: &str) {
        let (generation, token) = self.tracker.begin();
        self.selected = Some(id.to_string());
        self.detail = RequestState::Loading;
        info!(id = %id, generation, "Loading movie details");

        let catalog = Arc::clone(&self.catalog);
        let completions = self.completions.clone();
        let id = id.to_string();

        tokio::spawn(async move {
            let outcome = catalog.fetch_detail_by_id(&id, &token).await;
            let _ = completions.send(Completion::Detail(DetailCompletion { generation, id, outcome }));
        });
    }

    /// Commit a finished detail fetch if it belongs to the current selection.
    pub fn apply(&mut self, completion: DetailCompletion) -> bool {
        let DetailCompletion { generation, id, outcome } = completion;

        if !self.tracker.complete(generation) {
            debug!(id = %id, generation, "Dropping stale detail response");
            return false;
        }

        self.detail = match outcome {
            Ok(detail) => {
                debug!(id = %id, title = %detail.title, "Movie details loaded");
                RequestState::Success(detail)
            }
            Err(CatalogError::NotFound(reason)) => {
                info!(id = %id, reason = %reason, "Movie details not found");
                RequestState::Failure(RequestFailure::not_found(reason))
            }
            Err(CatalogError::Cancelled) => {
                debug!(id = %id, generation, "Live detail request was cancelled");
                RequestState::Idle
            }
            Err(e) => {
                warn!(id = %id, "Detail fetch failed: {}", e);
                RequestState::Failure(RequestFailure::transport(e.to_string()))
            }
        };
        true
    }
}
