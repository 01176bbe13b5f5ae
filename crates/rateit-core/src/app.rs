use crate::aggregate::WatchedSummary;
use crate::error::AppError;
use crate::events::{Completion, CompletionReceiver, UiSignal};
use crate::search::SearchCoordinator;
use crate::selection::SelectionController;
use crate::watched::WatchedStore;
use rateit_catalog::CatalogClient;
use rateit_config::SearchConfig;
use rateit_models::{MovieDetail, RequestState, SearchResult, UserRating, WatchedEntry};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub const DEFAULT_WINDOW_TITLE: &str = "RateIt";

/// Read-only view of everything the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
pub struct AppSnapshot {
    pub query: String,
    pub search: RequestState<Vec<SearchResult>>,
    pub result_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>, // Catalog-wide matches; may exceed result_count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<String>,
    pub detail: RequestState<MovieDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_user_rating: Option<u8>, // Set when the open movie is already watched
    pub watched: Vec<WatchedEntry>,
    pub summary: WatchedSummary,
    pub window_title: String,
}

/// Composes search, selection and the watched list behind one command surface.
///
/// All state lives here and is only mutated by the task that owns the `App`.
/// Catalog calls run on spawned tasks and come back as [`Completion`]s that
/// must be fed through [`App::apply`] (or the helpers that wrap it).
pub struct App {
    search: SearchCoordinator,
    selection: SelectionController,
    watched: WatchedStore,
    completions: CompletionReceiver,
}

impl App {
    pub fn new(catalog: Arc<dyn CatalogClient>, config: &SearchConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let search = SearchCoordinator::new(Arc::clone(&catalog), tx.clone(), config);
        let selection = SelectionController::new(catalog, tx).subscribe_to(search.subscribe());

        Self {
            search,
            selection,
            watched: WatchedStore::new(),
            completions: rx,
        }
    }

    pub fn search(&self) -> &SearchCoordinator {
        &self.search
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn watched(&self) -> &WatchedStore {
        &self.watched
    }

    // Commands

    pub fn on_query_change(&mut self, query: impl Into<String>) {
        self.search.on_query_change(query);
        self.selection.process_search_events();
    }

    pub fn retry_search(&mut self) {
        self.search.retry();
        self.selection.process_search_events();
    }

    pub fn toggle_select(&mut self, id: &str) {
        self.selection.toggle_select(id);
    }

    pub fn close(&mut self) {
        self.selection.close();
    }

    pub fn handle_signal(&mut self, signal: UiSignal) {
        self.selection.handle_signal(signal);
    }

    pub fn add(&mut self, entry: WatchedEntry) {
        self.watched.add(entry);
    }

    /// Rate the open movie and move it to the watched list, closing the detail view.
    pub fn add_selected(&mut self, rating: u8) -> Result<WatchedEntry, AppError> {
        let user_rating = UserRating::new(rating).ok_or(AppError::InvalidRating(rating))?;
        let id = self.selection.selected_id().ok_or(AppError::NothingSelected)?;

        if let Some(existing) = self.watched.user_rating_for(id) {
            return Err(AppError::AlreadyWatched { id: id.to_string(), user_rating: existing });
        }

        let detail = self
            .selection
            .detail()
            .success()
            .ok_or_else(|| AppError::DetailNotReady(id.to_string()))?;

        let entry = WatchedEntry::from_detail(id, detail, user_rating);
        info!(id = %entry.id, title = %entry.title, rating, "Marked as watched");
        self.watched.add(entry.clone());
        self.selection.close();
        Ok(entry)
    }

    pub fn remove(&mut self, id: &str) -> Option<WatchedEntry> {
        self.watched.remove(id)
    }

    // Completion plumbing

    /// Route a finished request to its owner. Returns whether state changed.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Search(c) => self.search.apply(c),
            Completion::Detail(c) => self.selection.apply(c),
        }
    }

    /// Wait for the next finished request without applying it.
    pub async fn recv_completion(&mut self) -> Option<Completion> {
        self.completions.recv().await
    }

    /// Wait for one finished request and apply it.
    pub async fn next_completion(&mut self) -> Option<bool> {
        let completion = self.completions.recv().await?;
        Some(self.apply(completion))
    }

    /// Apply every completion that has already arrived. Returns how many were processed.
    pub fn drain_ready(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.apply(completion);
            processed += 1;
        }
        processed
    }

    pub fn has_pending(&self) -> bool {
        self.search.in_flight() || self.selection.in_flight()
    }

    /// Apply completions until neither stream has a live request.
    pub async fn settle(&mut self) {
        while self.has_pending() {
            if self.next_completion().await.is_none() {
                debug!("Completion channel closed while requests were pending");
                break;
            }
        }
    }

    // Derived views

    pub fn summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    /// `"Movie | <title>"` while a detail is loaded, the app name otherwise.
    pub fn window_title(&self) -> String {
        match self.selection.detail().success() {
            Some(detail) if !detail.title.is_empty() => format!("Movie | {}", detail.title),
            _ => DEFAULT_WINDOW_TITLE.to_string(),
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let selected_id = self.selection.selected_id().map(str::to_string);
        let selected_user_rating = selected_id.as_deref().and_then(|id| self.watched.user_rating_for(id));

        AppSnapshot {
            query: self.search.query().to_string(),
            search: self.search.state().clone(),
            result_count: self.search.results().len(),
            total_results: self.search.total_results(),
            selected_id,
            detail: self.selection.detail().clone(),
            selected_user_rating,
            watched: self.watched.entries().to_vec(),
            summary: self.summary(),
            window_title: self.window_title(),
        }
    }
}

#[cfg(test)]
mod tests;
