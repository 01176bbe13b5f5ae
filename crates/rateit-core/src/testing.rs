// Scripted catalog and fixtures shared by the unit tests

use async_trait::async_trait;
use rateit_catalog::{CancelToken, CatalogClient, CatalogError};
use rateit_models::{MovieDetail, SearchPage, SearchResult, UserRating, WatchedEntry};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type Pending<T> = Mutex<Vec<(String, oneshot::Sender<Result<T, CatalogError>>)>>;

/// In-memory catalog whose calls stay pending until the test resolves them,
/// so completion order is under test control.
pub(crate) struct ScriptedCatalog {
    honor_cancel: bool,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
    pending_search: Pending<SearchPage>,
    pending_detail: Pending<MovieDetail>,
}

impl ScriptedCatalog {
    fn build(honor_cancel: bool) -> Arc<Self> {
        Arc::new(Self {
            honor_cancel,
            search_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
            pending_search: Mutex::new(Vec::new()),
            pending_detail: Mutex::new(Vec::new()),
        })
    }

    /// Pending calls resolve as `Cancelled` as soon as their token is cancelled.
    pub(crate) fn new() -> Arc<Self> {
        Self::build(true)
    }

    /// A transport that cannot abort: superseded calls still deliver their payload.
    pub(crate) fn ignoring_cancel() -> Arc<Self> {
        Self::build(false)
    }

    pub(crate) fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    /// Resolve the oldest pending search for `query`. `false` if none is waiting.
    pub(crate) fn resolve_search(&self, query: &str, outcome: Result<SearchPage, CatalogError>) -> bool {
        resolve(&self.pending_search, query, outcome)
    }

    pub(crate) fn resolve_detail(&self, id: &str, outcome: Result<MovieDetail, CatalogError>) -> bool {
        resolve(&self.pending_detail, id, outcome)
    }

    async fn wait<T>(&self, pending: &Pending<T>, key: &str, cancel: &CancelToken) -> Result<T, CatalogError> {
        let (tx, rx) = oneshot::channel();
        pending.lock().unwrap().push((key.to_string(), tx));

        if self.honor_cancel {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(CatalogError::Cancelled),
                outcome = rx => outcome.unwrap_or(Err(CatalogError::Cancelled)),
            }
        } else {
            rx.await.unwrap_or(Err(CatalogError::Cancelled))
        }
    }
}

fn resolve<T>(pending: &Pending<T>, key: &str, outcome: Result<T, CatalogError>) -> bool {
    let sender = {
        let mut pending = pending.lock().unwrap();
        match pending.iter().position(|(k, _)| k == key) {
            Some(index) => pending.remove(index).1,
            None => return false,
        }
    };
    sender.send(outcome).is_ok()
}

#[async_trait]
impl CatalogClient for ScriptedCatalog {
    fn catalog_name(&self) -> &str {
        "scripted"
    }

    async fn search_by_title(&self, query: &str, cancel: &CancelToken) -> Result<SearchPage, CatalogError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        self.wait(&self.pending_search, query, cancel).await
    }

    async fn fetch_detail_by_id(&self, id: &str, cancel: &CancelToken) -> Result<MovieDetail, CatalogError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        self.wait(&self.pending_detail, id, cancel).await
    }
}

/// Give spawned request tasks a chance to run up to their first pending await.
pub(crate) async fn settle_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub(crate) fn page(items: &[(&str, &str)]) -> SearchPage {
    SearchPage::found(
        items
            .iter()
            .map(|(id, title)| SearchResult {
                id: id.to_string(),
                title: title.to_string(),
                year: "1997".to_string(),
                poster_url: format!("https://img.example/{}.jpg", id),
            })
            .collect(),
    )
}

pub(crate) fn detail(id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "1997".to_string(),
        poster_url: format!("https://img.example/{}.jpg", id),
        runtime_minutes: Some(120),
        imdb_rating: Some(8.0),
        plot: "A plot.".to_string(),
        released: "19 Dec 1997".to_string(),
        actors: "Someone, Someone Else".to_string(),
        director: "A Director".to_string(),
        genre: "Drama".to_string(),
    }
}

pub(crate) fn watched_entry(id: &str, imdb_rating: f64, user_rating: u8, runtime_minutes: u32) -> WatchedEntry {
    let mut movie = detail(id, id);
    movie.imdb_rating = Some(imdb_rating);
    movie.runtime_minutes = Some(runtime_minutes);
    WatchedEntry::from_detail(id, &movie, UserRating::new(user_rating).expect("fixture rating in range"))
}
