use rateit_catalog::CatalogError;
use rateit_models::{MovieDetail, SearchPage};
use tokio::sync::mpsc;

/// Broadcast by the search coordinator; the selection controller listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A new network search was issued, which invalidates the open detail view
    Started { query: String, generation: u64 },
}

/// Keyboard or navigation input forwarded from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    Escape,
    Back,
}

#[derive(Debug)]
pub struct SearchCompletion {
    pub generation: u64,
    pub query: String,
    pub outcome: Result<SearchPage, CatalogError>,
}

#[derive(Debug)]
pub struct DetailCompletion {
    pub generation: u64,
    pub id: String,
    pub outcome: Result<MovieDetail, CatalogError>,
}

/// A finished catalog call, delivered back to the task that owns app state.
#[derive(Debug)]
pub enum Completion {
    Search(SearchCompletion),
    Detail(DetailCompletion),
}

pub type CompletionSender = mpsc::UnboundedSender<Completion>;
pub type CompletionReceiver = mpsc::UnboundedReceiver<Completion>;
