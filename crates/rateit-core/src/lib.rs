pub mod aggregate;
pub mod app;
pub mod error;
pub mod events;
pub mod search;
pub mod selection;
pub mod tracker;
pub mod watched;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{average, WatchedSummary};
pub use app::{App, AppSnapshot, DEFAULT_WINDOW_TITLE};
pub use error::AppError;
pub use events::{Completion, DetailCompletion, SearchCompletion, SearchEvent, UiSignal};
pub use search::{SearchCoordinator, NOT_FOUND_MESSAGE};
pub use selection::SelectionController;
pub use tracker::RequestTracker;
pub use watched::WatchedStore;
