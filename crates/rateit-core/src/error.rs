use thiserror::Error;

/// Rejected orchestrator commands. Catalog failures never surface here; they
/// become `RequestState::Failure` on the stream that issued them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("no movie is selected")]
    NothingSelected,

    #[error("details for {0} are not loaded yet")]
    DetailNotReady(String),

    #[error("{id} is already in the watched list (rated {user_rating})")]
    AlreadyWatched { id: String, user_rating: u8 },

    #[error("rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),
}
