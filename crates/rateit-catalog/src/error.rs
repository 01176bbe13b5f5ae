use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request's token was cancelled before it resolved. Expected, never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    /// The catalog answered but has no record for the lookup.
    #[error("{0}")]
    NotFound(String),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
