use async_trait::async_trait;
use rateit_models::{MovieDetail, SearchPage};
use crate::cancel::CancelToken;
use crate::error::CatalogError;

/// Read access to a movie catalog.
///
/// Implementations must observe `cancel`: once it is cancelled a pending call
/// resolves with [`CatalogError::Cancelled`] rather than a generic failure.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    fn catalog_name(&self) -> &str;

    async fn search_by_title(&self, query: &str, cancel: &CancelToken) -> Result<SearchPage, CatalogError>;

    async fn fetch_detail_by_id(&self, id: &str, cancel: &CancelToken) -> Result<MovieDetail, CatalogError>;
}
