use crate::cancel::CancelToken;
use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::CatalogClient;
use async_trait::async_trait;
use rateit_config::CatalogConfig;
use rateit_models::{MovieDetail, SearchPage};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Catalog client for the OMDb HTTP API.
#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

pub fn create_omdb_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("rateit/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl OmdbClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            client: Arc::new(create_omdb_client(Duration::from_secs(config.timeout_secs))),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Race `request` against `cancel`. Losing the race drops the request future,
/// which aborts the underlying HTTP exchange.
async fn until_cancelled<T, F>(cancel: &CancelToken, request: F) -> Result<T, CatalogError>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    if cancel.is_cancelled() {
        return Err(CatalogError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CatalogError::Cancelled),
        result = request => result,
    }
}

#[async_trait]
impl CatalogClient for OmdbClient {
    fn catalog_name(&self) -> &str {
        "omdb"
    }

    async fn search_by_title(&self, query: &str, cancel: &CancelToken) -> Result<SearchPage, CatalogError> {
        debug!("OMDb search: '{}'", query);
        until_cancelled(cancel, api::search_by_title(&self.client, &self.base_url, &self.api_key, query)).await
    }

    async fn fetch_detail_by_id(&self, id: &str, cancel: &CancelToken) -> Result<MovieDetail, CatalogError> {
        debug!("OMDb detail: '{}'", id);
        until_cancelled(cancel, api::fetch_detail(&self.client, &self.base_url, &self.api_key, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let client = OmdbClient::new(&CatalogConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            api_key: "test".to_string(),
            timeout_secs: 1,
        });
        let token = CancelToken::new();
        token.cancel();

        let err = client.search_by_title("Titanic", &token).await.unwrap_err();
        assert!(err.is_cancelled());

        let err = client.fetch_detail_by_id("tt0120338", &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_pending_request_resolves_cancelled() {
        let token = CancelToken::new();
        let canceller = token.clone();
        let pending = std::future::pending::<Result<(), CatalogError>>();

        let handle = tokio::spawn(async move { until_cancelled(&token, pending).await });
        tokio::task::yield_now().await;
        canceller.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(CatalogError::Cancelled)));
    }
}
