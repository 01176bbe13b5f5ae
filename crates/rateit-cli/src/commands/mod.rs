pub mod config;
pub mod interactive;
pub mod progress;
pub mod prompts;
pub mod search;
pub mod show;

use rateit_catalog::{CatalogClient, OmdbClient};
use rateit_config::Config;
use rateit_core::App;
use std::sync::Arc;

/// Wire the OMDb client into a fresh session.
pub fn build_app(config: &Config) -> App {
    let client = OmdbClient::new(&config.catalog);
    tracing::debug!(catalog = client.catalog_name(), base_url = client.base_url(), "Catalog client ready");
    let catalog: Arc<dyn CatalogClient> = Arc::new(client);
    App::new(catalog, &config.search)
}
