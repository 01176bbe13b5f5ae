pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CatalogConfig, Config, SearchConfig, API_KEY_ENV, DEFAULT_BASE_URL, PLACEHOLDER_API_KEY};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
