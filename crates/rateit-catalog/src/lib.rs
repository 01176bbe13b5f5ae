pub mod cancel;
pub mod error;
pub mod omdb;
pub mod traits;

pub use cancel::CancelToken;
pub use error::CatalogError;
pub use omdb::OmdbClient;
pub use traits::CatalogClient;
