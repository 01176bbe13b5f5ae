pub mod movie_detail;
pub mod request_state;
pub mod search_result;
pub mod user_rating;
pub mod watched;

pub use movie_detail::{parse_imdb_rating, parse_runtime_minutes, MovieDetail};
pub use request_state::{FailureKind, RequestFailure, RequestState};
pub use search_result::{SearchPage, SearchResult};
pub use user_rating::UserRating;
pub use watched::WatchedEntry;
