use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie_detail::MovieDetail;
use crate::user_rating::UserRating;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub id: String, // Catalog id, the key used for removal
    pub title: String,
    pub year: String,
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    pub user_rating: u8, // 1-10
    pub added_at: DateTime<Utc>,
}

impl WatchedEntry {
    /// Keyed on the id the movie was selected by, not the id echoed back in
    /// the detail payload (which may differ in case or be missing).
    pub fn from_detail(id: impl Into<String>, detail: &MovieDetail, user_rating: UserRating) -> Self {
        Self {
            id: id.into(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            imdb_rating: detail.imdb_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating: user_rating.value(),
            added_at: Utc::now(),
        }
    }
}
