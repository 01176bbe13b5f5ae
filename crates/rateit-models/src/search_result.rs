use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String, // Catalog (IMDb) id, e.g. "tt0120338"
    pub title: String,
    pub year: String, // Kept as text: series report ranges like "2008–2013"
    pub poster_url: String,
}

/// One answer from a title search.
///
/// `found == false` is the catalog saying "nothing matched", which is a
/// domain outcome and not a transport failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub found: bool,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>, // Catalog-supplied reason when found is false
}

impl SearchPage {
    pub fn found(results: Vec<SearchResult>) -> Self {
        let total_results = u32::try_from(results.len()).ok();
        Self {
            found: true,
            results,
            total_results,
            message: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            found: false,
            results: Vec::new(),
            total_results: None,
            message: Some(message.into()),
        }
    }
}
