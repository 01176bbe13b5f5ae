use serde::{Deserialize, Serialize};

/// Full catalog record for one title, normalized from the raw API fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>, // None when the catalog reports "N/A"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

/// Parse a catalog runtime such as `"142 min"` into whole minutes.
pub fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

/// Parse a catalog rating such as `"8.1"`. Anything that is not a finite
/// number (`"N/A"`, empty) yields `None`.
pub fn parse_imdb_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_minutes() {
        assert_eq!(parse_runtime_minutes("142 min"), Some(142));
        assert_eq!(parse_runtime_minutes("90"), Some(90));
        assert_eq!(parse_runtime_minutes("N/A"), None);
        assert_eq!(parse_runtime_minutes(""), None);
    }

    #[test]
    fn test_parse_imdb_rating() {
        assert_eq!(parse_imdb_rating("8.1"), Some(8.1));
        assert_eq!(parse_imdb_rating(" 7 "), Some(7.0));
        assert_eq!(parse_imdb_rating("N/A"), None);
        assert_eq!(parse_imdb_rating("NaN"), None);
    }
}
