use rateit_models::WatchedEntry;
use serde::Serialize;

/// Arithmetic mean of `values`. An empty slice averages to `0.0` so display
/// code never has to special-case an empty watched list.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Aggregates shown above the watched list. Each average only counts entries
/// that carry the field (the catalog reports "N/A" for some titles).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        let imdb: Vec<f64> = entries.iter().filter_map(|e| e.imdb_rating).collect();
        let user: Vec<f64> = entries.iter().map(|e| f64::from(e.user_rating)).collect();
        let runtime: Vec<f64> = entries
            .iter()
            .filter_map(|e| e.runtime_minutes.map(f64::from))
            .collect();

        Self {
            count: entries.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            avg_runtime_minutes: average(&runtime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::watched_entry;

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[5.0]), 5.0);
        assert_eq!(average(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(average(&[7.3]), 7.3);
    }

    #[test]
    fn test_summary_of_empty_list() {
        let summary = WatchedSummary::from_entries(&[]);
        assert_eq!(summary, WatchedSummary::default());
    }

    #[test]
    fn test_summary_skips_missing_fields() {
        let mut unknown = watched_entry("tt2", 6.0, 7, 100);
        unknown.imdb_rating = None;
        unknown.runtime_minutes = None;
        let entries = vec![watched_entry("tt1", 8.0, 9, 120), unknown];

        let summary = WatchedSummary::from_entries(&entries);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_imdb_rating, 8.0);
        assert_eq!(summary.avg_user_rating, 8.0);
        assert_eq!(summary.avg_runtime_minutes, 120.0);
    }
}
