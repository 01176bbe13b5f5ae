use crate::aggregate::WatchedSummary;
use rateit_models::WatchedEntry;
use tracing::debug;

/// The user's watched list, in insertion order.
///
/// `add` does not check for duplicates; callers that care go through
/// [`crate::App::add_selected`], which refuses ids already present.
#[derive(Debug, Default, Clone)]
pub struct WatchedStore {
    entries: Vec<WatchedEntry>,
}

impl WatchedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: WatchedEntry) {
        debug!(id = %entry.id, user_rating = entry.user_rating, "Adding watched entry");
        self.entries.push(entry);
    }

    /// Remove the first entry with `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<WatchedEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        debug!(id = %id, "Removing watched entry");
        Some(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn user_rating_for(&self, id: &str) -> Option<u8> {
        self.get(id).map(|e| e.user_rating)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recomputed from the current entries on every call.
    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(&self.entries)
    }
}
