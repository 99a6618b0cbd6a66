//! Persisted list of previously committed queries.
//!
//! Entries are trimmed, unique and most-recent-first, capped at `limit`.
//! Persistence is best-effort: read and write failures are logged and the
//! in-memory list keeps working.

use crate::storage::KeyValueStore;
use tracing::{debug, warn};

/// Key under which the history is stored
pub const HISTORY_KEY: &str = "search-history";

/// Default number of entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub struct HistoryStore {
    entries: Vec<String>,
    limit: usize,
    storage: Box<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Load history from storage. Missing or corrupt data yields an empty list.
    #[must_use]
    pub fn load(storage: Box<dyn KeyValueStore>, limit: usize) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(entries) => normalize(entries, limit),
                Err(e) => {
                    warn!("Discarding unreadable search history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read search history: {}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} history entries", entries.len());
        Self {
            entries,
            limit,
            storage,
        }
    }

    /// Most-recent-first entries
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `query` to the front, dropping the oldest entry past the limit.
    /// Blank input is ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);
        self.persist();
    }

    /// Forget a single entry
    pub fn remove(&mut self, query: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != query.trim());
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Forget everything, including the persisted key
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.storage.delete(HISTORY_KEY) {
            warn!("Failed to delete search history: {}", e);
        }
    }

    fn persist(&mut self) {
        let value = match serde_json::to_string(&self.entries) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize search history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(HISTORY_KEY, &value) {
            warn!("Failed to save search history: {}", e);
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// Re-apply the list invariants to data read from storage
fn normalize(entries: Vec<String>, limit: usize) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(entries.len().min(limit));
    for entry in entries {
        if normalized.len() >= limit {
            break;
        }
        let entry = entry.trim();
        if entry.is_empty() || normalized.iter().any(|e| e == entry) {
            continue;
        }
        normalized.push(entry.to_string());
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_blank_and_duplicates() {
        let raw = vec![
            " jwt ".to_string(),
            String::new(),
            "uuid".to_string(),
            "jwt".to_string(),
            "   ".to_string(),
            "base64".to_string(),
        ];
        assert_eq!(normalize(raw, 10), vec!["jwt", "uuid", "base64"]);
    }

    #[test]
    fn test_normalize_truncates() {
        let raw: Vec<String> = (0..15).map(|i| format!("q{i}")).collect();
        let normalized = normalize(raw, 10);
        assert_eq!(normalized.len(), 10);
        assert_eq!(normalized[0], "q0");
        assert_eq!(normalized[9], "q9");
    }

    #[test]
    fn test_normalize_zero_limit() {
        assert!(normalize(vec!["a".to_string()], 0).is_empty());
    }
}
