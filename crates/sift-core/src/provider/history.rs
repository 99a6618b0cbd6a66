//! History provider: past queries as `history` rows.

use crate::history::HistoryStore;
use crate::search::QueryMatcher;
use sift_types::SearchResult;

/// Every entry, most recent first
#[must_use]
pub fn all(history: &HistoryStore) -> Vec<SearchResult> {
    history.entries().iter().map(|q| to_result(q)).collect()
}

/// Entries containing the query
pub fn search(history: &HistoryStore, matcher: &mut QueryMatcher) -> Vec<SearchResult> {
    history
        .entries()
        .iter()
        .filter(|q| matcher.is_match(q))
        .map(|q| to_result(q))
        .collect()
}

fn to_result(query: &str) -> SearchResult {
    SearchResult::History {
        query: query.to_string(),
    }
}
