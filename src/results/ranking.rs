//! Relevance reordering of mapped results.
//!
//! The heuristic is a pure length signal kept for behavior compatibility with
//! the deployed store: ascending `title_length / query_length`. Store hits
//! are at least query-sized in practice, so the smallest ratio belongs to the
//! title closest to the query's length. No token-overlap or exact-match
//! tie-break is applied.

use super::mapper::SearchResult;

/// Stable-sort results by title-length proximity to the search query.
///
/// Ties (equal-length titles) keep the raw set's iteration order.
pub(crate) fn rank_by_title_proximity(results: &mut [SearchResult], search_query: &str) {
    // The divisor is constant across the call, so clamping an empty query to 1
    // changes no relative order.
    let query_length = search_query.chars().count().max(1);
    results.sort_by(|a, b| {
        length_ratio(&a.title, query_length).total_cmp(&length_ratio(&b.title, query_length))
    });
}

fn length_ratio(title: &str, query_length: usize) -> f64 {
    title.chars().count() as f64 / query_length as f64
}
