//! Maps the store's raw response to ranked, display-ready results.

use serde::Serialize;

use crate::config::SearchConfig;

use super::ranking;
use super::raw::{RawResultItem, RawResultSet, TextEntry};

/// A display-ready search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Position in the final ranked list.
    pub id: usize,
    /// Stable key: the item's full page identifier.
    pub key: String,
    /// Resolved display title.
    pub title: String,
    /// Resolved description; empty when the store provides none.
    pub desc: String,
    /// Redirect-style thumbnail URL; absent when the item has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Map a raw result set to a ranked list of display records.
///
/// Candidates are ranked over the full (oversampled) set and truncated to the
/// configured maximum only afterwards, so the cut always falls on the
/// weakest-ranked items. Never returns more than `config.max_results`
/// records. Infallible: every missing field takes a defined fallback.
pub fn map_results(
    raw: &RawResultSet,
    search_query: &str,
    user_language: &str,
    config: &SearchConfig,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = raw
        .iter()
        .map(|(_, item)| SearchResult {
            id: 0,
            key: item.fulltext.clone(),
            title: resolve_title(item, user_language),
            desc: resolve_description(item, user_language),
            thumbnail: thumbnail_url(item, config),
        })
        .collect();

    ranking::rank_by_title_proximity(&mut results, search_query);
    results.truncate(config.max_results);
    for (position, result) in results.iter_mut().enumerate() {
        result.id = position;
    }

    tracing::trace!(
        raw = raw.len(),
        mapped = results.len(),
        "mapped and ranked result set"
    );
    results
}

/// Title fallback chain: localized record (user language, English, first),
/// then a plain printout entry, then the page's own display title, then the
/// full identifier. The identifier is always present, so this never fails.
fn resolve_title(item: &RawResultItem, user_language: &str) -> String {
    if let Some(text) = resolve_localized(&item.printouts.displaytitle, user_language) {
        return text.to_string();
    }
    if let Some(TextEntry::Plain(text)) = item.printouts.displaytitle.first() {
        if !text.is_empty() {
            return text.clone();
        }
    }
    if let Some(title) = &item.displaytitle {
        if !title.is_empty() {
            return title.clone();
        }
    }
    item.fulltext.clone()
}

/// Description fallback chain: localized record, then a plain printout
/// entry, then empty. Descriptions have no page-level scalar variant.
fn resolve_description(item: &RawResultItem, user_language: &str) -> String {
    if let Some(text) = resolve_localized(&item.printouts.desc, user_language) {
        return text.to_string();
    }
    if let Some(TextEntry::Plain(text)) = item.printouts.desc.first() {
        return text.clone();
    }
    String::new()
}

/// Redirect URL for the first thumbnail file, at the fixed 200x200 hint.
fn thumbnail_url(item: &RawResultItem, config: &SearchConfig) -> Option<String> {
    item.printouts.thumbnail.first().map(|file| {
        format!(
            "{}/index.php?title=Special:Redirect/file/{}&width=200&height=200",
            config.script_path, file.fulltext
        )
    })
}

/// Three-tier localized lookup shared by titles and descriptions: the user's
/// language, then English, then the first entry in the structure's given
/// order. A later duplicate of a language wins; entries with empty text are
/// skipped by the two language tiers.
fn resolve_localized<'a>(entries: &'a [TextEntry], user_language: &str) -> Option<&'a str> {
    let mut user_text = None;
    let mut english = None;
    let mut first = None;
    for entry in entries {
        let TextEntry::Localized(localized) = entry else {
            continue;
        };
        let Some(text) = localized.text() else {
            continue;
        };
        if first.is_none() {
            first = Some(text);
        }
        if text.is_empty() {
            continue;
        }
        match localized.language_code() {
            Some(lang) if lang == user_language => user_text = Some(text),
            Some("en") => english = Some(text),
            _ => {}
        }
    }
    user_text.or(english).or(first)
}
