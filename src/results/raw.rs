//! Serde wire types for the store's response envelope.
//!
//! The ask endpoint answers with `{"query": {"results": {…}}}` where
//! `results` maps page keys to items. Document order of that map is
//! meaningful downstream (it is the ranking tie-break), so deserialization
//! goes through an order-preserving visitor instead of a hash map. Deeper
//! payload validation is the fetch layer's concern.

use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Parsed response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub query: QuerySection,
}

/// The `query` section of the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySection {
    /// Result items in the store's document order.
    #[serde(default, deserialize_with = "ordered_results")]
    pub results: RawResultSet,
}

/// Mapping from page key to result item, in document order.
pub type RawResultSet = Vec<(String, RawResultItem)>;

/// One raw result item as returned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResultItem {
    /// Full page identifier. Always present; the unconditional last-resort
    /// display title.
    pub fulltext: String,

    /// Non-localized display title, when the page defines one.
    #[serde(default)]
    pub displaytitle: Option<String>,

    #[serde(default)]
    pub printouts: Printouts,
}

/// The requested printout values of a result item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Printouts {
    /// Per-language display titles, possibly plain strings.
    #[serde(default)]
    pub displaytitle: Vec<TextEntry>,

    /// Per-language descriptions.
    #[serde(default)]
    pub desc: Vec<TextEntry>,

    /// Thumbnail file pages; only the first is used.
    #[serde(default)]
    pub thumbnail: Vec<PageRef>,
}

/// A printout text value: either a localized record or a plain string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextEntry {
    /// A `{"Language code": …, "Text": …}` record.
    Localized(LocalizedText),
    /// A bare string printout.
    Plain(String),
}

/// A localized text record. Both fields arrive as single-item value lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedText {
    #[serde(rename = "Language code", default)]
    language: ValueList,
    #[serde(rename = "Text", default)]
    text: ValueList,
}

impl LocalizedText {
    /// Construct a record from a language tag and text (test fixtures).
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: ValueList {
                item: vec![language.into()],
            },
            text: ValueList {
                item: vec![text.into()],
            },
        }
    }

    /// The record's language tag, if any.
    pub fn language_code(&self) -> Option<&str> {
        self.language.first()
    }

    /// The record's text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.first()
    }
}

/// A reference to another page, e.g. a thumbnail file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRef {
    /// Full title of the referenced page.
    pub fulltext: String,
}

/// SMW's record values wrap their payload in an `item` array.
#[derive(Debug, Clone, Default, Deserialize)]
struct ValueList {
    #[serde(default)]
    item: Vec<String>,
}

impl ValueList {
    fn first(&self) -> Option<&str> {
        self.item.first().map(String::as_str)
    }
}

/// Deserialize the results object into key/item pairs, keeping document
/// order. An empty result set arrives as `[]` rather than `{}` (PHP
/// serialization), so a sequence is accepted and drained as empty.
fn ordered_results<'de, D>(deserializer: D) -> Result<RawResultSet, D::Error>
where
    D: Deserializer<'de>,
{
    struct ResultsVisitor;

    impl<'de> Visitor<'de> for ResultsVisitor {
        type Value = RawResultSet;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of page keys to result items, or an empty array")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut results = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, RawResultItem>()? {
                results.push(entry);
            }
            Ok(results)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(ResultsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_results_keep_document_order() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"query": {"results": {
                "Zulu": {"fulltext": "Zulu"},
                "Alpha": {"fulltext": "Alpha"},
                "Mike": {"fulltext": "Mike"}
            }}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = response
            .query
            .results
            .iter()
            .map(|(key, _)| key.as_str())
            .collect();
        check!(keys == vec!["Zulu", "Alpha", "Mike"]);
    }

    #[test]
    fn test_empty_results_as_array() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"query": {"results": []}}"#).unwrap();
        check!(response.query.results.is_empty());
    }

    #[test]
    fn test_localized_record_shape() {
        let entry: TextEntry = serde_json::from_str(
            r#"{"Language code": {"item": ["fr"]}, "Text": {"item": ["Secours"]}}"#,
        )
        .unwrap();
        let TextEntry::Localized(localized) = entry else {
            panic!("expected a localized record");
        };
        check!(localized.language_code() == Some("fr"));
        check!(localized.text() == Some("Secours"));
    }

    #[test]
    fn test_plain_string_entry() {
        let entry: TextEntry = serde_json::from_str(r#""Plain title""#).unwrap();
        check!(matches!(entry, TextEntry::Plain(text) if text == "Plain title"));
    }

    #[test]
    fn test_missing_printouts_default() {
        let item: RawResultItem =
            serde_json::from_str(r#"{"fulltext": "Some Page"}"#).unwrap();
        check!(item.printouts.displaytitle.is_empty());
        check!(item.printouts.desc.is_empty());
        check!(item.printouts.thumbnail.is_empty());
    }
}
