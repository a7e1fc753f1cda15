//! UUID recognition in free-text search input.
//!
//! When the input carries one or more 8-4-4-4-12 hex-grouped identifiers, the
//! query skips template substitution entirely and filters on the `HasUuid`
//! property instead. Group boundaries tolerate `-`, `_`, a space, or no
//! separator at all, in any mixture; matches are canonicalized to the
//! lowercase dash-separated form.

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// The property an identifier filter matches against.
const UUID_PROPERTY: &str = "HasUuid";

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([0-9a-f]{8})[-_ ]?([0-9a-f]{4})[-_ ]?([0-9a-f]{4})[-_ ]?([0-9a-f]{4})[-_ ]?([0-9a-f]{12})",
    )
    .expect("uuid pattern is valid")
});

/// The two ways a search input can be turned into a query.
///
/// Resolved once per call; identifier matches take absolute precedence over
/// template-based construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryKind {
    /// One or more identifiers in canonical form.
    Identifier(Vec<String>),
    /// No identifier found; the template drives the query.
    Template,
}

/// Classify a search input.
pub(crate) fn classify(input: &str) -> QueryKind {
    let ids = detect_identifiers(input);
    if ids.is_empty() {
        QueryKind::Template
    } else {
        QueryKind::Identifier(ids)
    }
}

/// Find every identifier in the input, canonicalized to lowercase dashed form.
pub(crate) fn detect_identifiers(input: &str) -> Vec<String> {
    UUID_PATTERN
        .captures_iter(input)
        .filter_map(|caps| {
            let compact: String = (1..=5).map(|i| &caps[i]).collect();
            Uuid::try_parse(&compact)
                .ok()
                .map(|id| id.hyphenated().to_string())
        })
        .collect()
}

/// Build the filter disjunction for a set of canonical identifiers:
/// `[[HasUuid::a]]OR[[HasUuid::b]]…`.
pub(crate) fn filter_disjunction(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("[[{UUID_PROPERTY}::{id}]]"))
        .collect::<Vec<_>>()
        .join("OR")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    const CANONICAL: &str = "123e4567-e89b-42d3-a456-426614174000";

    #[rstest]
    #[case("123e4567-e89b-42d3-a456-426614174000")]
    #[case("123e4567_e89b_42d3_a456_426614174000")]
    #[case("123e4567 e89b 42d3 a456 426614174000")]
    #[case("123e4567e89b42d3a456426614174000")]
    #[case("123e4567-e89b_42d3 a456426614174000")]
    fn test_separator_mixtures_canonicalize(#[case] input: &str) {
        check!(detect_identifiers(input) == vec![CANONICAL.to_string()]);
    }

    #[test]
    fn test_uppercase_hex_lowercased() {
        let ids = detect_identifiers("123E4567-E89B-42D3-A456-426614174000");
        check!(ids == vec![CANONICAL.to_string()]);
    }

    #[test]
    fn test_identifier_inside_surrounding_text() {
        let ids = detect_identifiers(&format!("find page {CANONICAL} please"));
        check!(ids == vec![CANONICAL.to_string()]);
    }

    #[test]
    fn test_multiple_identifiers() {
        let ids = detect_identifiers(
            "123e4567-e89b-42d3-a456-426614174000 and deadbeef-dead-beef-dead-beefdeadbeef",
        );
        check!(ids.len() == 2);
        check!(ids[1] == "deadbeef-dead-beef-dead-beefdeadbeef");
    }

    #[rstest]
    #[case("")]
    #[case("plain search words")]
    #[case("123e4567-e89b")] // too short
    #[case("123g4567-e89b-42d3-a456-426614174000")] // 'g' is not hex
    fn test_no_identifier(#[case] input: &str) {
        check!(classify(input) == QueryKind::Template);
    }

    #[test]
    fn test_filter_disjunction_single() {
        let ids = vec![CANONICAL.to_string()];
        check!(filter_disjunction(&ids) == format!("[[HasUuid::{CANONICAL}]]"));
    }

    #[test]
    fn test_filter_disjunction_joins_with_or() {
        let ids = vec!["a".to_string(), "b".to_string()];
        check!(filter_disjunction(&ids) == "[[HasUuid::a]]OR[[HasUuid::b]]");
    }
}
