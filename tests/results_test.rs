use ask_gateway::{ApiResponse, QueryMode, SearchConfig, map_results};
use assert2::check;
use rstest::rstest;

fn config(max_results: usize) -> SearchConfig {
    SearchConfig::new(
        "/w",
        max_results,
        "[[HasLabel::~*${input}*]]|?HasDescription=desc",
        QueryMode::Filter,
    )
    .unwrap()
}

fn parse(json: &str) -> ApiResponse {
    serde_json::from_str(json).expect("fixture parses")
}

fn localized(language: &str, text: &str) -> String {
    format!(r#"{{"Language code": {{"item": ["{language}"]}}, "Text": {{"item": ["{text}"]}}}}"#)
}

// --- Language resolution ---

/// Test: title resolution prefers the user language, then English, then the
/// first entry in the structure's order.
#[rstest]
#[case("fr", "Secours")]
#[case("de", "Fallback")]
#[case("en", "Fallback")]
fn title_resolution_language_preference(#[case] user_language: &str, #[case] expected: &str) {
    ask_gateway::tracing::init();
    let response = parse(&format!(
        r#"{{"query": {{"results": {{
            "Page": {{"fulltext": "Page", "printouts": {{"displaytitle": [{en}, {fr}]}}}}
        }}}}}}"#,
        en = localized("en", "Fallback"),
        fr = localized("fr", "Secours"),
    ));
    let results = map_results(&response.query.results, "query", user_language, &config(5));
    check!(results[0].title == expected);
}

/// Test: with neither the user language nor English present, the first entry
/// wins.
#[test]
fn title_resolution_first_entry_fallback() {
    let response = parse(&format!(
        r#"{{"query": {{"results": {{
            "Page": {{"fulltext": "Page", "printouts": {{"displaytitle": [{nl}, {fr}]}}}}
        }}}}}}"#,
        nl = localized("nl", "Eerste"),
        fr = localized("fr", "Secours"),
    ));
    let results = map_results(&response.query.results, "query", "de", &config(5));
    check!(results[0].title == "Eerste");
}

/// Test: an item lacking any title field resolves to its full identifier.
#[test]
fn titleless_item_falls_back_to_identifier() {
    let response = parse(
        r#"{"query": {"results": {
            "Some Page": {"fulltext": "Some Page", "displaytitle": "", "printouts": {}}
        }}}"#,
    );
    let results = map_results(&response.query.results, "query", "en", &config(5));
    check!(results[0].title == "Some Page");
    check!(results[0].key == "Some Page");
}

/// Test: descriptions use the same fallback chain and default to empty.
#[test]
fn description_resolution_and_default() {
    let response = parse(&format!(
        r#"{{"query": {{"results": {{
            "With": {{"fulltext": "With", "printouts": {{"desc": [{en}]}}}},
            "Without": {{"fulltext": "Hier", "printouts": {{}}}}
        }}}}}}"#,
        en = localized("en", "A ship class"),
    ));
    let results = map_results(&response.query.results, "four", "de", &config(5));
    let with = results.iter().find(|r| r.key == "With").unwrap();
    let without = results.iter().find(|r| r.key == "Hier").unwrap();
    check!(with.desc == "A ship class");
    check!(without.desc.is_empty());
}

// --- Thumbnails ---

/// Test: a thumbnail reference becomes a redirect URL with the fixed size
/// hint; a missing reference stays a distinguishable None.
#[test]
fn thumbnail_resolution() {
    let response = parse(
        r#"{"query": {"results": {
            "Pictured": {"fulltext": "Pictured", "printouts":
                {"thumbnail": [{"fulltext": "File:Ship.png"}]}},
            "Bare": {"fulltext": "NoPic", "printouts": {}}
        }}}"#,
    );
    let results = map_results(&response.query.results, "Pictured", "en", &config(5));
    let pictured = results.iter().find(|r| r.key == "Pictured").unwrap();
    let bare = results.iter().find(|r| r.key == "NoPic").unwrap();
    check!(
        pictured.thumbnail.as_deref()
            == Some("/w/index.php?title=Special:Redirect/file/File:Ship.png&width=200&height=200")
    );
    check!(bare.thumbnail.is_none());
}

// --- Ranking and truncation ---

/// Test: titles whose length is closest to the query length rank first.
#[test]
fn ranking_prefers_title_length_near_query_length() {
    let response = parse(
        r#"{"query": {"results": {
            "Long": {"fulltext": "A much longer page title"},
            "Exact": {"fulltext": "Ship"},
            "Close": {"fulltext": "Shipyard"}
        }}}"#,
    );
    let results = map_results(&response.query.results, "Ship", "en", &config(5));
    let keys: Vec<&str> = results.iter().map(|r| r.key.as_str()).collect();
    check!(keys == vec!["Ship", "Shipyard", "A much longer page title"]);
}

/// Test: equal-length titles keep the raw set's document order.
#[test]
fn ranking_is_stable_for_equal_lengths() {
    let response = parse(
        r#"{"query": {"results": {
            "Zulu": {"fulltext": "Zulu"},
            "Echo": {"fulltext": "Echo"},
            "Kilo": {"fulltext": "Kilo"}
        }}}"#,
    );
    let results = map_results(&response.query.results, "four", "en", &config(5));
    let keys: Vec<&str> = results.iter().map(|r| r.key.as_str()).collect();
    check!(keys == vec!["Zulu", "Echo", "Kilo"]);
}

/// Test: the emitted list never exceeds the configured maximum, even with a
/// four-times-oversampled raw set, and truncation happens after ranking.
#[test]
fn truncation_after_ranking_respects_maximum() {
    let items: Vec<String> = (0..8)
        .map(|i| {
            let title = "x".repeat(20 - i);
            format!(r#""P{i}": {{"fulltext": "{title}"}}"#)
        })
        .collect();
    let response = parse(&format!(
        r#"{{"query": {{"results": {{{}}}}}}}"#,
        items.join(", ")
    ));
    let results = map_results(&response.query.results, "short query", "en", &config(2));
    check!(results.len() == 2);
    // The best-ranked titles are the ones closest to the query length, which
    // arrive last in document order here.
    check!(results[0].title == "x".repeat(13));
    check!(results[1].title == "x".repeat(14));
}

/// Test: ordinals are assigned after ranking, in display order.
#[test]
fn ordinals_follow_ranked_order() {
    let response = parse(
        r#"{"query": {"results": {
            "Long": {"fulltext": "A very long page title"},
            "Short": {"fulltext": "Hit"}
        }}}"#,
    );
    let results = map_results(&response.query.results, "Hit", "en", &config(5));
    check!(results[0].id == 0);
    check!(results[0].key == "Hit");
    check!(results[1].id == 1);
}

/// Test: an empty result set (serialized as an array) maps to no results.
#[test]
fn empty_result_set_maps_to_nothing() {
    let response = parse(r#"{"query": {"results": []}}"#);
    let results = map_results(&response.query.results, "query", "en", &config(5));
    check!(results.is_empty());
}
