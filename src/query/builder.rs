//! Query construction: turns a raw search input and a configuration into an
//! ask query string and a fetchable endpoint URL.
//!
//! Construction is infallible: malformed or empty input degrades to a
//! syntactically valid (possibly empty-result) query rather than an error.

use crate::config::{QueryMode, SearchConfig};
use url::form_urlencoded;

use super::identifier::{self, QueryKind};
use super::template;

/// Build the fully-formed endpoint URL for a search input.
///
/// The emitted URL is `<script_path>/api.php?format=json&action=<mode>&query=…`
/// with the assembled query percent-encoded. Parameters are emitted in one
/// deterministic pass.
pub fn build_url(input: &str, config: &SearchConfig) -> String {
    let query = build_query(input, config);
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("format", "json")
        .append_pair("action", config.query_mode.action())
        .append_pair("query", &query)
        .finish();
    format!("{}/api.php?{}", config.script_path, params)
}

/// Build the assembled ask query string alone.
pub fn build_query(input: &str, config: &SearchConfig) -> String {
    let mut subqueries = template::parse_subqueries(&config.query_template, config.query_mode);

    match identifier::classify(input) {
        QueryKind::Identifier(ids) => {
            tracing::debug!(count = ids.len(), "identifier match takes precedence");
            // The disjunction replaces the filter portion of the first
            // subquery only; later subqueries keep their template filters.
            if let Some(first) = subqueries.first_mut() {
                first.replace_filter(identifier::filter_disjunction(&ids));
                if config.query_mode == QueryMode::Compound {
                    first.strip_limit();
                }
            }
        }
        QueryKind::Template => {
            let (namespace, effective_input) = split_namespace(input);
            if let Some(namespace) = namespace {
                let clause = format!("[[{namespace}:+]]");
                match config.query_mode {
                    QueryMode::Compound => {
                        for subquery in subqueries.iter_mut().filter(|sq| sq.has_filter()) {
                            subquery.prepend_filter(&clause);
                        }
                    }
                    QueryMode::Filter => {
                        if let Some(first) = subqueries.first_mut() {
                            first.prepend_filter(&clause);
                        }
                    }
                }
            }
            for subquery in &mut subqueries {
                subquery.substitute(effective_input);
                subquery.expand_tokenized(effective_input);
            }
        }
    }

    // Every filterable unit carries an explicit limit so ranking has an
    // oversampled candidate pool to truncate from.
    let limit = config.store_limit();
    for subquery in &mut subqueries {
        if subquery.has_filter() && !subquery.has_limit() {
            subquery.push_param(format!("limit={limit}"));
        }
    }

    let query = template::serialize_subqueries(&subqueries);
    tracing::debug!(%query, "assembled ask query");
    query
}

/// Split a namespace-qualified input on its first colon.
///
/// The literal namespace `Category` is escaped with a leading colon so it is
/// treated as a value rather than triggering built-in category semantics.
fn split_namespace(input: &str) -> (Option<String>, &str) {
    match input.split_once(':') {
        Some((namespace, rest)) => {
            let namespace = if namespace == "Category" {
                format!(":{namespace}")
            } else {
                namespace.to_string()
            };
            (Some(namespace), rest)
        }
        None => (None, input),
    }
}
