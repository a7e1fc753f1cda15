//! Structural model of the ask query template.
//!
//! A template is parsed into [`Subquery`] units (one per `;`-separated part in
//! compound mode, the whole template in filter mode). Each unit keeps its
//! filter portion, the leading run of `[[…]]` clauses, separate from the
//! `|`-separated printout and parameter tail, so clause-level edits are
//! explicit transforms over parsed structure rather than raw-text pattern
//! replacement. Serialization back to query text happens once, at the end.

use crate::config::QueryMode;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) const INPUT: &str = "${input}";
pub(crate) const INPUT_LOWERCASE: &str = "${input_lowercase}";
pub(crate) const INPUT_NORMALIZED: &str = "${input_normalized}";
pub(crate) const INPUT_TOKENIZED: &str = "${input_normalized_tokenized}";

static CLAUSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\[.*?\]\]").expect("clause pattern is valid"));

/// One self-contained clause+printout unit of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Subquery {
    /// The filter portion: everything before the first top-level `|`.
    pub(crate) filter: String,
    /// Printout and parameter segments after the filter portion.
    pub(crate) tail: Vec<String>,
}

impl Subquery {
    /// Parse one subquery, splitting at the first `|` outside a filter clause.
    pub(crate) fn parse(text: &str) -> Self {
        match top_level_pipe(text) {
            Some(at) => Self {
                filter: text[..at].to_string(),
                tail: text[at + 1..].split('|').map(String::from).collect(),
            },
            None => Self {
                filter: text.to_string(),
                tail: Vec::new(),
            },
        }
    }

    /// Whether this unit restricts matches at all, making it a filterable query.
    pub(crate) fn has_filter(&self) -> bool {
        self.filter.contains("[[")
    }

    /// Whether the tail already carries an explicit result-count limit.
    pub(crate) fn has_limit(&self) -> bool {
        self.tail
            .iter()
            .any(|segment| segment.trim_start().starts_with("limit="))
    }

    /// Drop any explicit limit parameter from the tail.
    pub(crate) fn strip_limit(&mut self) {
        self.tail
            .retain(|segment| !segment.trim_start().starts_with("limit="));
    }

    /// Replace the whole filter portion.
    pub(crate) fn replace_filter(&mut self, filter: String) {
        self.filter = filter;
    }

    /// Insert a clause ahead of the existing filter portion.
    pub(crate) fn prepend_filter(&mut self, clause: &str) {
        self.filter.insert_str(0, clause);
    }

    /// Append a parameter segment to the tail.
    pub(crate) fn push_param(&mut self, param: String) {
        self.tail.push(param);
    }

    /// Substitute the simple placeholder tokens throughout this unit.
    ///
    /// The tokenized placeholder is left untouched here; it is expanded
    /// structurally by [`Subquery::expand_tokenized`].
    pub(crate) fn substitute(&mut self, effective_input: &str) {
        self.filter = substitute_text(&self.filter, effective_input);
        for segment in &mut self.tail {
            *segment = substitute_text(segment, effective_input);
        }
    }

    /// Expand every filter clause bearing the tokenized placeholder into one
    /// copy per whitespace-separated word of the input, each copy carrying
    /// that word's normalized form. Copies are adjacent, so a match must
    /// satisfy every word's clause independently of word order.
    pub(crate) fn expand_tokenized(&mut self, effective_input: &str) {
        if !self.filter.contains(INPUT_TOKENIZED) {
            return;
        }
        let words: Vec<String> = effective_input.split_whitespace().map(normalize).collect();

        let mut expanded = String::with_capacity(self.filter.len());
        let mut copied_to = 0;
        for clause in CLAUSE_PATTERN.find_iter(&self.filter) {
            expanded.push_str(&self.filter[copied_to..clause.start()]);
            if clause.as_str().contains(INPUT_TOKENIZED) {
                for word in &words {
                    expanded.push_str(&clause.as_str().replace(INPUT_TOKENIZED, word));
                }
            } else {
                expanded.push_str(clause.as_str());
            }
            copied_to = clause.end();
        }
        expanded.push_str(&self.filter[copied_to..]);
        self.filter = expanded;
    }

    /// Serialize back to query text.
    pub(crate) fn serialize(&self) -> String {
        let mut out = self.filter.clone();
        for segment in &self.tail {
            out.push('|');
            out.push_str(segment);
        }
        out
    }
}

/// Parse a template into its subquery units for the given mode.
pub(crate) fn parse_subqueries(template: &str, mode: QueryMode) -> Vec<Subquery> {
    match mode {
        QueryMode::Compound => template.split(';').map(Subquery::parse).collect(),
        QueryMode::Filter => vec![Subquery::parse(template)],
    }
}

/// Serialize subquery units back into one query string.
pub(crate) fn serialize_subqueries(subqueries: &[Subquery]) -> String {
    subqueries
        .iter()
        .map(Subquery::serialize)
        .collect::<Vec<_>>()
        .join(";")
}

/// Lowercase the input and strip every non-alphanumeric ASCII character.
pub(crate) fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn substitute_text(text: &str, effective_input: &str) -> String {
    text.replace(INPUT, effective_input)
        .replace(INPUT_LOWERCASE, &effective_input.to_lowercase())
        .replace(INPUT_NORMALIZED, &normalize(effective_input))
}

/// Byte offset of the first `|` outside any `[[…]]` clause, if any.
fn top_level_pipe(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"[[") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"]]") {
            depth = depth.saturating_sub(1);
            i += 2;
        } else {
            if bytes[i] == b'|' && depth == 0 {
                return Some(i);
            }
            i += 1;
        }
    }
    None
}
