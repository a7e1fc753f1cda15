//! Search gateway configuration.
//!
//! [`SearchConfig`] is supplied by the host application (typically embedded in
//! its own configuration file via serde) and validated once with
//! [`SearchConfig::validate`] before any query is built. The core never
//! mutates it.

use crate::error::{ConfigError, Result};
use anyhow::Context;
use serde::Deserialize;

fn default_oversample() -> usize {
    4
}

/// How the query template is interpreted and which API action is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// A single filter query with one print-statement tail (`action=ask`).
    #[default]
    Filter,
    /// Multiple `;`-separated subqueries (`action=compoundquery`).
    Compound,
}

impl QueryMode {
    /// The `action` parameter value sent to the API endpoint.
    pub fn action(self) -> &'static str {
        match self {
            Self::Filter => "ask",
            Self::Compound => "compoundquery",
        }
    }
}

/// Read-only configuration for query construction and result mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Script base path of the wiki, e.g. `/w` or `https://wiki.example.org/w`.
    pub script_path: String,

    /// Maximum number of results handed back to the caller.
    pub max_results: usize,

    /// Ask query template with `${input}`-style placeholder tokens.
    pub query_template: String,

    /// Template interpretation mode.
    #[serde(default)]
    pub query_mode: QueryMode,

    /// Multiplier applied to `max_results` for store-side limits, so ranking
    /// truncates from a larger candidate pool.
    #[serde(default = "default_oversample")]
    pub oversample: usize,
}

impl SearchConfig {
    /// Create a validated configuration.
    pub fn new(
        script_path: impl Into<String>,
        max_results: usize,
        query_template: impl Into<String>,
        query_mode: QueryMode,
    ) -> std::result::Result<Self, ConfigError> {
        let config = Self {
            script_path: script_path.into(),
            max_results,
            query_template: query_template.into(),
            query_mode,
            oversample: default_oversample(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("failed to parse search configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// The store-side result limit: `max_results` scaled by the oversampling
    /// factor.
    pub fn store_limit(&self) -> usize {
        self.max_results * self.oversample
    }

    /// Check the caller-contract invariants.
    ///
    /// A non-positive maximum result count or oversampling factor, or a
    /// template whose `[[`/`]]` delimiters do not pair up, is rejected here
    /// rather than silently producing a malformed query later.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::NonPositiveMaxResults(self.max_results));
        }
        if self.oversample == 0 {
            return Err(ConfigError::NonPositiveOversample(self.oversample));
        }
        if !delimiters_balanced(&self.query_template) {
            return Err(ConfigError::UnbalancedTemplate {
                template: self.query_template.clone(),
            });
        }
        Ok(())
    }
}

/// Check that every `[[` in the template is closed by a later `]]`.
fn delimiters_balanced(template: &str) -> bool {
    let mut depth = 0i32;
    let bytes = template.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        match &bytes[i..i + 2] {
            b"[[" => {
                depth += 1;
                i += 2;
            }
            b"]]" => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    depth == 0
}
