//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for ask-gateway operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a [`SearchConfig`](crate::config::SearchConfig) fails validation.
///
/// Query construction itself never fails. A bad configuration is the only
/// condition rejected up front instead of degrading into a malformed query.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The maximum result count must be at least 1.
    #[error("maximum result count must be positive, got {0}")]
    NonPositiveMaxResults(usize),

    /// The oversampling factor must be at least 1.
    #[error("oversampling factor must be positive, got {0}")]
    NonPositiveOversample(usize),

    /// The query template opens and closes filter clauses unevenly.
    #[error("query template has unbalanced filter delimiters: {template}")]
    UnbalancedTemplate { template: String },
}
