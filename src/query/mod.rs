//! Query construction for the semantic-facts store.
//!
//! Converts a free-text search input plus a [`SearchConfig`](crate::config::SearchConfig)
//! into a structured ask query and endpoint URL. Pure functions of their
//! inputs; the caller owns the fetch.

// Module declarations
pub(crate) mod builder;
pub(crate) mod identifier;
pub(crate) mod template;

// Public re-exports (used via lib.rs)
pub use builder::{build_query, build_url};
