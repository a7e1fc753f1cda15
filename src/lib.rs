//! Query construction and result ranking for a Semantic MediaWiki ask
//! endpoint.
//!
//! Two components, used in sequence within one request/response cycle: the
//! query builder ([`build_url`]) turns a free-text search input into a
//! fetchable URL, and the result mapper ([`map_results`]) turns the fetched
//! payload into a ranked list of display-ready records. Both are synchronous,
//! stateless, pure functions of their inputs; the caller owns the fetch in
//! between and any concurrency around it.

pub mod config;
pub mod error;
pub mod query;
pub mod results;
pub mod tracing;

pub use config::{QueryMode, SearchConfig};
pub use error::ConfigError;
pub use query::{build_query, build_url};
pub use results::{ApiResponse, RawResultItem, RawResultSet, SearchResult, map_results};
