//! Result mapping and ranking for the store's raw response.
//!
//! Converts a parsed response payload plus the original search string and a
//! language preference into an ordered list of display-ready records.

// Module declarations
pub(crate) mod mapper;
pub(crate) mod ranking;
pub(crate) mod raw;

// Public re-exports (used via lib.rs)
pub use mapper::{SearchResult, map_results};
pub use raw::{
    ApiResponse, LocalizedText, PageRef, Printouts, QuerySection, RawResultItem, RawResultSet,
    TextEntry,
};
