//! Domain layer for the book finder plugin.
//!
//! This module contains the core domain types and pure functions of the plugin,
//! independent of Zellij-specific APIs. Nothing here performs I/O; request URLs
//! are built here and executed by the plugin runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types, user-facing failure classes and result alias
//! - [`query`]: Search query model and request URL construction
//! - [`book`]: Book records and search response validation
//! - [`cover`]: Cover URL resolution and the placeholder fallback rule
//!
//! # Examples
//!
//! ```
//! use zbookfinder::domain::{filter_records, parse_search_payload};
//!
//! let body = br#"{"docs": [{"title": "Foo"}, {"key": "/works/OL2W"}]}"#;
//! let books = filter_records(parse_search_payload(body)?);
//! assert_eq!(books.len(), 1);
//! # Ok::<(), zbookfinder::BookFinderError>(())
//! ```

pub mod book;
pub mod cover;
pub mod error;
pub mod query;

pub use book::{filter_records, parse_search_payload, BookRecord, RawBookRecord};
pub use cover::{resolve_cover_url, CoverImage, CoverStatus, PLACEHOLDER_COVER_URL};
pub use error::{BookFinderError, ErrorKind, Result};
pub use query::{QueryBuilder, SearchMode, SearchQuery, SEARCH_RESULT_LIMIT};
