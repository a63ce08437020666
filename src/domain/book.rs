//! Book records and search response validation.
//!
//! The search API returns loosely-typed documents where every field may be
//! missing. This module decodes the response envelope, maps each document onto
//! a [`RawBookRecord`], and filters those into well-formed [`BookRecord`]s.

use crate::domain::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Text shown when a record carries no author names.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Text shown when a record carries no first publication year.
pub const UNKNOWN_YEAR: &str = "N/A";

/// A validated bibliographic entry.
///
/// Only constructed by [`filter_records`], which guarantees a non-empty title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub key: String,
    pub title: String,
    pub author_names: Vec<String>,
    pub first_publish_year: Option<i64>,
    pub cover_id: Option<i64>,
}

impl BookRecord {
    /// Comma-separated author list, or [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn authors_display(&self) -> String {
        if self.author_names.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.author_names.join(", ")
        }
    }

    /// First publication year, or [`UNKNOWN_YEAR`].
    ///
    /// A year of `0` is treated as absent.
    #[must_use]
    pub fn year_display(&self) -> String {
        match self.first_publish_year {
            Some(year) if year != 0 => year.to_string(),
            _ => UNKNOWN_YEAR.to_string(),
        }
    }
}

/// One search document as returned by the API, before validation.
///
/// Every field is decoded leniently: a value of the wrong JSON type reads as
/// absent instead of rejecting the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBookRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publish_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_i: Option<i64>,
}

/// Reads any JSON value and keeps it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Response envelope of `search.json`.
///
/// Documents stay untyped here so one malformed entry cannot fail the whole
/// response.
#[derive(Debug, Deserialize)]
struct SearchPayload {
    docs: Vec<serde_json::Value>,
}

/// Decodes a search response body into raw records.
///
/// Fields with unexpected JSON types read as absent. Only documents that are
/// not JSON objects are dropped and logged.
///
/// # Errors
///
/// Returns [`BookFinderError::Parse`](crate::domain::BookFinderError::Parse) if
/// the body is not JSON or has no `docs` array.
pub fn parse_search_payload(body: &[u8]) -> Result<Vec<RawBookRecord>> {
    let payload: SearchPayload = serde_json::from_slice(body)?;
    let total = payload.docs.len();

    let records: Vec<RawBookRecord> = payload
        .docs
        .into_iter()
        .enumerate()
        .filter_map(|(idx, doc)| match serde_json::from_value::<RawBookRecord>(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(doc_index = idx, error = %e, "dropping malformed search document");
                None
            }
        })
        .collect();

    tracing::debug!(total_docs = total, decoded = records.len(), "search payload decoded");
    Ok(records)
}

/// Keeps records with a non-empty title and maps them onto [`BookRecord`].
///
/// Stable: surviving records keep their relative order. Duplicate keys are
/// kept as-is.
#[must_use]
pub fn filter_records(raw: Vec<RawBookRecord>) -> Vec<BookRecord> {
    raw.into_iter()
        .filter_map(|record| {
            let title = record.title.filter(|t| !t.is_empty())?;
            Some(BookRecord {
                key: record.key.unwrap_or_default(),
                title,
                author_names: record.author_name.unwrap_or_default(),
                first_publish_year: record.first_publish_year,
                cover_id: record.cover_i,
            })
        })
        .collect()
}
