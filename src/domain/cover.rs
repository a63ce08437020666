//! Cover image resolution and the one-shot placeholder fallback.
//!
//! Every card shows exactly one image source. [`resolve_cover_url`] picks the
//! initial source; [`CoverImage`] tracks what happens when it is loaded.
//!
//! # Fallback rule
//!
//! When the current source fails to load, the placeholder is substituted
//! exactly once. Any later failure, including a failure of the placeholder
//! itself, is terminal and yields no new source, so a card issues at most two
//! image loads.

use crate::domain::book::BookRecord;

/// Static image used when a record has no cover or the cover cannot be loaded.
pub const PLACEHOLDER_COVER_URL: &str = "https://placehold.co/180x240/e0e0e0/777?text=No+Cover";

/// Base of the Open Library covers API.
const COVER_URL_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Returns the large cover URL for `record`, or the placeholder if it has none.
///
/// Defined for every record.
///
/// # Example
///
/// ```
/// use zbookfinder::domain::{resolve_cover_url, BookRecord, PLACEHOLDER_COVER_URL};
///
/// let mut book = BookRecord {
///     key: "/works/OL1W".into(),
///     title: "Dune".into(),
///     author_names: vec![],
///     first_publish_year: None,
///     cover_id: Some(42),
/// };
/// assert_eq!(resolve_cover_url(&book), "https://covers.openlibrary.org/b/id/42-L.jpg");
///
/// book.cover_id = None;
/// assert_eq!(resolve_cover_url(&book), PLACEHOLDER_COVER_URL);
/// ```
#[must_use]
pub fn resolve_cover_url(record: &BookRecord) -> String {
    record.cover_id.map_or_else(
        || PLACEHOLDER_COVER_URL.to_string(),
        |id| format!("{COVER_URL_BASE}/{id}-L.jpg"),
    )
}

/// Load state of a card's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverStatus {
    /// Source assigned, load not yet settled.
    Pending,
    /// Current source loaded successfully.
    Loaded,
    /// Placeholder fallback already used and the source failed again.
    Failed,
}

/// Image state for a single result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    src: String,
    fallback_applied: bool,
    status: CoverStatus,
}

impl CoverImage {
    /// Creates the image state for `record` with its resolved source.
    #[must_use]
    pub fn for_record(record: &BookRecord) -> Self {
        Self {
            src: resolve_cover_url(record),
            fallback_applied: false,
            status: CoverStatus::Pending,
        }
    }

    /// Current image source.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    #[must_use]
    pub const fn status(&self) -> CoverStatus {
        self.status
    }

    /// Whether the card currently shows the placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.src == PLACEHOLDER_COVER_URL
    }

    /// Whether the one-shot fallback has been consumed.
    #[must_use]
    pub const fn fallback_applied(&self) -> bool {
        self.fallback_applied
    }

    /// Records a successful load of the current source.
    pub fn mark_loaded(&mut self) {
        self.status = CoverStatus::Loaded;
    }

    /// Handles a load failure of the current source.
    ///
    /// Returns the placeholder URL to load next on the first failure. Returns
    /// `None` on every later failure; the caller must not retry.
    pub fn handle_load_error(&mut self) -> Option<&str> {
        if self.fallback_applied {
            tracing::debug!(src = %self.src, "cover fallback already used, giving up");
            self.status = CoverStatus::Failed;
            return None;
        }

        tracing::debug!(failed_src = %self.src, "cover failed to load, substituting placeholder");
        self.fallback_applied = true;
        self.status = CoverStatus::Pending;
        PLACEHOLDER_COVER_URL.clone_into(&mut self.src);
        Some(&self.src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(cover_id: Option<i64>) -> BookRecord {
        BookRecord {
            key: "/works/OL1W".to_string(),
            title: "Dune".to_string(),
            author_names: vec![],
            first_publish_year: None,
            cover_id,
        }
    }

    #[test]
    fn resolves_large_cover_by_id() {
        assert_eq!(
            resolve_cover_url(&book(Some(8_231_856))),
            "https://covers.openlibrary.org/b/id/8231856-L.jpg"
        );
    }

    #[test]
    fn missing_cover_resolves_to_placeholder() {
        assert_eq!(resolve_cover_url(&book(None)), PLACEHOLDER_COVER_URL);
        assert!(CoverImage::for_record(&book(None)).is_placeholder());
    }

    #[test]
    fn fallback_substitutes_placeholder_exactly_once() {
        let mut cover = CoverImage::for_record(&book(Some(1)));
        assert!(!cover.is_placeholder());
        assert_eq!(cover.status(), CoverStatus::Pending);

        assert_eq!(cover.handle_load_error(), Some(PLACEHOLDER_COVER_URL));
        assert!(cover.is_placeholder());
        assert!(cover.fallback_applied());
        assert_eq!(cover.status(), CoverStatus::Pending);

        assert_eq!(cover.handle_load_error(), None);
        assert_eq!(cover.status(), CoverStatus::Failed);
        assert_eq!(cover.handle_load_error(), None);
        assert_eq!(cover.src(), PLACEHOLDER_COVER_URL);
    }

    #[test]
    fn placeholder_source_still_gets_one_retry() {
        let mut cover = CoverImage::for_record(&book(None));
        assert_eq!(cover.handle_load_error(), Some(PLACEHOLDER_COVER_URL));
        assert_eq!(cover.handle_load_error(), None);
    }

    #[test]
    fn successful_load_is_recorded() {
        let mut cover = CoverImage::for_record(&book(Some(7)));
        cover.mark_loaded();
        assert_eq!(cover.status(), CoverStatus::Loaded);
        assert!(!cover.fallback_applied());
    }
}
