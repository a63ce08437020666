//! Search query model and request URL construction.
//!
//! A [`SearchQuery`] pairs the free-text term with the field it targets. The
//! [`QueryBuilder`] turns it into the Open Library search URL, percent-encoding
//! the term and capping the result volume at [`SEARCH_RESULT_LIMIT`].

use crate::domain::error::{BookFinderError, Result};
use url::Url;

/// Default API base used when no `api_base_url` is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://openlibrary.org";

/// Maximum number of records requested per search.
pub const SEARCH_RESULT_LIMIT: u32 = 21;

/// Path of the search endpoint relative to the API base.
const SEARCH_ENDPOINT: &str = "search.json";

/// Field a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Match against book titles.
    #[default]
    Title,
    /// Match against author names.
    Author,
}

impl SearchMode {
    /// Query string parameter name for this mode.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
        }
    }

    /// Label shown on the mode selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
        }
    }

    /// Example query shown in the empty input field.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "e.g., \"Dune\"",
            Self::Author => "e.g., \"Frank Herbert\"",
        }
    }

    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Title,
        }
    }
}

/// A single search request as entered by the user.
///
/// The term is passed through untouched; an empty term is a valid query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub term: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            term: term.into(),
            mode,
        }
    }
}

/// Builds search request URLs against a fixed API endpoint.
///
/// The endpoint is resolved once from the configured base URL, so building a
/// request URL afterwards cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    endpoint: Url,
}

impl QueryBuilder {
    /// Creates a builder for `{base_url}/search.json`.
    ///
    /// Any query string or fragment on `base_url` is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`BookFinderError::Config`] if `base_url` is not an absolute
    /// URL that can carry a path (e.g. `mailto:` or a bare host name).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut endpoint = Url::parse(base_url)
            .map_err(|e| BookFinderError::Config(format!("invalid api_base_url '{base_url}': {e}")))?;

        endpoint
            .path_segments_mut()
            .map_err(|()| BookFinderError::Config(format!("api_base_url '{base_url}' cannot be a base")))?
            .pop_if_empty()
            .push(SEARCH_ENDPOINT);
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        Ok(Self { endpoint })
    }

    /// Returns the resolved search endpoint without query parameters.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Builds the request URL for `query`.
    ///
    /// Emits exactly two parameters: the mode's field with the encoded term,
    /// followed by `limit`.
    ///
    /// # Example
    ///
    /// ```
    /// use zbookfinder::domain::{QueryBuilder, SearchMode, SearchQuery};
    ///
    /// let builder = QueryBuilder::default();
    /// let url = builder.build_url(&SearchQuery::new("Dune", SearchMode::Title));
    /// assert_eq!(url, "https://openlibrary.org/search.json?title=Dune&limit=21");
    /// ```
    #[must_use]
    pub fn build_url(&self, query: &SearchQuery) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(query.mode.param(), &query.term)
            .append_pair("limit", &SEARCH_RESULT_LIMIT.to_string());
        url.into()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        let mut endpoint = Url::parse(DEFAULT_API_BASE_URL)
            .expect("default API base URL should always parse");
        endpoint.set_path(SEARCH_ENDPOINT);
        Self { endpoint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn title_query_uses_title_param() {
        let url = QueryBuilder::default().build_url(&SearchQuery::new("Dune", SearchMode::Title));
        assert_eq!(url, "https://openlibrary.org/search.json?title=Dune&limit=21");
    }

    #[test]
    fn author_query_uses_author_param() {
        let url = QueryBuilder::default()
            .build_url(&SearchQuery::new("Frank Herbert", SearchMode::Author));
        assert_eq!(
            pairs(&url),
            vec![
                ("author".to_string(), "Frank Herbert".to_string()),
                ("limit".to_string(), "21".to_string()),
            ]
        );
    }

    #[test]
    fn empty_term_still_builds_valid_url() {
        let url = QueryBuilder::default().build_url(&SearchQuery::new("", SearchMode::Title));
        assert_eq!(
            pairs(&url),
            vec![
                ("title".to_string(), String::new()),
                ("limit".to_string(), "21".to_string()),
            ]
        );
    }

    #[test]
    fn term_round_trips_through_encoding() {
        let builder = QueryBuilder::default();
        let terms = [
            "Dune",
            "the lord of the rings",
            "a&b=c?d#e",
            "100% + more/less",
            "café crème",
            "日本語の本",
            "emoji 📚 shelf",
            "  padded  ",
        ];

        for term in terms {
            for mode in [SearchMode::Title, SearchMode::Author] {
                let url = builder.build_url(&SearchQuery::new(term, mode));
                let recovered = pairs(&url);
                assert_eq!(recovered.len(), 2, "unexpected params in {url}");
                assert_eq!(recovered[0], (mode.param().to_string(), term.to_string()));
                assert_eq!(recovered[1], ("limit".to_string(), "21".to_string()));
            }
        }
    }

    #[test]
    fn generated_unicode_terms_round_trip() {
        let builder = QueryBuilder::default();
        let chars: Vec<char> = (0..=0x10_FFFF_u32).step_by(61).filter_map(char::from_u32).collect();

        // samples every plane; from_u32 skips surrogates
        for chunk in chars.chunks(7) {
            let term: String = chunk.iter().collect();
            let url = builder.build_url(&SearchQuery::new(term.clone(), SearchMode::Title));
            let recovered = pairs(&url);
            assert_eq!(recovered.len(), 2, "unexpected params in {url}");
            assert_eq!(recovered[0].1, term);
        }

        for c in (0..0x80_u8).map(char::from) {
            let term = format!("a{c}b");
            let url = builder.build_url(&SearchQuery::new(term.clone(), SearchMode::Author));
            assert_eq!(pairs(&url)[0], ("author".to_string(), term));
        }
    }

    #[test]
    fn custom_base_keeps_its_path() {
        let builder = QueryBuilder::new("http://localhost:8080/mirror/").unwrap();
        assert_eq!(builder.endpoint(), "http://localhost:8080/mirror/search.json");

        let builder = QueryBuilder::new("https://openlibrary.org?x=1#frag").unwrap();
        assert_eq!(builder.endpoint(), "https://openlibrary.org/search.json");
    }

    #[test]
    fn invalid_base_is_config_error() {
        assert!(matches!(
            QueryBuilder::new("not a url"),
            Err(BookFinderError::Config(_))
        ));
        assert!(matches!(
            QueryBuilder::new("mailto:someone@example.com"),
            Err(BookFinderError::Config(_))
        ));
    }

    #[test]
    fn default_matches_parsed_default_base() {
        assert_eq!(
            QueryBuilder::default(),
            QueryBuilder::new(DEFAULT_API_BASE_URL).unwrap()
        );
    }
}
