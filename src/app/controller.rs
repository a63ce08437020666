//! Search request lifecycle.
//!
//! [`SearchController`] owns the [`SearchOutcome`] and is the only writer of it.
//! Triggering a search hands back a [`SearchRequest`] for the runtime to
//! execute; the runtime reports completion through [`SearchController::settle`].
//!
//! # Supersession
//!
//! Each trigger allocates a new [`RequestToken`]. A settlement carrying any
//! other token than the latest is discarded, so an older request finishing
//! late can never overwrite the state of a newer one. Superseded requests are
//! not cancelled.

use super::outcome::{RequestToken, SearchOutcome};
use crate::domain::{
    filter_records, parse_search_payload, BookFinderError, BookRecord, ErrorKind, QueryBuilder,
    Result, SearchQuery,
};

/// A search the runtime must issue as one HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: RequestToken,
    pub url: String,
}

/// Reply delivered by the transport, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Drives the search outcome through its state machine.
#[derive(Debug, Clone)]
pub struct SearchController {
    builder: QueryBuilder,
    outcome: SearchOutcome,
    latest: RequestToken,
}

impl SearchController {
    #[must_use]
    pub fn new(builder: QueryBuilder) -> Self {
        Self {
            builder,
            outcome: SearchOutcome::Idle,
            latest: RequestToken::default(),
        }
    }

    /// Builder used for search URLs.
    #[must_use]
    pub const fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    #[must_use]
    pub const fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// Token of the most recently triggered search.
    #[must_use]
    pub const fn latest_token(&self) -> RequestToken {
        self.latest
    }

    /// Whether `token` belongs to the most recently triggered search.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token == self.latest && self.latest != RequestToken::default()
    }

    /// Starts a search.
    ///
    /// The outcome becomes [`SearchOutcome::Loading`] before this returns,
    /// dropping any previous results or failure. Exactly one request is
    /// produced; there are no retries.
    pub fn trigger_search(&mut self, query: &SearchQuery) -> SearchRequest {
        self.latest = self.latest.next();
        self.outcome = SearchOutcome::Loading;

        let url = self.builder.build_url(query);
        tracing::debug!(
            token = %self.latest,
            mode = query.mode.param(),
            term_len = query.term.len(),
            url = %url,
            "search triggered"
        );

        SearchRequest {
            token: self.latest,
            url,
        }
    }

    /// Applies the completion of the request identified by `token`.
    ///
    /// Returns `false` without touching the outcome when `token` is stale or
    /// its request has already settled.
    pub fn settle(&mut self, token: RequestToken, response: Result<HttpResponse>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(token = %token, latest = %self.latest, "discarding superseded search result");
            return false;
        }
        if !self.outcome.is_loading() {
            tracing::debug!(token = %token, "search already settled, ignoring duplicate completion");
            return false;
        }

        self.outcome = resolve_outcome(response);
        tracing::debug!(token = %token, outcome = self.outcome.label(), "search settled");
        true
    }
}

/// Classifies a transport result into a settled outcome.
fn resolve_outcome(response: Result<HttpResponse>) -> SearchOutcome {
    match response.and_then(decode_records) {
        Ok(Some(records)) => SearchOutcome::Success(records),
        Ok(None) => SearchOutcome::Empty,
        Err(e) => {
            tracing::debug!(error = %e, "search failed");
            SearchOutcome::Failure(e.kind().unwrap_or(ErrorKind::Network))
        }
    }
}

/// Decodes a reply into validated records; `None` when nothing usable came back.
fn decode_records(response: HttpResponse) -> Result<Option<Vec<BookRecord>>> {
    if !response.is_success() {
        return Err(BookFinderError::HttpStatus(response.status));
    }

    let raw = parse_search_payload(&response.body)?;
    if raw.is_empty() {
        tracing::debug!("search returned no documents");
        return Ok(None);
    }

    let returned = raw.len();
    let records = filter_records(raw);
    if records.is_empty() {
        tracing::debug!(returned, "all returned documents lacked a title");
        return Ok(None);
    }

    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchMode;

    fn controller() -> SearchController {
        SearchController::new(QueryBuilder::default())
    }

    fn ok(body: &str) -> Result<HttpResponse> {
        Ok(HttpResponse::new(200, body))
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.outcome(), &SearchOutcome::Idle);
        assert!(!c.is_current(c.latest_token()));
    }

    #[test]
    fn trigger_sets_loading_synchronously() {
        let mut c = controller();
        let request = c.trigger_search(&SearchQuery::new("Dune", SearchMode::Title));
        assert!(c.outcome().is_loading());
        assert_eq!(request.url, "https://openlibrary.org/search.json?title=Dune&limit=21");
        assert!(c.is_current(request.token));
    }

    #[test]
    fn trigger_clears_previous_results() {
        let mut c = controller();
        let first = c.trigger_search(&SearchQuery::new("Dune", SearchMode::Title));
        assert!(c.settle(first.token, ok(r#"{"docs":[{"title":"Dune"}]}"#)));
        assert_eq!(c.outcome().records().len(), 1);

        c.trigger_search(&SearchQuery::new("Emma", SearchMode::Title));
        assert_eq!(c.outcome(), &SearchOutcome::Loading);
        assert!(c.outcome().records().is_empty());
    }

    #[test]
    fn tokens_increase_per_trigger() {
        let mut c = controller();
        let a = c.trigger_search(&SearchQuery::default());
        let b = c.trigger_search(&SearchQuery::default());
        assert!(b.token > a.token);
    }

    #[test]
    fn success_with_titles() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::new("Dune", SearchMode::Title));
        c.settle(
            r.token,
            ok(r#"{"docs":[{"title":"Dune"},{"title":"Dune Messiah"},{"title":"Children of Dune"}]}"#),
        );
        assert_eq!(c.outcome().records().len(), 3);
        assert!(c.outcome().is_settled());
    }

    #[test]
    fn mistyped_optional_fields_still_succeed() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::new("Foo", SearchMode::Title));
        c.settle(
            r.token,
            ok(r#"{"docs":[{"title":"Foo","first_publish_year":"x","author_name":"y"}]}"#),
        );

        let records = c.outcome().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_publish_year, None);
        assert!(records[0].author_names.is_empty());
    }

    #[test]
    fn zero_docs_is_empty() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::new("zzzzqqqqnomatch", SearchMode::Title));
        c.settle(r.token, ok(r#"{"docs":[]}"#));
        assert_eq!(c.outcome(), &SearchOutcome::Empty);
    }

    #[test]
    fn all_untitled_is_empty() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::default());
        c.settle(r.token, ok(r#"{"docs":[{"key":"/works/OL1W"},{"title":""}]}"#));
        assert_eq!(c.outcome(), &SearchOutcome::Empty);
    }

    #[test]
    fn non_success_status_is_network_failure() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::default());
        c.settle(r.token, Ok(HttpResponse::new(500, r#"{"docs":[{"title":"x"}]}"#)));
        assert_eq!(c.outcome(), &SearchOutcome::Failure(ErrorKind::Network));
    }

    #[test]
    fn transport_error_is_network_failure() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::default());
        c.settle(r.token, Err(BookFinderError::Network("connection refused".into())));
        assert_eq!(c.outcome(), &SearchOutcome::Failure(ErrorKind::Network));
    }

    #[test]
    fn invalid_body_is_parse_failure() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::default());
        c.settle(r.token, ok("not json"));
        assert_eq!(c.outcome(), &SearchOutcome::Failure(ErrorKind::Parse));

        let r = c.trigger_search(&SearchQuery::default());
        c.settle(r.token, ok(r#"{"documents":[]}"#));
        assert_eq!(c.outcome(), &SearchOutcome::Failure(ErrorKind::Parse));
    }

    #[test]
    fn late_stale_result_does_not_overwrite_newer_one() {
        let mut c = controller();
        let t1 = c.trigger_search(&SearchQuery::new("first", SearchMode::Title));
        let t2 = c.trigger_search(&SearchQuery::new("second", SearchMode::Author));

        assert!(c.settle(t2.token, ok(r#"{"docs":[]}"#)));
        assert!(!c.settle(t1.token, ok(r#"{"docs":[{"title":"Stale"}]}"#)));

        assert_eq!(c.outcome(), &SearchOutcome::Empty);
    }

    #[test]
    fn stale_result_while_newer_in_flight_keeps_loading() {
        let mut c = controller();
        let t1 = c.trigger_search(&SearchQuery::new("first", SearchMode::Title));
        let t2 = c.trigger_search(&SearchQuery::new("second", SearchMode::Title));

        assert!(!c.settle(t1.token, Err(BookFinderError::Network("reset".into()))));
        assert!(c.outcome().is_loading());

        assert!(c.settle(t2.token, ok(r#"{"docs":[{"title":"Fresh"}]}"#)));
        assert_eq!(c.outcome().records()[0].title, "Fresh");
    }

    #[test]
    fn request_settles_only_once() {
        let mut c = controller();
        let r = c.trigger_search(&SearchQuery::default());
        assert!(c.settle(r.token, ok(r#"{"docs":[{"title":"Once"}]}"#)));
        assert!(!c.settle(r.token, Err(BookFinderError::Network("late".into()))));
        assert_eq!(c.outcome().records()[0].title, "Once");
    }

    #[test]
    fn settle_without_trigger_is_ignored() {
        let mut c = controller();
        assert!(!c.settle(RequestToken::default(), ok(r#"{"docs":[]}"#)));
        assert_eq!(c.outcome(), &SearchOutcome::Idle);
    }
}
