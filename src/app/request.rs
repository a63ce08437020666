//! Correlation data attached to outbound web requests.
//!
//! The host's web request API is fire-and-forget: the reply arrives later as a
//! separate event carrying back a string-to-string context map supplied at
//! request time. [`RequestContext`] is what this plugin stores in that map to
//! route the reply and check it against the latest [`RequestToken`].
//! [`TraceContext`] rides along so the completion span can be correlated with
//! the span that issued the request.

use super::outcome::RequestToken;
use std::collections::BTreeMap;

const KEY_KIND: &str = "kind";
const KEY_TOKEN: &str = "token";
const KEY_INDEX: &str = "index";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

const KIND_SEARCH: &str = "search";
const KIND_COVER: &str = "cover";

/// Identifies which request a web reply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestContext {
    /// Reply to the search issued with `token`.
    Search { token: RequestToken },
    /// Reply to the cover probe of card `index` from search `token`.
    Cover { token: RequestToken, index: usize },
}

impl RequestContext {
    /// Serializes into a host context map, attaching the current trace context.
    #[must_use]
    pub fn to_context_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        match self {
            Self::Search { token } => {
                map.insert(KEY_KIND.to_string(), KIND_SEARCH.to_string());
                map.insert(KEY_TOKEN.to_string(), token.0.to_string());
            }
            Self::Cover { token, index } => {
                map.insert(KEY_KIND.to_string(), KIND_COVER.to_string());
                map.insert(KEY_TOKEN.to_string(), token.0.to_string());
                map.insert(KEY_INDEX.to_string(), index.to_string());
            }
        }

        if let Some(trace) = TraceContext::from_current() {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id);
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id);
        }

        map
    }

    /// Parses a host context map; `None` if it was not produced by this plugin.
    #[must_use]
    pub fn from_context_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let token = RequestToken(map.get(KEY_TOKEN)?.parse().ok()?);
        match map.get(KEY_KIND)?.as_str() {
            KIND_SEARCH => Some(Self::Search { token }),
            KIND_COVER => {
                let index = map.get(KEY_INDEX)?.parse().ok()?;
                Some(Self::Cover { token, index })
            }
            _ => None,
        }
    }
}

/// Distributed tracing context for correlating a request with its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active (e.g. tracing
    /// was never initialized).
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Reads a trace context back from a host context map.
    #[must_use]
    pub fn from_context_map(map: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: map.get(KEY_TRACE_ID)?.clone(),
            parent_span_id: map.get(KEY_PARENT_SPAN_ID)?.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_context_round_trips() {
        let ctx = RequestContext::Search { token: RequestToken(7) };
        let map = ctx.to_context_map();
        assert_eq!(map.get("kind").map(String::as_str), Some("search"));
        assert_eq!(RequestContext::from_context_map(&map), Some(ctx));
    }

    #[test]
    fn cover_context_round_trips() {
        let ctx = RequestContext::Cover {
            token: RequestToken(3),
            index: 12,
        };
        assert_eq!(RequestContext::from_context_map(&ctx.to_context_map()), Some(ctx));
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut map = BTreeMap::new();
        assert_eq!(RequestContext::from_context_map(&map), None);

        map.insert("kind".to_string(), "download".to_string());
        map.insert("token".to_string(), "1".to_string());
        assert_eq!(RequestContext::from_context_map(&map), None);

        map.insert("kind".to_string(), "cover".to_string());
        assert_eq!(RequestContext::from_context_map(&map), None);

        map.insert("index".to_string(), "x".to_string());
        assert_eq!(RequestContext::from_context_map(&map), None);
    }

    #[test]
    fn no_trace_context_without_subscriber() {
        let map = RequestContext::Search { token: RequestToken(1) }.to_context_map();
        assert!(TraceContext::from_context_map(&map).is_none());
    }
}
