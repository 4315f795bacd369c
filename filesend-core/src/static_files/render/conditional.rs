use std::time::SystemTime;

use http::{HeaderMap, header};
use httpdate::parse_http_date;

use crate::static_files::ConditionalHeaders;
use crate::static_files::render::etag::etag_list_matches;

/// Evaluates request preconditions against the validators a response is
/// about to carry (its `ETag` and `Last-Modified` headers).
#[derive(Debug, Clone, Copy)]
pub struct ConditionalNegotiator<'a> {
    request: &'a ConditionalHeaders,
    response: &'a HeaderMap,
}

impl<'a> ConditionalNegotiator<'a> {
    pub fn new(request: &'a ConditionalHeaders, response: &'a HeaderMap) -> Self {
        Self { request, response }
    }

    pub fn is_conditional(&self) -> bool {
        self.request.if_match.is_some()
            || self.request.if_unmodified_since.is_some()
            || self.request.if_none_match.is_some()
            || self.request.if_modified_since.is_some()
    }

    /// `If-Match` first, then `If-Unmodified-Since`.
    pub fn precondition_failed(&self) -> bool {
        if let Some(if_match) = self.request.if_match.as_deref() {
            let Some(etag) = self.etag() else {
                return true;
            };
            return if_match.trim() != "*" && !etag_list_matches(if_match, etag);
        }

        let Some(unmodified_since) = self
            .request
            .if_unmodified_since
            .as_deref()
            .and_then(parse_date)
        else {
            return false;
        };

        match self.last_modified() {
            Some(last_modified) => last_modified > unmodified_since,
            None => true,
        }
    }

    /// `Cache-Control: no-cache` forces a full response. When `If-None-Match`
    /// is present it alone decides; `If-Modified-Since` is only consulted
    /// without it.
    pub fn not_modified(&self) -> bool {
        if self
            .request
            .cache_control
            .as_deref()
            .is_some_and(has_no_cache)
        {
            return false;
        }

        if let Some(if_none_match) = self.request.if_none_match.as_deref() {
            if if_none_match.trim() == "*" {
                return true;
            }
            return self
                .etag()
                .is_some_and(|etag| etag_list_matches(if_none_match, etag));
        }

        let Some(modified_since) = self
            .request
            .if_modified_since
            .as_deref()
            .and_then(parse_date)
        else {
            return false;
        };

        self.last_modified()
            .is_some_and(|last_modified| last_modified <= modified_since)
    }

    /// Whether a `Range` may be honoured given `If-Range`.
    pub fn range_is_fresh(&self) -> bool {
        let Some(if_range) = self.request.if_range.as_deref() else {
            return true;
        };

        if if_range.contains('"') {
            return self.etag() == Some(if_range.trim());
        }

        let Some(date) = parse_date(if_range) else {
            return false;
        };

        self.last_modified()
            .is_some_and(|last_modified| last_modified <= date)
    }

    fn etag(&self) -> Option<&str> {
        self.response
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
    }

    fn last_modified(&self) -> Option<SystemTime> {
        self.response
            .get(header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_date)
    }
}

fn parse_date(value: &str) -> Option<SystemTime> {
    parse_http_date(value.trim()).ok()
}

fn has_no_cache(cache_control: &str) -> bool {
    cache_control
        .split(',')
        .any(|directive| directive.trim().eq_ignore_ascii_case("no-cache"))
}
