use std::time::{Duration, SystemTime};

use http::{HeaderMap, HeaderName, HeaderValue, header};
use httpdate::fmt_http_date;

use crate::static_files::render::range::{ByteRange, content_range};

/// Headers a 304 must not carry.
const ENTITY_HEADERS: [HeaderName; 5] = [
    header::CONTENT_ENCODING,
    header::CONTENT_LANGUAGE,
    header::CONTENT_LENGTH,
    header::CONTENT_RANGE,
    header::CONTENT_TYPE,
];

#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl HeaderBuilder {
    /// Starts from headers that were set before assembly (hooks, error
    /// extras). Those win over every `*_default` call.
    pub(crate) fn seeded(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Inserts (or removes) a header from the header map.
    ///
    /// If the value is not a valid header value, or is empty, the header is
    /// removed instead.
    pub(crate) fn insert(&mut self, header_name: HeaderName, value: &str) {
        let header_value = HeaderValue::from_str(value).unwrap_or(HeaderValue::from_static(""));
        if header_value.is_empty() {
            self.headers.remove(header_name);
        } else {
            self.headers.insert(header_name, header_value);
        }
    }

    /// Inserts only when the header is not present yet.
    pub(crate) fn insert_default(&mut self, header_name: HeaderName, value: &str) {
        if !self.headers.contains_key(&header_name) {
            self.insert(header_name, value);
        }
    }

    /// Overwrites with every header in `headers`.
    pub(crate) fn merge(&mut self, headers: HeaderMap) {
        self.headers.extend(headers);
    }

    /// Adds headers from `headers` that are not present yet.
    pub(crate) fn merge_defaults(&mut self, headers: HeaderMap) {
        for (name, value) in &headers {
            if !self.headers.contains_key(name) {
                self.headers.insert(name.clone(), value.clone());
            }
        }
    }

    pub(crate) fn as_map(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn accept_ranges(&mut self) {
        self.insert_default(header::ACCEPT_RANGES, "bytes");
    }

    pub(crate) fn cache_control(&mut self, max_age: Duration, immutable: bool) {
        let mut value = format!("public, max-age={}", max_age.as_secs());

        if immutable {
            value.push_str(", immutable");
        }

        self.insert_default(header::CACHE_CONTROL, &value);
    }

    pub(crate) fn last_modified(&mut self, modified: SystemTime) {
        self.insert_default(header::LAST_MODIFIED, &fmt_http_date(modified));
    }

    pub(crate) fn etag(&mut self, value: &str) {
        self.insert_default(header::ETAG, value);
    }

    pub(crate) fn content_type(&mut self, value: &str) {
        self.insert_default(header::CONTENT_TYPE, value);
    }

    pub(crate) fn content_range(&mut self, range: Option<&ByteRange>, len: u64) {
        self.insert(header::CONTENT_RANGE, &content_range(len, range));
    }

    pub(crate) fn content_length(&mut self, len: u64) {
        self.insert(header::CONTENT_LENGTH, &len.to_string());
    }

    pub(crate) fn location(&mut self, value: &str) {
        self.insert(header::LOCATION, value);
    }

    /// Headers for generated HTML documents.
    pub(crate) fn html_document(&mut self, len: u64) {
        self.insert_default(header::CONTENT_TYPE, "text/html; charset=utf-8");
        self.insert_default(header::CONTENT_SECURITY_POLICY, "default-src 'none'");
        self.insert_default(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
        self.insert_default(header::CONTENT_LENGTH, &len.to_string());
    }

    pub(crate) fn strip_entity_headers(&mut self) {
        for name in ENTITY_HEADERS {
            self.headers.remove(name);
        }
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
