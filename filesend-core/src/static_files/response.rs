use std::path::PathBuf;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, Method, StatusCode, header};

use crate::static_files::body::SendBody;
use crate::static_files::error::SendError;
use crate::static_files::fs::FileStat;

/// The slice of an inbound request the sender reads.
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub method: Method,
    pub headers: HeaderMap,
}

impl SendRequest {
    pub fn new(method: Method, headers: HeaderMap) -> Self {
        Self { method, headers }
    }

    pub fn get() -> Self {
        Self::new(Method::GET, HeaderMap::new())
    }

    pub fn head() -> Self {
        Self::new(Method::HEAD, HeaderMap::new())
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

impl<B> From<&http::Request<B>> for SendRequest {
    fn from(req: &http::Request<B>) -> Self {
        Self::new(req.method().clone(), req.headers().clone())
    }
}

/// Conditional request headers for cache validation and range requests.
///
/// Empty or non-visible-ASCII values are treated as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConditionalHeaders {
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub if_unmodified_since: Option<String>,
    pub if_range: Option<String>,
    pub range: Option<String>,
    pub cache_control: Option<String>,
}

impl ConditionalHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            if_match: get(header::IF_MATCH),
            if_none_match: get(header::IF_NONE_MATCH),
            if_modified_since: get(header::IF_MODIFIED_SINCE),
            if_unmodified_since: get(header::IF_UNMODIFIED_SINCE),
            if_range: get(header::IF_RANGE),
            range: get(header::RANGE),
            cache_control: get(header::CACHE_CONTROL),
        }
    }
}

/// What the send resolved to. Exactly one per request.
#[derive(Debug)]
pub enum OutcomeKind {
    File { path: PathBuf, stat: FileStat },
    Directory { path: PathBuf, request_path: String },
    Error { error: SendError },
}

/// A complete response description: status, headers and a body that is
/// always present (possibly empty).
#[derive(Debug)]
pub struct SendOutcome {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: SendBody,
    pub kind: OutcomeKind,
}

impl SendOutcome {
    pub fn is_file(&self) -> bool {
        matches!(self.kind, OutcomeKind::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, OutcomeKind::Directory { .. })
    }

    pub fn error(&self) -> Option<&SendError> {
        match &self.kind {
            OutcomeKind::Error { error } => Some(error),
            _ => None,
        }
    }

    /// Convenience for header lookups in tests and tooling.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A response piece returned by a hook to replace a default rendering.
#[derive(Debug, Clone)]
pub struct ResponseFragment {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ResponseFragment {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}
