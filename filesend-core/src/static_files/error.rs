use std::io;

use http::{HeaderMap, HeaderValue, StatusCode, header};

use crate::static_files::resolve::ResolveError;

/// Every way a send can end without a file body.
///
/// All variants are resolved into an error [`SendOutcome`](crate::SendOutcome);
/// none of them escape the public call boundary.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("malformed request path")]
    BadRequest,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound {
        #[source]
        source: Option<io::Error>,
    },

    #[error("precondition failed")]
    PreconditionFailed,

    #[error("range not satisfiable for length {length}")]
    RangeNotSatisfiable { length: u64 },

    #[error("filesystem error: {0}")]
    Io(#[source] io::Error),
}

impl SendError {
    pub fn not_found() -> Self {
        SendError::NotFound { source: None }
    }

    /// Classifies a filesystem error. Missing entries, non-directory path
    /// prefixes and over-long names are a 404; everything else is a 500.
    pub fn from_io(err: io::Error) -> Self {
        if is_missing_entry(&err) {
            SendError::NotFound { source: Some(err) }
        } else {
            SendError::Io(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SendError::BadRequest => StatusCode::BAD_REQUEST,
            SendError::Forbidden => StatusCode::FORBIDDEN,
            SendError::NotFound { .. } => StatusCode::NOT_FOUND,
            SendError::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
            SendError::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            SendError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Headers the error itself contributes to the response.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let SendError::RangeNotSatisfiable { length } = self {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{length}")) {
                headers.insert(header::CONTENT_RANGE, value);
            }
        }
        headers
    }
}

impl From<ResolveError> for SendError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::BadPath => SendError::BadRequest,
            ResolveError::Forbidden => SendError::Forbidden,
            ResolveError::NotFound => SendError::not_found(),
        }
    }
}

#[cfg(unix)]
fn is_missing_entry(err: &io::Error) -> bool {
    use nix::errno::Errno;

    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }

    matches!(
        err.raw_os_error().map(Errno::from_raw),
        Some(Errno::ENOENT | Errno::ENOTDIR | Errno::ENAMETOOLONG)
    )
}

#[cfg(not(unix))]
fn is_missing_entry(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
