use std::fmt::Debug;
use std::path::Path;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Maps a file path onto a `Content-Type`.
pub trait MimeLookup: Debug + Send + Sync {
    fn mime_type_of(&self, path: &Path) -> Option<String>;

    /// Used when [`MimeLookup::mime_type_of`] has no answer.
    fn default_type(&self) -> Option<&str> {
        Some(DEFAULT_MIME_TYPE)
    }
}

/// [`MimeLookup`] backed by the `mime_guess` extension table.
#[derive(Debug, Clone)]
pub struct MimeGuess {
    default_type: Option<String>,
}

impl MimeGuess {
    /// Overrides the fallback type. `None` leaves unknown files without a
    /// `Content-Type` header.
    pub fn with_default_type(default_type: Option<String>) -> Self {
        Self { default_type }
    }
}

impl Default for MimeGuess {
    fn default() -> Self {
        Self {
            default_type: Some(DEFAULT_MIME_TYPE.to_string()),
        }
    }
}

impl MimeLookup for MimeGuess {
    fn mime_type_of(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }

    fn default_type(&self) -> Option<&str> {
        self.default_type.as_deref()
    }
}

/// Types served with a `charset=utf-8` parameter.
pub fn is_utf8_mime(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();

    mime.starts_with("text/")
        || mime.starts_with("application/javascript")
        || mime.starts_with("application/json")
}
