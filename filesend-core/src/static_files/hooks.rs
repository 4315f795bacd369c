use std::fmt;
use std::path::Path;
use std::sync::Arc;

use http::HeaderMap;

use crate::static_files::error::SendError;
use crate::static_files::fs::FileStat;
use crate::static_files::response::ResponseFragment;

pub type FileHook = Arc<dyn Fn(&Path, &FileStat) -> HeaderMap + Send + Sync>;
pub type DirectoryHook = Arc<dyn Fn(&Path, &str) -> Option<ResponseFragment> + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(&SendError) -> Option<ResponseFragment> + Send + Sync>;

/// Extension points invoked synchronously while a response is built.
#[derive(Clone, Default)]
pub struct SendHooks {
    /// Called once a regular file is located. Returned headers are seeded
    /// into the response and win over the defaults.
    pub on_file: Option<FileHook>,

    /// Called with the directory path and the raw request path when a
    /// directory is hit outside index lookup.
    pub on_directory: Option<DirectoryHook>,

    /// Called for every error outcome. `Some` replaces the HTML page.
    pub on_error: Option<ErrorHook>,
}

impl SendHooks {
    pub(crate) fn file_headers(&self, path: &Path, stat: &FileStat) -> HeaderMap {
        self.on_file
            .as_ref()
            .map(|hook| hook(path, stat))
            .unwrap_or_default()
    }

    pub(crate) fn directory(&self, path: &Path, request_path: &str) -> Option<ResponseFragment> {
        self.on_directory
            .as_ref()
            .and_then(|hook| hook(path, request_path))
    }

    pub(crate) fn error(&self, error: &SendError) -> Option<ResponseFragment> {
        self.on_error.as_ref().and_then(|hook| hook(error))
    }
}

impl fmt::Debug for SendHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendHooks")
            .field("on_file", &self.on_file.is_some())
            .field("on_directory", &self.on_directory.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
