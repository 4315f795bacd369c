use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::conf::{OptionsError, SendOptions, SendSettings};
use crate::static_files::error::SendError;
use crate::static_files::fs::{FileSystem, TokioFs};
use crate::static_files::hooks::SendHooks;
use crate::static_files::mime::{MimeGuess, MimeLookup};
use crate::static_files::render::{render_directory, render_error, render_file};
use crate::static_files::resolve::{ResolvedPath, check_dotfiles, resolve_request_path};
use crate::static_files::{ConditionalHeaders, SendOutcome, SendRequest};

/// Everything one request needs, borrowed for the duration of the send.
pub(crate) struct SendContext<'a> {
    pub(crate) request: &'a SendRequest,
    pub(crate) conditional: ConditionalHeaders,
    pub(crate) request_path: &'a str,
    pub(crate) settings: &'a SendSettings,
    pub(crate) fs: &'a Arc<dyn FileSystem>,
    pub(crate) mime: &'a dyn MimeLookup,
    pub(crate) hooks: &'a SendHooks,
}

/// Turns request paths into [`SendOutcome`]s under one set of settings.
///
/// A `Sender` holds no per-request state and can be shared freely.
#[derive(Debug, Clone)]
pub struct Sender {
    settings: SendSettings,
    fs: Arc<dyn FileSystem>,
    mime: Arc<dyn MimeLookup>,
    hooks: SendHooks,
}

impl Sender {
    pub fn new(options: SendOptions) -> Result<Self, OptionsError> {
        Ok(Self::from_settings(options.normalize()?))
    }

    pub fn from_settings(settings: SendSettings) -> Self {
        Self {
            settings,
            fs: Arc::new(TokioFs),
            mime: Arc::new(MimeGuess::default()),
            hooks: SendHooks::default(),
        }
    }

    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    pub fn with_mime_lookup(mut self, mime: impl MimeLookup + 'static) -> Self {
        self.mime = Arc::new(mime);
        self
    }

    pub fn with_hooks(mut self, hooks: SendHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn settings(&self) -> &SendSettings {
        &self.settings
    }

    /// Resolves `path` (the URL-encoded request path) into a response.
    ///
    /// Every failure is folded into an error outcome; this never fails.
    pub async fn send(&self, request: &SendRequest, path: &str) -> SendOutcome {
        let ctx = SendContext {
            request,
            conditional: ConditionalHeaders::from_headers(&request.headers),
            request_path: path,
            settings: &self.settings,
            fs: &self.fs,
            mime: self.mime.as_ref(),
            hooks: &self.hooks,
        };

        tracing::debug!(method = %request.method, path, "resolving static request");

        let resolved = match resolve_request_path(path, self.settings.root.as_deref())
            .and_then(|resolved| {
                check_dotfiles(&resolved.segments, self.settings.dotfiles).map(|_| resolved)
            }) {
            Ok(resolved) => resolved,
            Err(err) => return render_error(&ctx, err.into()),
        };

        if !self.settings.index.is_empty() && resolved.trailing_slash {
            return self.send_index(&ctx, &resolved.absolute_path).await;
        }

        self.send_file(&ctx, resolved).await
    }

    /// Tries each index name in declared order. The first regular file wins.
    async fn send_index(&self, ctx: &SendContext<'_>, dir: &Path) -> SendOutcome {
        let mut last_err: Option<io::Error> = None;

        for name in &self.settings.index {
            let candidate = dir.join(name);
            match self.fs.stat(&candidate).await {
                Ok(stat) if stat.is_directory => continue,
                Ok(stat) => return render_file(ctx, candidate, stat),
                Err(err) => last_err = Some(err),
            }
        }

        render_error(ctx, exhausted(last_err))
    }

    async fn send_file(&self, ctx: &SendContext<'_>, resolved: ResolvedPath) -> SendOutcome {
        let path = resolved.absolute_path;

        match self.fs.stat(&path).await {
            Ok(stat) if stat.is_directory => render_directory(ctx, path, resolved.trailing_slash),
            // A regular file addressed as a directory.
            Ok(_) if resolved.trailing_slash => render_error(ctx, SendError::not_found()),
            Ok(stat) => render_file(ctx, path, stat),
            Err(err)
                if err.kind() == io::ErrorKind::NotFound
                    && path.extension().is_none()
                    && !resolved.trailing_slash =>
            {
                self.send_with_extensions(ctx, &path, err).await
            }
            Err(err) => render_error(ctx, SendError::from_io(err)),
        }
    }

    /// Retries a missing extension-less path with each configured extension.
    async fn send_with_extensions(
        &self,
        ctx: &SendContext<'_>,
        path: &Path,
        err: io::Error,
    ) -> SendOutcome {
        let mut last_err = Some(err);

        for extension in &self.settings.extensions {
            let candidate = with_extension_suffix(path, extension);
            match self.fs.stat(&candidate).await {
                Ok(stat) if stat.is_directory => last_err = None,
                Ok(stat) => return render_file(ctx, candidate, stat),
                Err(err) => last_err = Some(err),
            }
        }

        render_error(ctx, exhausted(last_err))
    }
}

/// One-shot [`Sender`]: normalizes `options` and sends `path`.
pub async fn send(
    request: &SendRequest,
    path: &str,
    options: SendOptions,
) -> Result<SendOutcome, OptionsError> {
    let sender = Sender::new(options)?;
    Ok(sender.send(request, path).await)
}

fn exhausted(last_err: Option<io::Error>) -> SendError {
    last_err.map_or_else(SendError::not_found, SendError::from_io)
}

fn with_extension_suffix(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
