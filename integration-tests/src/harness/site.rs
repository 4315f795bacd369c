use std::mem;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use bytes::Bytes;
use filesend_core::static_files::{OutcomeKind, SendHooks};
use filesend_core::{SendOptions, SendRequest, Sender};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use tempfile::TempDir;

use crate::harness::fixtures::write_fixture_tree;
use crate::harness::{CapturedEvent, init_test_tracing};

/// A fixture tree in a temporary directory plus a [`Sender`] rooted there.
///
/// The directory is removed when the site is dropped.
pub struct TestSite {
    dir: TempDir,
    sender: Sender,
}

/// A fully collected send outcome.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub kind: &'static str,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("body is not utf-8")
    }
}

impl TestSite {
    /// Builds the fixture tree and a sender rooted at it. An explicit
    /// `root` in `options` is resolved relative to the temp directory.
    pub fn start(options: SendOptions) -> Self {
        Self::start_with_hooks(options, SendHooks::default())
    }

    pub fn start_with_hooks(options: SendOptions, hooks: SendHooks) -> Self {
        // Tracing first, so option normalization is captured too.
        init_test_tracing(events());

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_fixture_tree(dir.path()).expect("failed to write fixture tree");

        let root = match &options.root {
            Some(root) => dir.path().join(root),
            None => dir.path().to_path_buf(),
        };
        let options = SendOptions {
            root: Some(root),
            ..options
        };

        let sender = Sender::new(options)
            .expect("invalid send options")
            .with_hooks(hooks);

        Self { dir, sender }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, &[]).await
    }

    pub async fn get_with(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(Method::GET, path, headers).await
    }

    pub async fn head(&self, path: &str) -> TestResponse {
        self.request(Method::HEAD, path, &[]).await
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            header_map.append(
                name.parse::<HeaderName>().expect("invalid header name"),
                HeaderValue::from_str(value).expect("invalid header value"),
            );
        }

        let request = SendRequest::new(method, header_map);
        let mut outcome = self.sender.send(&request, path).await;

        let body = mem::take(&mut outcome.body)
            .collect()
            .await
            .expect("failed to collect body");

        let kind = match outcome.kind {
            OutcomeKind::File { .. } => "file",
            OutcomeKind::Directory { .. } => "directory",
            OutcomeKind::Error { .. } => "error",
        };

        TestResponse {
            status: outcome.status,
            headers: outcome.headers,
            body,
            kind,
        }
    }

    /// Captured events whose `path` field points inside this site.
    pub fn events(&self) -> Vec<CapturedEvent> {
        let root = self.dir.path().display().to_string();

        events()
            .lock()
            .unwrap()
            .iter()
            .filter(|event| {
                event
                    .field("path")
                    .is_some_and(|path| path.starts_with(&root))
            })
            .cloned()
            .collect()
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

pub fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}
