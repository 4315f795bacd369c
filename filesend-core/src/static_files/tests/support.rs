use std::collections::HashMap;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::conf::SendOptions;
use crate::static_files::fs::{FileStat, FileSystem, RangeReader};
use crate::static_files::{SendRequest, Sender};

/// 2023-11-14T22:13:20Z
pub(crate) const MTIME_SECS: u64 = 1_700_000_000;
pub(crate) const NAME_TXT_ETAG: &str = "W/\"4-18bcfe56800\"";
pub(crate) const NAME_TXT_LAST_MODIFIED: &str = "Tue, 14 Nov 2023 22:13:20 GMT";
pub(crate) const BEFORE_MTIME: &str = "Tue, 14 Nov 2023 22:12:20 GMT";
pub(crate) const AFTER_MTIME: &str = "Tue, 14 Nov 2023 22:14:20 GMT";

pub(crate) fn mtime() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(MTIME_SECS)
}

#[derive(Debug, Clone)]
enum Entry {
    File(Bytes),
    Dir,
}

/// In-memory [`FileSystem`] with a fixed mtime for every entry.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryFs {
    entries: HashMap<PathBuf, Entry>,
}

impl MemoryFs {
    pub(crate) fn file(mut self, path: &str, contents: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_parents(&path);
        self.entries
            .insert(path, Entry::File(Bytes::copy_from_slice(contents.as_bytes())));
        self
    }

    pub(crate) fn dir(mut self, path: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_parents(&path);
        self.entries.insert(path, Entry::Dir);
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                continue;
            }
            self.entries.insert(parent.to_path_buf(), Entry::Dir);
        }
    }
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        match self.entries.get(path) {
            Some(Entry::File(bytes)) => Ok(FileStat {
                size: bytes.len() as u64,
                modified: mtime(),
                is_directory: false,
            }),
            Some(Entry::Dir) => Ok(FileStat {
                size: 0,
                modified: mtime(),
                is_directory: true,
            }),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    async fn open_range(&self, path: &Path, range: Range<u64>) -> io::Result<RangeReader> {
        let Some(Entry::File(bytes)) = self.entries.get(path) else {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        };

        let len = bytes.len() as u64;
        let start = range.start.min(len) as usize;
        let end = range.end.min(len) as usize;
        Ok(Box::new(io::Cursor::new(bytes.slice(start..end))))
    }
}

/// The fixture tree most handler tests run against, rooted at `/srv`.
pub(crate) fn fixtures() -> MemoryFs {
    MemoryFs::default()
        .file("/srv/name.txt", "tobi")
        .file("/srv/nums.txt", "123456789")
        .file("/srv/page.html", "<p>page</p>")
        .file("/srv/pets/index.html", "tobi, loki, jane")
        .file("/srv/.hidden", "secret")
        .file("/srv/.mine/name.txt", "tobi")
        .file("/srv/data.json", "{}")
        .file("/srv/blob.unknownext", "xx")
        .dir("/srv/empty")
}

pub(crate) fn sender(options: SendOptions) -> Sender {
    let options = SendOptions {
        root: options.root.or_else(|| Some(PathBuf::from("/srv"))),
        ..options
    };

    Sender::new(options)
        .expect("valid options")
        .with_file_system(fixtures())
}

pub(crate) fn get(headers: &[(&str, &str)]) -> SendRequest {
    request(Method::GET, headers)
}

pub(crate) fn request(method: Method, headers: &[(&str, &str)]) -> SendRequest {
    let mut header_map = HeaderMap::new();
    for (k, v) in headers {
        let name: HeaderName = k.parse().expect("invalid header name");
        let value: HeaderValue = v.parse().expect("invalid header value");
        header_map.append(name, value);
    }
    SendRequest::new(method, header_map)
}
