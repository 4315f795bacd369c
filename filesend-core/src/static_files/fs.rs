use std::fmt::Debug;
use std::io;
use std::ops::Range;
use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt};

/// Metadata for one filesystem entry, read fresh on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified: SystemTime,
    pub is_directory: bool,
}

pub type RangeReader = Box<dyn AsyncRead + Send + Unpin>;

/// The filesystem as seen by the sender: a stat call and a bounded reader.
#[async_trait]
pub trait FileSystem: Debug + Send + Sync {
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Opens `path` positioned at `range.start`, yielding at most
    /// `range.end - range.start` bytes.
    async fn open_range(&self, path: &Path, range: Range<u64>) -> io::Result<RangeReader>;
}

/// [`FileSystem`] backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path).await?;

        Ok(FileStat {
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            is_directory: metadata.is_dir(),
        })
    }

    async fn open_range(&self, path: &Path, range: Range<u64>) -> io::Result<RangeReader> {
        let mut file = fs::File::open(path).await?;

        if range.start > 0 {
            file.seek(io::SeekFrom::Start(range.start)).await?;
        }

        let remaining = range.end.saturating_sub(range.start);
        Ok(Box::new(file.take(remaining)))
    }
}
