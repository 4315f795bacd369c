use std::fmt;
use std::io;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures_util::stream::Stream;
use tokio::io::AsyncReadExt;

use crate::static_files::fs::{FileSystem, RangeReader};

/// Response body handed to the caller.
///
/// File bodies are lazy: nothing is opened until the first chunk is pulled.
/// Dropping the body (or calling [`SendBody::destroy`]) releases the reader.
pub struct SendBody {
    state: BodyState,
}

enum BodyState {
    Empty,
    Bytes(Bytes),
    Pending {
        fs: Arc<dyn FileSystem>,
        path: PathBuf,
        range: Range<u64>,
        chunk_size: usize,
    },
    Reading {
        reader: RangeReader,
        remaining: u64,
        chunk_size: usize,
    },
    Done,
}

impl SendBody {
    pub fn empty() -> Self {
        Self {
            state: BodyState::Empty,
        }
    }

    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            state: BodyState::Bytes(bytes.into()),
        }
    }

    pub(crate) fn file_range(
        fs: Arc<dyn FileSystem>,
        path: PathBuf,
        range: Range<u64>,
        chunk_size: usize,
    ) -> Self {
        if range.is_empty() {
            return Self::empty();
        }

        Self {
            state: BodyState::Pending {
                fs,
                path,
                range,
                chunk_size: chunk_size.max(1),
            },
        }
    }

    /// Number of bytes this body will yield, when known up front.
    pub fn len_hint(&self) -> Option<u64> {
        match &self.state {
            BodyState::Empty | BodyState::Done => Some(0),
            BodyState::Bytes(bytes) => Some(bytes.len() as u64),
            BodyState::Pending { range, .. } => Some(range.end - range.start),
            BodyState::Reading { remaining, .. } => Some(*remaining),
        }
    }

    /// Pulls the next chunk. Returns `None` once the body is exhausted,
    /// after an error, or after [`SendBody::destroy`].
    pub async fn next_chunk(&mut self) -> Option<io::Result<Bytes>> {
        loop {
            match std::mem::replace(&mut self.state, BodyState::Done) {
                BodyState::Empty | BodyState::Done => return None,
                BodyState::Bytes(bytes) => {
                    if bytes.is_empty() {
                        return None;
                    }
                    return Some(Ok(bytes));
                }
                BodyState::Pending {
                    fs,
                    path,
                    range,
                    chunk_size,
                } => {
                    let remaining = range.end - range.start;
                    match fs.open_range(&path, range).await {
                        Ok(reader) => {
                            self.state = BodyState::Reading {
                                reader,
                                remaining,
                                chunk_size,
                            };
                        }
                        Err(err) => {
                            tracing::warn!(path = %path.display(), error = %err, "failed to open file body");
                            return Some(Err(err));
                        }
                    }
                }
                BodyState::Reading {
                    mut reader,
                    remaining,
                    chunk_size,
                } => {
                    if remaining == 0 {
                        return None;
                    }

                    let want = remaining.min(chunk_size as u64) as usize;
                    let mut buf = BytesMut::zeroed(want);

                    return match reader.read(&mut buf[..]).await {
                        Ok(0) => Some(Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            format!("file ended with {remaining} bytes outstanding"),
                        ))),
                        Ok(n) => {
                            buf.truncate(n);
                            self.state = BodyState::Reading {
                                reader,
                                remaining: remaining - n as u64,
                                chunk_size,
                            };
                            Some(Ok(buf.freeze()))
                        }
                        Err(err) => Some(Err(err)),
                    };
                }
            }
        }
    }

    /// Releases the underlying reader. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.state = BodyState::Done;
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, BodyState::Done)
    }

    /// Reads the whole body into memory.
    pub async fn collect(mut self) -> io::Result<Bytes> {
        let mut out = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out.freeze())
    }

    pub fn into_stream(self) -> impl Stream<Item = io::Result<Bytes>> + Send {
        futures_util::stream::unfold(self, |mut body| async move {
            let chunk = body.next_chunk().await?;
            Some((chunk, body))
        })
    }
}

impl Default for SendBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SendBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            BodyState::Empty => "empty",
            BodyState::Bytes(_) => "bytes",
            BodyState::Pending { .. } => "pending",
            BodyState::Reading { .. } => "reading",
            BodyState::Done => "done",
        };

        f.debug_struct("SendBody")
            .field("state", &state)
            .field("len_hint", &self.len_hint())
            .finish()
    }
}
