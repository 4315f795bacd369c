use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use crate::conf::DotfilePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    Forbidden,
    BadPath,
}

/// A request path mapped onto the filesystem.
///
/// `segments` is the decoded, normalized request path split on `/`. It is only
/// used for dotfile detection, never for filesystem access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub absolute_path: PathBuf,
    pub segments: Vec<String>,
    pub trailing_slash: bool,
}

/// Decodes and confines `raw_path`.
///
/// The trailing slash is read from the raw path; an encoded `%2F` does not
/// count.
///
/// With a `root`, the traversal check runs on the request path normalized
/// against a synthetic anchor, before joining. A configured root may itself
/// contain `..`; a request may not climb out of it.
pub fn resolve_request_path(
    raw_path: &str,
    root: Option<&Path>,
) -> Result<ResolvedPath, ResolveError> {
    let decoded = decode_path(raw_path).ok_or(ResolveError::BadPath)?;

    // Reject NUL bytes outright.
    if decoded.contains('\0') {
        return Err(ResolveError::BadPath);
    }

    match root {
        Some(root) => {
            let relative = if decoded.is_empty() {
                String::new()
            } else {
                normalize(&format!("./{decoded}"))
            };

            if has_up_segment(&relative) {
                return Err(ResolveError::Forbidden);
            }

            Ok(ResolvedPath {
                absolute_path: lexical_normalize(&root.join(&relative)),
                trailing_slash: raw_path.ends_with('/'),
                segments: split_segments(&relative),
            })
        }
        None => {
            if has_up_segment(&decoded) {
                return Err(ResolveError::Forbidden);
            }

            let target = if decoded.is_empty() { "." } else { &decoded };
            let absolute = std::path::absolute(target).map_err(|_| ResolveError::BadPath)?;

            Ok(ResolvedPath {
                absolute_path: lexical_normalize(&absolute),
                trailing_slash: raw_path.ends_with('/'),
                segments: split_segments(&normalize(&decoded)),
            })
        }
    }
}

/// A segment other than `.` that starts with a dot.
pub fn contains_dotfile(segments: &[String]) -> bool {
    segments
        .iter()
        .any(|segment| segment.len() > 1 && segment.starts_with('.'))
}

pub fn check_dotfiles(segments: &[String], policy: DotfilePolicy) -> Result<(), ResolveError> {
    if !contains_dotfile(segments) {
        return Ok(());
    }

    match policy {
        DotfilePolicy::Allow => Ok(()),
        DotfilePolicy::Deny => Err(ResolveError::Forbidden),
        DotfilePolicy::Ignore => Err(ResolveError::NotFound),
    }
}

/// Percent-decodes a URL path component. Fails on a `%` that is not
/// followed by two hex digits and on sequences that are not UTF-8.
pub(crate) fn decode_path(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

/// Textual `/`-path normalization: collapses repeated slashes, drops `.`,
/// resolves `..` against preceding segments and keeps a trailing slash.
/// Leading `..` survive on relative paths and vanish on absolute ones.
pub(crate) fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|s| *s != "..") {
                    stack.pop();
                } else if !absolute {
                    stack.push("..");
                }
            }
            _ => stack.push(segment),
        }
    }

    let mut normalized = String::new();
    if absolute {
        normalized.push('/');
    }
    normalized.push_str(&stack.join("/"));

    if normalized.is_empty() {
        normalized.push('.');
    }
    if trailing && !normalized.ends_with('/') {
        normalized.push('/');
    }

    normalized
}

/// Same idea as [`normalize`] over path components, without touching the
/// filesystem. Used for the configured root and the joined target.
pub(crate) fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    out
}

/// A `..` segment anywhere, with either separator.
fn has_up_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/').map(str::to_string).collect()
}
