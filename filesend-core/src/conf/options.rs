use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::conf::OptionsError;
use crate::static_files::resolve::lexical_normalize;

/// Upper bound for `max_age`: one year.
pub const MAX_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Default body chunk size.
pub const DEFAULT_HIGH_WATER_MARK: usize = 64 * 1024;

pub const DEFAULT_INDEX: &str = "index.html";

/// What to do with request paths that contain a dotfile segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotfilePolicy {
    /// Serve them like any other file.
    Allow,
    /// Respond 403.
    Deny,
    /// Respond 404, as if they did not exist.
    #[default]
    Ignore,
}

/// `false`, one name, or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NameList {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

/// Milliseconds, or a duration string such as `"1d"` or `"500ms"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaxAge {
    Millis(f64),
    Text(String),
}

/// Sender options as supplied by callers or config files.
///
/// Every field is optional; `None` means "use the default". Call
/// [`SendOptions::normalize`] to validate and apply defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SendOptions {
    /// Advertise and honour byte ranges. Default `true`.
    pub accept_ranges: Option<bool>,
    /// Emit `Cache-Control`. Default `true`.
    pub cache_control: Option<bool>,
    /// Emit `Content-Type`. Default `true`.
    pub content_type: Option<bool>,
    /// Emit a weak `ETag`. Default `true`.
    pub etag: Option<bool>,
    /// Emit `Last-Modified`. Default `true`.
    pub last_modified: Option<bool>,
    pub dotfiles: Option<DotfilePolicy>,
    /// Suffixes tried, in order, for missing extension-less paths.
    pub extensions: Option<NameList>,
    /// Add `immutable` to `Cache-Control`. Default `false`.
    pub immutable: Option<bool>,
    /// Index file names. Default `["index.html"]`; `false` disables.
    pub index: Option<NameList>,
    #[serde(alias = "maxage", alias = "maxAge")]
    pub max_age: Option<MaxAge>,
    /// Cap on the length of a single 206 response.
    pub max_content_range_chunk_size: Option<u64>,
    /// Directory requests are confined to. Unset means unrestricted.
    pub root: Option<PathBuf>,
    /// First byte of the file to serve.
    pub start: Option<u64>,
    /// Last byte (inclusive) of the file to serve.
    pub end: Option<u64>,
    /// Body chunk size in bytes.
    pub high_water_mark: Option<usize>,
}

/// Validated options with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SendSettings {
    pub accept_ranges: bool,
    pub cache_control: bool,
    pub content_type: bool,
    pub etag: bool,
    pub last_modified: bool,
    pub dotfiles: DotfilePolicy,
    pub extensions: Vec<String>,
    pub immutable: bool,
    pub index: Vec<String>,
    pub max_age: Duration,
    pub max_content_range_chunk_size: Option<u64>,
    pub root: Option<PathBuf>,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub high_water_mark: usize,
}

impl Default for SendSettings {
    fn default() -> Self {
        Self {
            accept_ranges: true,
            cache_control: true,
            content_type: true,
            etag: true,
            last_modified: true,
            dotfiles: DotfilePolicy::Ignore,
            extensions: Vec::new(),
            immutable: false,
            index: vec![DEFAULT_INDEX.to_string()],
            max_age: Duration::ZERO,
            max_content_range_chunk_size: None,
            root: None,
            start: None,
            end: None,
            high_water_mark: DEFAULT_HIGH_WATER_MARK,
        }
    }
}

impl SendOptions {
    pub fn normalize(self) -> Result<SendSettings, OptionsError> {
        let defaults = SendSettings::default();

        let extensions = match self.extensions {
            Some(list) => names(list, "extensions")?
                .into_iter()
                .map(|ext| ext.strip_prefix('.').map(str::to_string).unwrap_or(ext))
                .collect(),
            None => defaults.extensions,
        };

        let index = match self.index {
            Some(list) => names(list, "index")?,
            None => defaults.index,
        };

        let root = match self.root {
            Some(root) if !root.as_os_str().is_empty() => {
                let absolute = std::path::absolute(&root)
                    .map_err(|source| OptionsError::InvalidRoot { path: root, source })?;
                Some(lexical_normalize(&absolute))
            }
            _ => None,
        };

        Ok(SendSettings {
            accept_ranges: self.accept_ranges.unwrap_or(defaults.accept_ranges),
            cache_control: self.cache_control.unwrap_or(defaults.cache_control),
            content_type: self.content_type.unwrap_or(defaults.content_type),
            etag: self.etag.unwrap_or(defaults.etag),
            last_modified: self.last_modified.unwrap_or(defaults.last_modified),
            dotfiles: self.dotfiles.unwrap_or(defaults.dotfiles),
            extensions,
            immutable: self.immutable.unwrap_or(defaults.immutable),
            index,
            max_age: self.max_age.map_or(defaults.max_age, max_age_duration),
            max_content_range_chunk_size: self.max_content_range_chunk_size.filter(|n| *n > 0),
            root,
            start: self.start,
            end: self.end,
            high_water_mark: self
                .high_water_mark
                .filter(|n| *n > 0)
                .unwrap_or(defaults.high_water_mark),
        })
    }
}

fn names(list: NameList, option: &'static str) -> Result<Vec<String>, OptionsError> {
    let names = match list {
        NameList::Flag(false) => Vec::new(),
        NameList::Flag(true) => return Err(OptionsError::InvalidList { option }),
        NameList::One(name) => vec![name],
        NameList::Many(names) => names,
    };

    if names.iter().any(|name| name.is_empty()) {
        return Err(OptionsError::EmptyName { option });
    }

    Ok(names)
}

/// Negative and unparsable values become zero; everything is capped at
/// [`MAX_MAX_AGE`].
fn max_age_duration(max_age: MaxAge) -> Duration {
    let millis = match max_age {
        MaxAge::Millis(millis) => millis,
        MaxAge::Text(text) => match parse_max_age(&text) {
            Some(millis) => millis,
            None => {
                tracing::warn!(value = %text, "unparsable max_age, using 0");
                0.0
            }
        },
    };

    if millis.is_nan() || millis <= 0.0 {
        return Duration::ZERO;
    }

    Duration::from_millis(millis as u64).min(MAX_MAX_AGE)
}

fn parse_max_age(text: &str) -> Option<f64> {
    let text = text.trim();

    if let Ok(millis) = text.parse::<f64>() {
        return Some(millis);
    }

    humantime::parse_duration(text)
        .ok()
        .map(|d| d.as_millis() as f64)
}
