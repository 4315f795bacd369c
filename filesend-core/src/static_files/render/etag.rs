use std::time::SystemTime;

/// Generate a weak ETag from file size and modification time.
/// Format: `W/"<size hex>-<mtime millis hex>"`
pub fn generate_etag(size: u64, modified: SystemTime) -> String {
    let mtime_ms = modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("W/\"{:x}-{:x}\"", size, mtime_ms)
}

/// Check if any tag in a comma separated list matches `etag`, either
/// exactly or with one side carrying the `W/` prefix.
pub fn etag_list_matches(list: &str, etag: &str) -> bool {
    parse_token_list(list).any(|candidate| {
        candidate == etag
            || candidate.strip_prefix("W/") == Some(etag)
            || etag.strip_prefix("W/") == Some(candidate)
    })
}

fn parse_token_list(list: &str) -> impl Iterator<Item = &str> {
    list.split([',', ' ']).filter(|token| !token.is_empty())
}
