use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters `encodeURI` would escape, minus `%` (handled separately so
/// existing escapes survive).
const URL_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A minimal self-contained HTML page.
pub fn html_document(title: &str, body: &str) -> Bytes {
    Bytes::from(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<pre>{body}</pre>\n</body>\n</html>\n"
    ))
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes a URL for a `Location` header. Well-formed `%XX`
/// sequences are kept; a stray `%` becomes `%25`.
pub fn encode_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], URL_ESCAPE));

        let escape = rest.as_bytes().get(pos + 1..pos + 3);
        if escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            out.push_str(&rest[pos..pos + 3]);
            rest = &rest[pos + 3..];
        } else {
            out.push_str("%25");
            rest = &rest[pos + 1..];
        }
    }
    out.extend(utf8_percent_encode(rest, URL_ESCAPE));

    out
}

/// `//evil.example/` would be protocol-relative; keep a single slash.
pub fn collapse_leading_slashes(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if trimmed.len() == path.len() {
        path.to_string()
    } else {
        format!("/{trimmed}")
    }
}
