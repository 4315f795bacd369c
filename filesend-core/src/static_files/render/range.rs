/// One satisfiable byte range. `end` is inclusive; `index` is the position of
/// the originating entry in the `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub index: u32,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Whether a `Range` header uses the `bytes` unit.
pub fn is_bytes_range(header: &str) -> bool {
    header.trim_start_matches(' ').starts_with("bytes=")
}

/// Parses a `Range` header against a resource of `size` bytes.
///
/// Invalid entries are dropped. Two or more survivors are coalesced into the
/// minimal set of disjoint, non-adjacent ranges, reported in the order their
/// first member appeared in the header. An empty result means nothing is
/// satisfiable.
pub fn parse_range_header(size: u64, header: &str) -> Vec<ByteRange> {
    let Some((_, entries)) = header.split_once('=') else {
        return Vec::new();
    };

    let ranges: Vec<ByteRange> = entries
        .split(',')
        .enumerate()
        .filter_map(|(index, entry)| resolve_entry(size, entry, index as u32))
        .collect();

    if ranges.len() < 2 {
        return ranges;
    }

    combine_ranges(ranges)
}

/// Formats a `Content-Range` value. `None` yields the unsatisfied form.
pub fn content_range(size: u64, range: Option<&ByteRange>) -> String {
    match range {
        Some(range) => format!("bytes {}-{}/{}", range.start, range.end, size),
        None => format!("bytes */{size}"),
    }
}

fn resolve_entry(size: u64, entry: &str, index: u32) -> Option<ByteRange> {
    let mut parts = entry.split('-');
    let start = parts.next().and_then(parse_leading_int);
    let end = parts.next().and_then(parse_leading_int);

    let size = i128::from(size);
    let (start, end) = match (start, end) {
        // suffix: the last N bytes
        (None, Some(suffix)) => (size - suffix, size - 1),
        (Some(start), None) => (start, size - 1),
        (Some(start), Some(end)) => (start, end.min(size - 1)),
        (None, None) => return None,
    };

    if start < 0 || start > end {
        return None;
    }

    Some(ByteRange {
        start: start as u64,
        end: end as u64,
        index,
    })
}

fn combine_ranges(mut ranges: Vec<ByteRange>) -> Vec<ByteRange> {
    ranges.sort_by_key(|r| r.start);

    let mut combined: Vec<ByteRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match combined.last_mut() {
            Some(current) if range.start <= current.end.saturating_add(1) => {
                current.end = current.end.max(range.end);
                current.index = current.index.min(range.index);
            }
            _ => combined.push(range),
        }
    }

    combined.sort_by_key(|r| r.index);
    combined
}

/// Leading decimal digits after optional whitespace. Trailing garbage is
/// ignored; no digits at all is `None`.
fn parse_leading_int(s: &str) -> Option<i128> {
    let digits: &str = {
        let s = s.trim_start();
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        &s[..end]
    };

    if digits.is_empty() {
        return None;
    }

    Some(digits.bytes().fold(0i128, |acc, b| {
        acc.saturating_mul(10).saturating_add(i128::from(b - b'0'))
    }))
}
