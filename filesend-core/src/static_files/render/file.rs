use std::path::{Path, PathBuf};

use http::StatusCode;

use crate::static_files::body::SendBody;
use crate::static_files::error::SendError;
use crate::static_files::fs::FileStat;
use crate::static_files::handler::SendContext;
use crate::static_files::mime::{MimeLookup, is_utf8_mime};
use crate::static_files::render::conditional::ConditionalNegotiator;
use crate::static_files::render::error::render_error;
use crate::static_files::render::etag::generate_etag;
use crate::static_files::render::headers::HeaderBuilder;
use crate::static_files::render::range::{is_bytes_range, parse_range_header};
use crate::static_files::response::{OutcomeKind, SendOutcome};

/// Precondition verdicts, taken against the headers as assembled before any
/// range is applied.
struct Validation {
    precondition_failed: bool,
    not_modified: bool,
    range_fresh: bool,
}

pub(crate) fn render_file(ctx: &SendContext<'_>, path: PathBuf, stat: FileStat) -> SendOutcome {
    let settings = ctx.settings;

    // Hook headers are seeded first so they win over the defaults below.
    let mut headers = HeaderBuilder::seeded(ctx.hooks.file_headers(&path, &stat));

    if settings.accept_ranges {
        headers.accept_ranges();
    }
    if settings.cache_control {
        headers.cache_control(settings.max_age, settings.immutable);
    }
    if settings.last_modified {
        headers.last_modified(stat.modified);
    }
    if settings.etag {
        headers.etag(&generate_etag(stat.size, stat.modified));
    }
    if settings.content_type {
        if let Some(content_type) = content_type_for(ctx.mime, &path) {
            headers.content_type(&content_type);
        }
    }

    let validation = {
        let negotiator = ConditionalNegotiator::new(&ctx.conditional, headers.as_map());
        let conditional = negotiator.is_conditional();
        Validation {
            precondition_failed: conditional && negotiator.precondition_failed(),
            not_modified: conditional && negotiator.not_modified(),
            range_fresh: negotiator.range_is_fresh(),
        }
    };

    if validation.precondition_failed {
        return render_error(ctx, SendError::PreconditionFailed);
    }

    let mut status = StatusCode::OK;

    // The status is still 200 here, so a 304 may stand in for it.
    if validation.not_modified {
        headers.strip_entity_headers();
        tracing::debug!(path = %path.display(), status = 304, "not modified");

        return SendOutcome {
            status: StatusCode::NOT_MODIFIED,
            headers: headers.build(),
            body: SendBody::empty(),
            kind: OutcomeKind::File { path, stat },
        };
    }

    // Window selected by the start/end options.
    let mut offset = settings.start.unwrap_or(0);
    let mut len = stat.size.saturating_sub(offset);
    if let Some(end) = settings.end {
        len = len.min(end.saturating_add(1).saturating_sub(offset));
    }

    let range_header = ctx
        .conditional
        .range
        .as_deref()
        .filter(|header| settings.accept_ranges && is_bytes_range(header));

    if let Some(range_header) = range_header.filter(|_| validation.range_fresh) {
        let ranges = parse_range_header(len, range_header);

        match ranges.as_slice() {
            [] => {
                return render_error(ctx, SendError::RangeNotSatisfiable { length: len });
            }
            [range] => {
                let mut range = *range;
                if let Some(chunk) = settings.max_content_range_chunk_size.filter(|n| *n > 0) {
                    range.end = range.end.min(range.start.saturating_add(chunk - 1));
                }

                status = StatusCode::PARTIAL_CONTENT;
                headers.content_range(Some(&range), len);
                offset += range.start;
                len = range.len();
            }
            // No multipart/byteranges; serve the whole window instead.
            _ => {
                tracing::debug!(ranges = ranges.len(), "multiple ranges requested, sending full content");
            }
        }
    }

    headers.content_length(len);

    let body = if ctx.request.is_head() {
        SendBody::empty()
    } else {
        SendBody::file_range(
            ctx.fs.clone(),
            path.clone(),
            offset..offset + len,
            settings.high_water_mark,
        )
    };

    tracing::debug!(
        path = %path.display(),
        status = status.as_u16(),
        offset,
        len,
        "sending file"
    );

    SendOutcome {
        status,
        headers: headers.build(),
        body,
        kind: OutcomeKind::File { path, stat },
    }
}

fn content_type_for(mime: &dyn MimeLookup, path: &Path) -> Option<String> {
    let content_type = mime
        .mime_type_of(path)
        .or_else(|| mime.default_type().map(str::to_string))?;

    if is_utf8_mime(&content_type) {
        Some(format!("{content_type}; charset=utf-8"))
    } else {
        Some(content_type)
    }
}
