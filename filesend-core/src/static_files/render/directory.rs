use std::path::PathBuf;

use http::StatusCode;

use crate::static_files::body::SendBody;
use crate::static_files::error::SendError;
use crate::static_files::handler::SendContext;
use crate::static_files::render::error::render_error;
use crate::static_files::render::headers::HeaderBuilder;
use crate::static_files::render::html::{
    collapse_leading_slashes, encode_url, escape_html, html_document,
};
use crate::static_files::response::{OutcomeKind, SendOutcome};

/// A directory was hit outside index lookup.
///
/// Without a trailing slash this redirects to the slashed URL so index lookup
/// can run; with index disabled, or when the slash is already there, it is a
/// 403. A directory hook takes precedence over both.
pub(crate) fn render_directory(
    ctx: &SendContext<'_>,
    path: PathBuf,
    trailing_slash: bool,
) -> SendOutcome {
    if let Some(fragment) = ctx.hooks.directory(&path, ctx.request_path) {
        let mut headers = HeaderBuilder::seeded(fragment.headers);
        headers.content_length(fragment.body.len() as u64);

        return SendOutcome {
            status: fragment.status,
            headers: headers.build(),
            body: SendBody::bytes(fragment.body),
            kind: OutcomeKind::Directory {
                path,
                request_path: ctx.request_path.to_string(),
            },
        };
    }

    if trailing_slash || ctx.settings.index.is_empty() {
        return render_error(ctx, SendError::Forbidden);
    }

    let location = encode_url(&collapse_leading_slashes(&format!("{}/", ctx.request_path)));
    let body = html_document(
        "Redirecting",
        &format!("Redirecting to {}", escape_html(&location)),
    );

    let mut headers = HeaderBuilder::default();
    headers.html_document(body.len() as u64);
    headers.location(&location);

    tracing::debug!(path = %path.display(), location = %location, "redirecting directory");

    SendOutcome {
        status: StatusCode::MOVED_PERMANENTLY,
        headers: headers.build(),
        body: SendBody::bytes(body),
        kind: OutcomeKind::Directory {
            path,
            request_path: ctx.request_path.to_string(),
        },
    }
}
