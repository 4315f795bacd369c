use bytes::Bytes;

use crate::static_files::body::SendBody;
use crate::static_files::error::SendError;
use crate::static_files::handler::SendContext;
use crate::static_files::render::headers::HeaderBuilder;
use crate::static_files::render::html::{escape_html, html_document};
use crate::static_files::response::{OutcomeKind, SendOutcome};

pub(crate) fn render_error(ctx: &SendContext<'_>, error: SendError) -> SendOutcome {
    let mut status = error.status();
    let mut headers = HeaderBuilder::default();

    let body = match ctx.hooks.error(&error) {
        Some(fragment) => {
            status = fragment.status;
            headers.merge(fragment.headers);
            fragment.body
        }
        None => {
            let message = status.canonical_reason().unwrap_or("Error");
            html_document("Error", &escape_html(message))
        }
    };

    headers.merge_defaults(error.headers());
    headers.html_document(body.len() as u64);

    if let SendError::Io(err) = &error {
        tracing::warn!(
            status = status.as_u16(),
            path = ctx.request_path,
            error = %err,
            "filesystem error while sending"
        );
    } else {
        tracing::debug!(
            status = status.as_u16(),
            path = ctx.request_path,
            error = %error,
            "sending error response"
        );
    }

    SendOutcome {
        status,
        headers: headers.build(),
        body: body_of(body),
        kind: OutcomeKind::Error { error },
    }
}

fn body_of(bytes: Bytes) -> SendBody {
    if bytes.is_empty() {
        SendBody::empty()
    } else {
        SendBody::bytes(bytes)
    }
}
