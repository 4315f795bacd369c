use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use pretty_assertions::assert_eq;

use crate::conf::{DotfilePolicy, MaxAge, NameList, SendOptions};
use crate::static_files::tests::support::{
    AFTER_MTIME, BEFORE_MTIME, NAME_TXT_ETAG, NAME_TXT_LAST_MODIFIED, fixtures, get, request,
    sender,
};
use crate::static_files::{
    FileStat, MimeGuess, OutcomeKind, ResponseFragment, SendError, SendHooks, SendOutcome,
    SendRequest, Sender,
};

async fn body_text(outcome: &mut SendOutcome) -> String {
    let bytes = std::mem::take(&mut outcome.body)
        .collect()
        .await
        .expect("body read");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn send_default(path: &str, headers: &[(&str, &str)]) -> SendOutcome {
    sender(SendOptions::default()).send(&get(headers), path).await
}

//-----------------------------------------------------------------------------
// Full content
//-----------------------------------------------------------------------------
#[tokio::test]
async fn serves_file_with_default_headers() {
    let mut outcome = send_default("/name.txt", &[]).await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("4"));
    assert_eq!(outcome.header(header::ACCEPT_RANGES), Some("bytes"));
    assert_eq!(outcome.header(header::CACHE_CONTROL), Some("public, max-age=0"));
    assert_eq!(outcome.header(header::ETAG), Some(NAME_TXT_ETAG));
    assert_eq!(
        outcome.header(header::LAST_MODIFIED),
        Some(NAME_TXT_LAST_MODIFIED)
    );
    assert_eq!(
        outcome.header(header::CONTENT_TYPE),
        Some("text/plain; charset=utf-8")
    );
    assert!(outcome.is_file());
    assert_eq!(body_text(&mut outcome).await, "tobi");
}

#[tokio::test]
async fn json_gets_charset_but_unknown_types_fall_back_to_octet_stream() {
    let json = send_default("/data.json", &[]).await;
    let blob = send_default("/blob.unknownext", &[]).await;

    assert_eq!(
        json.header(header::CONTENT_TYPE),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(
        blob.header(header::CONTENT_TYPE),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn disabled_headers_are_omitted() {
    let options = SendOptions {
        accept_ranges: Some(false),
        cache_control: Some(false),
        etag: Some(false),
        last_modified: Some(false),
        content_type: Some(false),
        ..Default::default()
    };

    let outcome = sender(options).send(&get(&[]), "/name.txt").await;

    assert_eq!(outcome.status, StatusCode::OK);
    for name in [
        header::ACCEPT_RANGES,
        header::CACHE_CONTROL,
        header::ETAG,
        header::LAST_MODIFIED,
        header::CONTENT_TYPE,
    ] {
        assert!(!outcome.headers.contains_key(&name), "{name} present");
    }
}

#[tokio::test]
async fn cache_control_reflects_max_age_and_immutable() {
    let options = SendOptions {
        max_age: Some(MaxAge::Text("1d".to_string())),
        immutable: Some(true),
        ..Default::default()
    };

    let outcome = sender(options).send(&get(&[]), "/name.txt").await;

    assert_eq!(
        outcome.header(header::CACHE_CONTROL),
        Some("public, max-age=86400, immutable")
    );
}

#[tokio::test]
async fn head_request_has_headers_but_no_body() {
    let mut outcome = sender(SendOptions::default())
        .send(&request(Method::HEAD, &[]), "/name.txt")
        .await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("4"));
    assert_eq!(body_text(&mut outcome).await, "");
}

#[tokio::test]
async fn start_and_end_options_select_a_window() {
    let options = SendOptions {
        start: Some(1),
        end: Some(2),
        ..Default::default()
    };

    let mut outcome = sender(options).send(&get(&[]), "/name.txt").await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("2"));
    assert_eq!(body_text(&mut outcome).await, "ob");
}

#[tokio::test]
async fn start_beyond_size_yields_empty_body() {
    let options = SendOptions {
        start: Some(10),
        ..Default::default()
    };

    let mut outcome = sender(options).send(&get(&[]), "/name.txt").await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("0"));
    assert_eq!(body_text(&mut outcome).await, "");
}

#[tokio::test]
async fn repeated_sends_are_identical() {
    let sender = sender(SendOptions::default());
    let request = get(&[("range", "bytes=0-1")]);

    let first = sender.send(&request, "/name.txt").await;
    let second = sender.send(&request, "/name.txt").await;

    assert_eq!(first.status, second.status);
    assert_eq!(first.headers, second.headers);
}

//-----------------------------------------------------------------------------
// Ranges
//-----------------------------------------------------------------------------
#[tokio::test]
async fn single_range_is_partial_content() {
    let mut outcome = send_default("/name.txt", &[("range", "bytes=0-0")]).await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes 0-0/4"));
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("1"));
    assert_eq!(body_text(&mut outcome).await, "t");
}

#[tokio::test]
async fn suffix_range_serves_the_tail() {
    let mut outcome = send_default("/name.txt", &[("range", "bytes=-2")]).await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes 2-3/4"));
    assert_eq!(body_text(&mut outcome).await, "bi");
}

#[tokio::test]
async fn unsatisfiable_range_is_416_with_content_range() {
    let mut outcome = send_default("/name.txt", &[("range", "bytes=9-50")]).await;

    assert_eq!(outcome.status, StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes */4"));
    assert_eq!(
        outcome.header(header::CONTENT_SECURITY_POLICY),
        Some("default-src 'none'")
    );
    assert_eq!(outcome.header(header::X_CONTENT_TYPE_OPTIONS), Some("nosniff"));
    assert!(matches!(
        outcome.error(),
        Some(SendError::RangeNotSatisfiable { length: 4 })
    ));
    assert!(body_text(&mut outcome).await.contains("Range Not Satisfiable"));
}

#[tokio::test]
async fn multiple_ranges_fall_back_to_full_content() {
    let mut outcome = send_default("/nums.txt", &[("range", "bytes=0-0,4-5")]).await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert!(!outcome.headers.contains_key(header::CONTENT_RANGE));
    assert_eq!(body_text(&mut outcome).await, "123456789");
}

#[tokio::test]
async fn adjacent_ranges_coalesce_into_one() {
    let mut outcome = send_default("/nums.txt", &[("range", "bytes=2-3,0-1")]).await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes 0-3/9"));
    assert_eq!(body_text(&mut outcome).await, "1234");
}

#[tokio::test]
async fn non_bytes_unit_is_ignored() {
    let outcome = send_default("/name.txt", &[("range", "items=0-1")]).await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("4"));
}

#[tokio::test]
async fn ranges_are_ignored_when_disabled() {
    let options = SendOptions {
        accept_ranges: Some(false),
        ..Default::default()
    };

    let outcome = sender(options)
        .send(&get(&[("range", "bytes=0-0")]), "/name.txt")
        .await;

    assert_eq!(outcome.status, StatusCode::OK);
}

#[tokio::test]
async fn range_chunk_size_clamps_the_end() {
    let options = SendOptions {
        max_content_range_chunk_size: Some(3),
        ..Default::default()
    };

    let mut outcome = sender(options)
        .send(&get(&[("range", "bytes=2-")]), "/nums.txt")
        .await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes 2-4/9"));
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("3"));
    assert_eq!(body_text(&mut outcome).await, "345");
}

#[tokio::test]
async fn ranges_apply_within_the_start_end_window() {
    let options = SendOptions {
        start: Some(2),
        end: Some(6),
        ..Default::default()
    };

    let mut outcome = sender(options)
        .send(&get(&[("range", "bytes=1-2")]), "/nums.txt")
        .await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes 1-2/5"));
    assert_eq!(body_text(&mut outcome).await, "45");
}

#[tokio::test]
async fn stale_if_range_etag_sends_full_content() {
    let outcome = send_default(
        "/name.txt",
        &[("range", "bytes=0-0"), ("if-range", "W/\"4-0\"")],
    )
    .await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("4"));
}

#[tokio::test]
async fn fresh_if_range_etag_honours_range() {
    let outcome = send_default(
        "/name.txt",
        &[("range", "bytes=0-0"), ("if-range", NAME_TXT_ETAG)],
    )
    .await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
}

#[tokio::test]
async fn if_range_date_compares_against_last_modified() {
    let fresh = send_default(
        "/name.txt",
        &[("range", "bytes=0-0"), ("if-range", AFTER_MTIME)],
    )
    .await;
    let stale = send_default(
        "/name.txt",
        &[("range", "bytes=0-0"), ("if-range", BEFORE_MTIME)],
    )
    .await;

    assert_eq!(fresh.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(stale.status, StatusCode::OK);
}

#[tokio::test]
async fn if_range_date_without_last_modified_sends_full_content() {
    let options = SendOptions {
        last_modified: Some(false),
        ..Default::default()
    };

    let mut outcome = sender(options)
        .send(
            &get(&[("range", "bytes=0-0"), ("if-range", BEFORE_MTIME)]),
            "/name.txt",
        )
        .await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.header(header::CONTENT_RANGE), None);
    assert_eq!(body_text(&mut outcome).await, "tobi");
}

//-----------------------------------------------------------------------------
// Conditional requests
//-----------------------------------------------------------------------------
#[tokio::test]
async fn matching_if_none_match_is_304_without_entity_headers() {
    let mut outcome = send_default("/name.txt", &[("if-none-match", NAME_TXT_ETAG)]).await;

    assert_eq!(outcome.status, StatusCode::NOT_MODIFIED);
    assert!(!outcome.headers.contains_key(header::CONTENT_LENGTH));
    assert!(!outcome.headers.contains_key(header::CONTENT_TYPE));
    assert_eq!(outcome.header(header::ETAG), Some(NAME_TXT_ETAG));
    assert!(outcome.is_file());
    assert_eq!(body_text(&mut outcome).await, "");
}

#[tokio::test]
async fn no_cache_bypasses_if_none_match() {
    let outcome = send_default(
        "/name.txt",
        &[
            ("if-none-match", NAME_TXT_ETAG),
            ("cache-control", "max-age=0, no-cache"),
        ],
    )
    .await;

    assert_eq!(outcome.status, StatusCode::OK);
}

#[tokio::test]
async fn mismatched_if_none_match_ignores_if_modified_since() {
    let outcome = send_default(
        "/name.txt",
        &[
            ("if-none-match", "\"something-else\""),
            ("if-modified-since", AFTER_MTIME),
        ],
    )
    .await;

    assert_eq!(outcome.status, StatusCode::OK);
}

#[tokio::test]
async fn if_modified_since_at_mtime_is_304() {
    let unchanged = send_default(
        "/name.txt",
        &[("if-modified-since", NAME_TXT_LAST_MODIFIED)],
    )
    .await;
    let changed = send_default("/name.txt", &[("if-modified-since", BEFORE_MTIME)]).await;

    assert_eq!(unchanged.status, StatusCode::NOT_MODIFIED);
    assert_eq!(changed.status, StatusCode::OK);
}

#[tokio::test]
async fn failed_if_match_is_412() {
    let outcome = send_default("/name.txt", &[("if-match", "\"nope\"")]).await;

    assert_eq!(outcome.status, StatusCode::PRECONDITION_FAILED);
    assert!(matches!(outcome.error(), Some(SendError::PreconditionFailed)));
}

#[tokio::test]
async fn if_match_wildcard_and_weak_match_pass() {
    let wildcard = send_default("/name.txt", &[("if-match", "*")]).await;
    let listed = send_default(
        "/name.txt",
        &[("if-match", "\"a\", W/\"4-18bcfe56800\"")],
    )
    .await;

    assert_eq!(wildcard.status, StatusCode::OK);
    assert_eq!(listed.status, StatusCode::OK);
}

#[tokio::test]
async fn precondition_failure_wins_over_not_modified() {
    let outcome = send_default(
        "/name.txt",
        &[("if-match", "\"nope\""), ("if-none-match", NAME_TXT_ETAG)],
    )
    .await;

    assert_eq!(outcome.status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn if_unmodified_since_before_mtime_is_412() {
    let failed = send_default("/name.txt", &[("if-unmodified-since", BEFORE_MTIME)]).await;
    let passed = send_default("/name.txt", &[("if-unmodified-since", AFTER_MTIME)]).await;

    assert_eq!(failed.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(passed.status, StatusCode::OK);
}

//-----------------------------------------------------------------------------
// Path handling
//-----------------------------------------------------------------------------
#[tokio::test]
async fn traversal_out_of_root_is_403() {
    for path in ["/../name.txt", "/pets/../../name.txt", "/%2e%2e/name.txt"] {
        let outcome = send_default(path, &[]).await;

        assert_eq!(outcome.status, StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn traversal_within_root_is_allowed() {
    let mut outcome = send_default("/pets/../name.txt", &[]).await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(body_text(&mut outcome).await, "tobi");
}

#[tokio::test]
async fn malformed_paths_are_400() {
    for path in ["/%zz", "/name%00.txt", "/%ff"] {
        let outcome = send_default(path, &[]).await;

        assert_eq!(outcome.status, StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test]
async fn missing_file_is_404() {
    let outcome = send_default("/nope.txt", &[]).await;

    assert_eq!(outcome.status, StatusCode::NOT_FOUND);
    assert!(matches!(
        outcome.error(),
        Some(SendError::NotFound { source: Some(_) })
    ));
}

#[tokio::test]
async fn dotfiles_follow_policy() {
    let cases = [
        (None, StatusCode::NOT_FOUND),
        (Some(DotfilePolicy::Ignore), StatusCode::NOT_FOUND),
        (Some(DotfilePolicy::Deny), StatusCode::FORBIDDEN),
        (Some(DotfilePolicy::Allow), StatusCode::OK),
    ];

    for (dotfiles, expected) in cases {
        let options = SendOptions {
            dotfiles,
            ..Default::default()
        };
        let sender = sender(options);

        let file = sender.send(&get(&[]), "/.hidden").await;
        let nested = sender.send(&get(&[]), "/.mine/name.txt").await;

        assert_eq!(file.status, expected, "{dotfiles:?}");
        assert_eq!(nested.status, expected, "{dotfiles:?}");
    }
}

#[tokio::test]
async fn extensions_are_tried_for_missing_paths() {
    let options = SendOptions {
        extensions: Some(NameList::Many(vec!["txt".into(), ".html".into()])),
        ..Default::default()
    };
    let sender = sender(options);

    let mut page = sender.send(&get(&[]), "/page").await;
    let missing = sender.send(&get(&[]), "/absent").await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(body_text(&mut page).await, "<p>page</p>");
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extensions_are_not_tried_when_path_has_one() {
    let options = SendOptions {
        extensions: Some(NameList::One("html".into())),
        ..Default::default()
    };

    let outcome = sender(options).send(&get(&[]), "/page.txt").await;

    assert_eq!(outcome.status, StatusCode::NOT_FOUND);
}

//-----------------------------------------------------------------------------
// Directories
//-----------------------------------------------------------------------------
#[tokio::test]
async fn directory_without_slash_redirects() {
    let mut outcome = send_default("/pets", &[]).await;

    assert_eq!(outcome.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(outcome.header(header::LOCATION), Some("/pets/"));
    assert!(matches!(
        &outcome.kind,
        OutcomeKind::Directory { request_path, .. } if request_path == "/pets"
    ));
    assert!(body_text(&mut outcome).await.contains("Redirecting to /pets/"));
}

#[tokio::test]
async fn encoded_trailing_slash_still_redirects() {
    let outcome = send_default("/pets%2F", &[]).await;

    assert_eq!(outcome.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(outcome.header(header::LOCATION), Some("/pets%2F/"));
}

#[tokio::test]
async fn redirect_collapses_leading_slashes() {
    let outcome = send_default("//pets", &[]).await;

    assert_eq!(outcome.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(outcome.header(header::LOCATION), Some("/pets/"));
}

#[tokio::test]
async fn directory_with_slash_serves_index() {
    let mut outcome = send_default("/pets/", &[]).await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(
        outcome.header(header::CONTENT_TYPE),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(body_text(&mut outcome).await, "tobi, loki, jane");
}

#[tokio::test]
async fn directory_without_index_file_is_404() {
    let outcome = send_default("/empty/", &[]).await;

    assert_eq!(outcome.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn directories_are_403_when_index_disabled() {
    let options = SendOptions {
        index: Some(NameList::Flag(false)),
        ..Default::default()
    };
    let sender = sender(options);

    let slashed = sender.send(&get(&[]), "/pets/").await;
    let bare = sender.send(&get(&[]), "/pets").await;

    assert_eq!(slashed.status, StatusCode::FORBIDDEN);
    assert_eq!(bare.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn file_with_trailing_slash_is_404() {
    let options = SendOptions {
        index: Some(NameList::Flag(false)),
        ..Default::default()
    };

    let indexed = send_default("/name.txt/", &[]).await;
    let unindexed = sender(options).send(&get(&[]), "/name.txt/").await;

    assert_eq!(indexed.status, StatusCode::NOT_FOUND);
    assert_eq!(unindexed.status, StatusCode::NOT_FOUND);
}

//-----------------------------------------------------------------------------
// Hooks
//-----------------------------------------------------------------------------
#[tokio::test]
async fn file_hook_headers_win_over_defaults() {
    let hooks = SendHooks {
        on_file: Some(Arc::new(|_: &Path, _: &FileStat| {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/x-custom"));
            headers.insert(
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment"),
            );
            headers
        })),
        ..Default::default()
    };

    let outcome = sender(SendOptions::default())
        .with_hooks(hooks)
        .send(&get(&[]), "/name.txt")
        .await;

    assert_eq!(outcome.header(header::CONTENT_TYPE), Some("text/x-custom"));
    assert_eq!(
        outcome.header(header::CONTENT_DISPOSITION),
        Some("attachment")
    );
}

#[tokio::test]
async fn directory_hook_replaces_redirect() {
    let hooks = SendHooks {
        on_directory: Some(Arc::new(|_: &Path, request_path: &str| {
            Some(ResponseFragment::new(StatusCode::OK).with_body(format!("listing {request_path}")))
        })),
        ..Default::default()
    };

    let mut outcome = sender(SendOptions::default())
        .with_hooks(hooks)
        .send(&get(&[]), "/pets")
        .await;

    assert_eq!(outcome.status, StatusCode::OK);
    assert!(outcome.is_directory());
    assert_eq!(body_text(&mut outcome).await, "listing /pets");
}

#[tokio::test]
async fn error_hook_replaces_page_but_keeps_extra_headers() {
    let hooks = SendHooks {
        on_error: Some(Arc::new(|error: &SendError| {
            Some(
                ResponseFragment::new(error.status())
                    .with_header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))
                    .with_body("custom"),
            )
        })),
        ..Default::default()
    };

    let mut outcome = sender(SendOptions::default())
        .with_hooks(hooks)
        .send(&get(&[("range", "bytes=100-")]), "/name.txt")
        .await;

    assert_eq!(outcome.status, StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(outcome.header(header::CONTENT_TYPE), Some("text/plain"));
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes */4"));
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("6"));
    assert_eq!(body_text(&mut outcome).await, "custom");
}

//-----------------------------------------------------------------------------
// Collaborators
//-----------------------------------------------------------------------------
#[tokio::test]
async fn default_mime_type_can_be_disabled() {
    let sender =
        sender(SendOptions::default()).with_mime_lookup(MimeGuess::with_default_type(None));

    let known = sender.send(&SendRequest::head(), "/page.html").await;
    let unknown = sender.send(&SendRequest::head(), "/blob.unknownext").await;

    assert_eq!(
        known.header(header::CONTENT_TYPE),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(unknown.header(header::CONTENT_TYPE), None);
}

#[tokio::test]
async fn requests_convert_from_http_requests() {
    let http_request = http::Request::builder()
        .method(Method::HEAD)
        .header(header::RANGE, "bytes=0-0")
        .body(())
        .unwrap();

    let request = SendRequest::from(&http_request);
    let outcome = sender(SendOptions::default())
        .send(&request, "/name.txt")
        .await;

    assert!(request.is_head());
    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_LENGTH), Some("1"));
    assert_eq!(outcome.body.len_hint(), Some(0));
}

#[test]
fn settings_are_normalized_up_front() {
    let sender = sender(SendOptions {
        max_age: Some(MaxAge::Text("1h".into())),
        ..Default::default()
    });

    assert_eq!(sender.settings().max_age, Duration::from_secs(3600));
    assert_eq!(sender.settings().root, Some(PathBuf::from("/srv")));
}

#[tokio::test]
async fn zero_chunk_size_in_raw_settings_does_not_clamp() {
    let mut settings = SendOptions {
        root: Some(PathBuf::from("/srv")),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    settings.max_content_range_chunk_size = Some(0);
    let sender = Sender::from_settings(settings).with_file_system(fixtures());

    let mut outcome = sender
        .send(&get(&[("range", "bytes=0-1")]), "/name.txt")
        .await;

    assert_eq!(outcome.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(outcome.header(header::CONTENT_RANGE), Some("bytes 0-1/4"));
    assert_eq!(body_text(&mut outcome).await, "to");
}
