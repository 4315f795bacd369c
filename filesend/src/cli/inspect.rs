use std::mem;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, ValueEnum};
use filesend_core::static_files::OutcomeKind;
use filesend_core::{SendOutcome, SendRequest, Sender};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::load_options;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// URL path to request, e.g. `/docs/index.html`
    pub path: String,

    /// Directory requests are confined to (overrides the config file)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// TOML file with send options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request header as `Name: value`; repeatable
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    #[arg(long, value_enum, default_value_t = MethodArg::Get)]
    pub method: MethodArg,

    /// Also print the response body
    #[arg(long)]
    pub body: bool,

    /// Print the response as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Head,
}

impl From<MethodArg> for Method {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => Method::GET,
            MethodArg::Head => Method::HEAD,
        }
    }
}

#[derive(Debug, Serialize)]
struct InspectReport {
    status: u16,
    kind: &'static str,
    headers: Vec<ReportHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReportHeader {
    name: String,
    value: String,
}

pub fn run_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => Default::default(),
    };
    if let Some(root) = args.root {
        options.root = Some(root);
    }

    let sender = Sender::new(options).context("invalid send options")?;
    tracing::debug!(settings = ?sender.settings(), path = %args.path, "inspecting request");
    let request = SendRequest::new(args.method.into(), parse_headers(&args.headers)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start runtime")?;

    let report = runtime.block_on(async {
        let mut outcome = sender.send(&request, &args.path).await;

        let body = if args.body {
            let bytes = mem::take(&mut outcome.body)
                .collect()
                .await
                .context("failed to read response body")?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            outcome.body.destroy();
            None
        };

        anyhow::Ok(report_for(&outcome, body))
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_pretty(&report);
    }

    Ok(())
}

pub(crate) fn parse_headers(raw: &[String]) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for line in raw {
        let Some((name, value)) = line.split_once(':') else {
            bail!("header `{line}` is not in `Name: value` form");
        };

        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .with_context(|| format!("invalid header name in `{line}`"))?;
        let value = HeaderValue::from_str(value.trim())
            .with_context(|| format!("invalid header value in `{line}`"))?;

        headers.append(name, value);
    }

    Ok(headers)
}

fn report_for(outcome: &SendOutcome, body: Option<String>) -> InspectReport {
    let kind = match outcome.kind {
        OutcomeKind::File { .. } => "file",
        OutcomeKind::Directory { .. } => "directory",
        OutcomeKind::Error { .. } => "error",
    };

    let headers = outcome
        .headers
        .iter()
        .map(|(name, value)| ReportHeader {
            name: name.to_string(),
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        })
        .collect();

    InspectReport {
        status: outcome.status.as_u16(),
        kind,
        headers,
        body,
    }
}

fn render_pretty(report: &InspectReport) {
    let status = StatusCode::from_u16(report.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let line = format!(
        "{} {} ({})",
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        report.kind
    );

    match status.as_u16() {
        200..=299 => println!("{}", line.green().bold()),
        300..=399 => println!("{}", line.cyan().bold()),
        400..=499 => println!("{}", line.yellow().bold()),
        _ => println!("{}", line.red().bold()),
    }

    for header in &report.headers {
        println!("{}: {}", header.name.dimmed(), header.value);
    }

    if let Some(body) = &report.body {
        println!();
        print!("{body}");
    }
}
