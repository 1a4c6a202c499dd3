//! Embedded web dashboard for fraudlens.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The server-rendered dashboard page (metrics, chart, impact, form)
//! - The prediction form handler
//! - JSON endpoints for health and the static metrics snapshot
//!
//! Launched via `fraudlens serve` (default: `http://127.0.0.1:9848`).

mod api;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::FraudlensConfig;
use crate::metrics::source::{MetricsOrigin, MetricsSource};
use crate::predict::{self, PredictionRequest, TransactionType, client::ScoringClient};
use crate::render::page::{DashboardView, PredictionSlot};
use crate::render::{Notice, chart, impact, kpi, page, table};

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on the given address.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local single-user dashboard). Gracefully handles errors per-request
/// without crashing the server.
pub fn serve(addr: &str, cfg: &FraudlensConfig) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("fraudlens dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if cfg.server.open_browser {
        let url = format!("http://{addr}");
        let _ = open_browser(&url);
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Post | Method::Put | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let result = dispatch(cfg, &method, &url, body.as_deref());

        match result {
            Ok(resp) => {
                let _ = request.respond(resp);
            }
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                let resp = Response::from_data(body.into_bytes())
                    .with_header(content_type_json())
                    .with_status_code(StatusCode(500));
                let _ = request.respond(resp);
            }
        }

        // Brief access log
        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    cfg: &FraudlensConfig,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        // Dashboard
        (&Method::Get, "/") | (&Method::Get, "/index.html") => {
            Ok(html_response(&build_dashboard(cfg, PredictionSlot::Empty)))
        }

        // Prediction form
        (&Method::Post, "/predict") => {
            let slot = handle_predict(cfg, body.unwrap_or(""));
            Ok(html_response(&build_dashboard(cfg, slot)))
        }

        // Static snapshot (same shape as the live metrics endpoint)
        (&Method::Get, "/metrics_precomputed.json") => api::get_snapshot(cfg),

        // Health
        (&Method::Get, "/api/health") => api::get_health(cfg),

        // 404
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------

/// Load metrics and fill every dashboard slot.
///
/// A failed load leaves the slots empty and the error in the notice — the
/// renderers are never invoked with data that didn't arrive.
fn build_dashboard(cfg: &FraudlensConfig, prediction: PredictionSlot) -> String {
    let source = MetricsSource::from_config(&cfg.upstream);

    let mut view = match source.load() {
        Ok(loaded) => {
            let data = &loaded.data;
            let notice = match loaded.origin {
                MetricsOrigin::Live => {
                    let shown = if data.source == "precomputed" {
                        "Notebook export"
                    } else {
                        data.source.as_str()
                    };
                    Notice::info(format!("Metrics source: {shown}"))
                }
                MetricsOrigin::Snapshot => Notice::info(
                    "Using local precomputed metrics (fallback). \
                     Start the metrics API for live numbers.",
                ),
            };

            DashboardView {
                source_badge: Some(
                    crate::metrics::source::source_badge(&data.source).to_string(),
                ),
                notice: Some(notice),
                kpis: kpi::render(data),
                chart: chart::render(data, chart::DEFAULT_CONTAINER_WIDTH),
                table_rows: table::render_rows(data),
                impact_grid: impact::render_grid(data),
                prediction: PredictionSlot::Empty,
            }
        }
        Err(e) => {
            let mut view = DashboardView::empty();
            view.notice = Some(Notice::error(format!("{e:#}")));
            view
        }
    };

    view.prediction = prediction;
    page::render(&view)
}

/// Handle a form submission: validate everything, then score.
fn handle_predict(cfg: &FraudlensConfig, body: &str) -> PredictionSlot {
    let fields = predict::parse_form(body);

    let violations = predict::validate(&fields);
    if !violations.is_empty() {
        return PredictionSlot::Invalid(violations);
    }

    // validate() guarantees a known type is present.
    let raw_type = fields
        .get("transactionType")
        .map(String::as_str)
        .unwrap_or("");
    let Some(tx_type) = TransactionType::parse(raw_type.trim()) else {
        return PredictionSlot::Invalid(vec!["Select a transaction type.".to_string()]);
    };

    let request = PredictionRequest::from_form(&fields, tx_type);
    match ScoringClient::from_config(&cfg.upstream).predict(&request) {
        Ok(resp) => PredictionSlot::Scored {
            label: resp.label,
            probability: resp.probability,
        },
        Err(e) => PredictionSlot::Failed(format!("{e:#}")),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// 200 HTML response.
fn html_response(html: &str) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(html.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// 404 response.
fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
