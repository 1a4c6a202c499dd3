//! JSON API handlers for the dashboard server.
//!
//! Each handler corresponds to an endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::config::{self, FraudlensConfig};
use crate::metrics::source::MetricsSource;

use super::content_type_json;

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// Health API response.
#[derive(Serialize)]
struct HealthResponse {
    metrics_url: String,
    predict_url: String,
    metrics_reachable: bool,
    snapshot_exists: bool,
    config_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/health` — upstream and snapshot status.
pub fn get_health(cfg: &FraudlensConfig) -> Result<Response<Cursor<Vec<u8>>>> {
    let source = MetricsSource::from_config(&cfg.upstream);

    let config_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);

    let resp = HealthResponse {
        metrics_url: cfg.upstream.metrics_url.clone(),
        predict_url: cfg.upstream.predict_url.clone(),
        metrics_reachable: source.is_reachable(),
        snapshot_exists: source.snapshot_exists(),
        config_exists,
    };

    json_response(&resp)
}

/// `GET /metrics_precomputed.json` — re-serve the static snapshot.
pub fn get_snapshot(cfg: &FraudlensConfig) -> Result<Response<Cursor<Vec<u8>>>> {
    let source = MetricsSource::from_config(&cfg.upstream);

    match source.snapshot_bytes() {
        Ok(bytes) => Ok(Response::from_data(bytes)
            .with_header(content_type_json())
            .with_status_code(StatusCode(200))),
        Err(_) => {
            let body = r#"{"error": "snapshot not found"}"#;
            Ok(Response::from_data(body.as_bytes().to_vec())
                .with_header(content_type_json())
                .with_status_code(StatusCode(404)))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            metrics_url: "http://localhost:8000/api/metrics".to_string(),
            predict_url: "http://localhost:8000/api/predict".to_string(),
            metrics_reachable: false,
            snapshot_exists: true,
            config_exists: false,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"metrics_reachable\":false"));
        assert!(json.contains("\"snapshot_exists\":true"));
    }
}
