//! Metrics loading: live endpoint first, static snapshot second.
//!
//! The loader tries the configured metrics API with caching disabled. On
//! transport failure or a non-2xx status it falls back to the local
//! snapshot file (the same envelope shape, exported ahead of time). When
//! both fail the error carries both causes so the caller can surface a
//! single notice and skip rendering entirely. No retries.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::schema::UpstreamConfig;
use crate::metrics::MetricsResponse;

// ---------------------------------------------------------------------------
// Load outcome
// ---------------------------------------------------------------------------

/// Where a successful load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsOrigin {
    /// The live metrics endpoint answered.
    Live,
    /// The live fetch failed and the local snapshot was used.
    Snapshot,
}

/// A loaded metrics envelope plus its origin.
#[derive(Debug, Clone)]
pub struct LoadedMetrics {
    pub data: MetricsResponse,
    pub origin: MetricsOrigin,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Synchronous metrics loader bound to one upstream configuration.
#[derive(Debug)]
pub struct MetricsSource {
    url: String,
    snapshot_path: PathBuf,
    timeout: Duration,
}

impl MetricsSource {
    /// Build a loader from the resolved config.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            url: config.metrics_url.clone(),
            snapshot_path: PathBuf::from(&config.snapshot_path),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Load metrics: live endpoint first, snapshot on failure.
    ///
    /// A snapshot without a `source` tag is stamped `"precomputed"`. When
    /// both paths fail the error names both causes.
    pub fn load(&self) -> Result<LoadedMetrics> {
        let live_err = match self.fetch_live() {
            Ok(data) => {
                return Ok(LoadedMetrics {
                    data,
                    origin: MetricsOrigin::Live,
                });
            }
            Err(e) => e,
        };

        match self.load_snapshot() {
            Ok(data) => Ok(LoadedMetrics {
                data,
                origin: MetricsOrigin::Snapshot,
            }),
            Err(snapshot_err) => anyhow::bail!(
                "metrics are unavailable: live fetch failed ({live_err:#}); \
                 snapshot failed ({snapshot_err:#})"
            ),
        }
    }

    /// GET the live metrics endpoint with caching disabled.
    fn fetch_live(&self) -> Result<MetricsResponse> {
        let resp = ureq::get(&self.url)
            .timeout(self.timeout)
            .set("Cache-Control", "no-store")
            .call()
            .with_context(|| format!("metrics request to {} failed", self.url))?;

        resp.into_json()
            .context("failed to parse metrics response as JSON")
    }

    /// Read and parse the local snapshot file, stamping its source tag.
    pub fn load_snapshot(&self) -> Result<MetricsResponse> {
        let content = fs::read_to_string(&self.snapshot_path).with_context(|| {
            format!("failed to read snapshot {}", self.snapshot_path.display())
        })?;
        let mut data: MetricsResponse =
            serde_json::from_str(&content).context("failed to parse snapshot as JSON")?;
        apply_snapshot_source(&mut data);
        Ok(data)
    }

    /// Raw snapshot bytes, for re-serving the file over HTTP.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.snapshot_path).with_context(|| {
            format!("failed to read snapshot {}", self.snapshot_path.display())
        })
    }

    /// Whether the snapshot file exists on disk.
    pub fn snapshot_exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    /// Check whether the live metrics endpoint answers at all.
    ///
    /// Uses a short timeout (5 s) so health reports don't stall when the
    /// upstream is down.
    pub fn is_reachable(&self) -> bool {
        ureq::get(&self.url)
            .timeout(Duration::from_secs(5))
            .call()
            .is_ok()
    }

    /// The configured live endpoint, for health reports.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Stamp a snapshot that omits its source tag as `"precomputed"`.
pub fn apply_snapshot_source(data: &mut MetricsResponse) {
    if data.source.is_empty() {
        data.source = "precomputed".to_string();
    }
}

/// Human label for a source tag, shown in the dashboard badge.
///
/// An empty tag counts as live data, matching the upstream's default.
pub fn source_badge(source: &str) -> &str {
    match source {
        "" | "dynamic" => "Live",
        "static" => "Static",
        "precomputed" => "Precomputed",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
