/// Configuration schema and defaults for fraudlens.
///
/// Defines the TOML-serializable configuration with two sections:
/// `[server]` and `[upstream]`. Every field has a built-in default; users
/// only set the values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level fraudlens configuration.
///
/// Maps directly to the `~/.fraudlens/config.toml` and `.fraudlens.toml`
/// file schemas. All sections and fields are optional — missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudlensConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the dashboard binds to.
    pub addr: String,
    /// Open the dashboard in the default browser on startup.
    /// Can also be disabled via `FRAUDLENS_OPEN_BROWSER=0`.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9848".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [upstream]
// ---------------------------------------------------------------------------

/// Upstream metrics and scoring endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Live metrics endpoint (GET, returns the metrics envelope).
    pub metrics_url: String,
    /// Prediction endpoint (POST, JSON body).
    pub predict_url: String,
    /// Request timeout for both endpoints (milliseconds).
    pub timeout_ms: u64,
    /// Path to the static metrics snapshot used when the live fetch fails.
    pub snapshot_path: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            metrics_url: "http://localhost:8000/api/metrics".to_string(),
            predict_url: "http://localhost:8000/api/predict".to_string(),
            timeout_ms: 10_000,
            snapshot_path: "metrics_precomputed.json".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
