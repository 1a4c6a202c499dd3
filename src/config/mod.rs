/// Configuration system for fraudlens.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::FraudlensConfig::default()`]
/// 2. **User global config** — `~/.fraudlens/config.toml`
/// 3. **Project local config** — `.fraudlens.toml` in the current working directory
/// 4. **Environment variables** — `FRAUDLENS_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing sections in a TOML file fall
/// back to the previous layer's values; malformed files are ignored so a bad
/// config can never take the dashboard down.
pub mod schema;

use std::fs;
use std::path::PathBuf;

pub use schema::FraudlensConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved fraudlens configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for all modules that need
/// configuration.
pub fn load() -> FraudlensConfig {
    let mut config = FraudlensConfig::default();

    // Layer 2: user global config (~/.fraudlens/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        merge_config(&mut config, &global);
    }

    // Layer 3: project local config (.fraudlens.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        merge_config(&mut config, &project);
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed.
fn load_toml_file(path: Option<PathBuf>) -> Option<FraudlensConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge a loaded config layer into the base config.
///
/// Each TOML file is deserialized with defaults filled in, so the overlay
/// fully replaces the base: only explicitly-set values differ from the
/// defaults, and those are the ones we want applied.
fn merge_config(base: &mut FraudlensConfig, overlay: &FraudlensConfig) {
    *base = overlay.clone();
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.fraudlens/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fraudlens").join("config.toml"))
}

/// Path to the project local config: `.fraudlens.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".fraudlens.toml"))
}

/// Return the path to the global config file for display purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `FRAUDLENS_ADDR` — dashboard bind address
/// - `FRAUDLENS_OPEN_BROWSER` — open browser on startup (`1`/`true`/`yes`/`on`)
/// - `FRAUDLENS_METRICS_URL` — live metrics endpoint
/// - `FRAUDLENS_PREDICT_URL` — prediction endpoint
/// - `FRAUDLENS_TIMEOUT_MS` — upstream request timeout
/// - `FRAUDLENS_SNAPSHOT` — static snapshot path
fn apply_env_overrides(config: &mut FraudlensConfig) {
    if let Ok(val) = std::env::var("FRAUDLENS_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("FRAUDLENS_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("FRAUDLENS_METRICS_URL")
        && !val.is_empty()
    {
        config.upstream.metrics_url = val;
    }
    if let Ok(val) = std::env::var("FRAUDLENS_PREDICT_URL")
        && !val.is_empty()
    {
        config.upstream.predict_url = val;
    }
    if let Ok(val) = std::env::var("FRAUDLENS_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.upstream.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("FRAUDLENS_SNAPSHOT")
        && !val.is_empty()
    {
        config.upstream.snapshot_path = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
