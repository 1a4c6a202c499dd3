//! Model evaluation metrics: wire data model and display helpers.
//!
//! The metrics envelope is produced by the upstream metrics API (or the
//! static snapshot) and consumed wholesale by the renderers — nothing is
//! patched incrementally. Metric values are ratios in `[0, 1]` or absent;
//! absent values render as the placeholder dash.

pub mod impact;
pub mod source;

use serde::{Deserialize, Serialize};

/// Name of the headline model highlighted across the dashboard.
pub const PRIMARY_MODEL: &str = "Random Forest";

/// Placeholder shown for a missing or non-finite metric value.
pub const PLACEHOLDER: &str = "—";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The metrics envelope returned by the metrics endpoint and the snapshot.
///
/// `source` tags where the numbers came from (`"dynamic"`, `"static"`,
/// `"precomputed"`); snapshots may omit it. Model order is preserved from
/// the wire — the chart reorders to its own display priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsResponse {
    #[serde(default)]
    pub source: String,
    /// Size of the evaluation set, when the upstream reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default)]
    pub models: Vec<ModelReport>,
}

impl MetricsResponse {
    /// Find a model report by exact name.
    pub fn find(&self, name: &str) -> Option<&ModelReport> {
        self.models.iter().find(|m| m.name == name)
    }

    /// The model whose metrics headline the KPI cards: the primary model
    /// when present, otherwise the first model on the wire.
    pub fn headline(&self) -> Option<&ModelReport> {
        self.find(PRIMARY_MODEL).or_else(|| self.models.first())
    }
}

/// One model's evaluation results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelReport {
    pub name: String,
    #[serde(default)]
    pub metrics: MetricSet,
}

/// The metric values for one model. Ratios in `[0, 1]`, or absent when the
/// upstream could not compute them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricSet {
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    #[serde(default)]
    pub f1: Option<f64>,
    #[serde(default)]
    pub roc_auc: Option<f64>,
}

impl MetricSet {
    /// Look up a metric value by key.
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Accuracy => self.accuracy,
            MetricKey::Precision => self.precision,
            MetricKey::Recall => self.recall,
            MetricKey::F1 => self.f1,
            MetricKey::RocAuc => self.roc_auc,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric keys
// ---------------------------------------------------------------------------

/// The fixed set of metrics the dashboard knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    Accuracy,
    Precision,
    Recall,
    F1,
    RocAuc,
}

impl MetricKey {
    /// All keys in table-column order.
    pub const ALL: [MetricKey; 5] = [
        MetricKey::Accuracy,
        MetricKey::Precision,
        MetricKey::Recall,
        MetricKey::F1,
        MetricKey::RocAuc,
    ];

    /// Display label for chart axes and table headers.
    pub fn label(self) -> &'static str {
        match self {
            MetricKey::Accuracy => "Accuracy",
            MetricKey::Precision => "Precision",
            MetricKey::Recall => "Recall",
            MetricKey::F1 => "F1-Score",
            MetricKey::RocAuc => "ROC AUC",
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a ratio as a percentage with two decimal places.
///
/// Missing or non-finite values render as the placeholder dash.
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => PLACEHOLDER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
