//! Metrics model, formatting, impact derivation, and loader fallback tests.

use std::fs;

use fraudlens::config::schema::UpstreamConfig;
use fraudlens::metrics::impact::{self, PerformanceTier};
use fraudlens::metrics::source::{MetricsOrigin, MetricsSource};
use fraudlens::metrics::{MetricsResponse, format_pct};

/// A realistic metrics envelope, as exported by the upstream notebook.
const SAMPLE_ENVELOPE: &str = r#"{
  "source": "dynamic",
  "count": 2000,
  "models": [
    {"name": "Random Forest", "metrics": {"accuracy": 0.9991, "precision": 0.955, "recall": 0.902, "f1": 0.928, "roc_auc": 0.997}},
    {"name": "GBM", "metrics": {"accuracy": 0.9987, "precision": 0.931, "recall": 0.884, "f1": 0.907, "roc_auc": 0.995}},
    {"name": "Decision Tree", "metrics": {"accuracy": 0.9978, "precision": 0.871, "recall": 0.843, "f1": 0.857}}
  ]
}"#;

// ---------------------------------------------------------------------------
// Envelope parsing
// ---------------------------------------------------------------------------

#[test]
fn envelope_parses_preserving_model_order() {
    let data: MetricsResponse = serde_json::from_str(SAMPLE_ENVELOPE).unwrap();
    assert_eq!(data.source, "dynamic");
    assert_eq!(data.count, Some(2000));
    let names: Vec<&str> = data.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Random Forest", "GBM", "Decision Tree"]);
}

#[test]
fn missing_metric_values_parse_as_absent() {
    let data: MetricsResponse = serde_json::from_str(SAMPLE_ENVELOPE).unwrap();
    let dt = data.find("Decision Tree").unwrap();
    assert_eq!(dt.metrics.roc_auc, None);
    assert_eq!(dt.metrics.f1, Some(0.857));
}

// ---------------------------------------------------------------------------
// Percentage formatting
// ---------------------------------------------------------------------------

#[test]
fn percentages_have_two_decimals_and_a_sign() {
    for v in [0.0, 0.25, 0.5, 0.9991, 1.0] {
        let s = format_pct(Some(v));
        assert!(s.ends_with('%'), "{s} should end with %");
        let digits = s.trim_end_matches('%');
        let (_, frac) = digits.split_once('.').unwrap();
        assert_eq!(frac.len(), 2, "{s} should have two decimals");
    }
}

#[test]
fn absent_values_format_as_dash() {
    assert_eq!(format_pct(None), "—");
    assert_eq!(format_pct(Some(f64::NAN)), "—");
}

// ---------------------------------------------------------------------------
// Business impact
// ---------------------------------------------------------------------------

#[test]
fn impact_reference_derivation() {
    let data: MetricsResponse = serde_json::from_str(
        r#"{"models": [{"name": "M", "metrics": {"precision": 0.80, "recall": 0.90}}]}"#,
    )
    .unwrap();
    let est = impact::estimate(&data.models[0].metrics).unwrap();
    assert_eq!(est.actual_fraud, 100);
    assert_eq!(est.true_positives, 90);
    assert_eq!(est.false_negatives, 10);
    assert_eq!(est.false_positives, 23);
    assert_eq!(est.total_flagged, 113);
}

#[test]
fn tier_bands_match_thresholds() {
    let cases = [
        (0.95, "Excellent"),
        (0.85, "Very Good"),
        (0.75, "Good"),
        (0.5, "Needs Improvement"),
    ];
    for (f1, label) in cases {
        assert_eq!(PerformanceTier::from_f1(Some(f1)).label(), label);
    }
}

// ---------------------------------------------------------------------------
// Loader fallback
// ---------------------------------------------------------------------------

/// An upstream config whose live endpoint can never answer.
fn unreachable_upstream(snapshot_path: &std::path::Path) -> UpstreamConfig {
    UpstreamConfig {
        // Port 9 (discard) on loopback: refused immediately, no server there.
        metrics_url: "http://127.0.0.1:9/api/metrics".to_string(),
        predict_url: "http://127.0.0.1:9/api/predict".to_string(),
        timeout_ms: 500,
        snapshot_path: snapshot_path.to_string_lossy().into_owned(),
    }
}

#[test]
fn fallback_loads_snapshot_and_stamps_source() {
    let path = std::env::temp_dir().join("fraudlens_test_snapshot_stamp.json");
    fs::write(&path, r#"{"models": [{"name": "GBM", "metrics": {"f1": 0.9}}]}"#).unwrap();

    let source = MetricsSource::from_config(&unreachable_upstream(&path));
    let loaded = source.load().unwrap();
    assert_eq!(loaded.origin, MetricsOrigin::Snapshot);
    // Snapshot omitted its source tag, so the loader stamps it.
    assert_eq!(loaded.data.source, "precomputed");
    assert_eq!(loaded.data.models.len(), 1);

    fs::remove_file(&path).ok();
}

#[test]
fn fallback_keeps_an_explicit_source_tag() {
    let path = std::env::temp_dir().join("fraudlens_test_snapshot_keep.json");
    fs::write(&path, r#"{"source": "static", "models": []}"#).unwrap();

    let source = MetricsSource::from_config(&unreachable_upstream(&path));
    let loaded = source.load().unwrap();
    assert_eq!(loaded.data.source, "static");

    fs::remove_file(&path).ok();
}

#[test]
fn both_paths_failing_is_an_error_naming_both() {
    let path = std::env::temp_dir().join("fraudlens_test_snapshot_missing.json");
    fs::remove_file(&path).ok();

    let source = MetricsSource::from_config(&unreachable_upstream(&path));
    let err = source.load().unwrap_err().to_string();
    assert!(err.contains("live fetch failed"), "got: {err}");
    assert!(err.contains("snapshot failed"), "got: {err}");
}

#[test]
fn malformed_snapshot_is_a_parse_error() {
    let path = std::env::temp_dir().join("fraudlens_test_snapshot_bad.json");
    fs::write(&path, "not json at all").unwrap();

    let source = MetricsSource::from_config(&unreachable_upstream(&path));
    assert!(source.load().is_err());

    fs::remove_file(&path).ok();
}
