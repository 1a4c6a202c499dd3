//! Business impact panels: one card per model with derived confusion-matrix
//! counts and a qualitative performance tier.

use crate::metrics::impact::{self, PerformanceTier};
use crate::metrics::{MetricsResponse, ModelReport, PLACEHOLDER, format_pct};
use crate::render::html_escape;

/// Render the impact grid, one panel per model in wire order.
pub fn render_grid(data: &MetricsResponse) -> String {
    data.models.iter().map(render_panel).collect()
}

fn render_panel(model: &ModelReport) -> String {
    let metrics = &model.metrics;
    let tier = PerformanceTier::from_f1(metrics.f1);
    let estimate = impact::estimate(metrics);

    // Unmeasurable estimates render dashes rather than infinity or NaN.
    let (flagged, tp, fp, actual, missed) = match estimate {
        Some(est) => (
            est.total_flagged.to_string(),
            est.true_positives.to_string(),
            est.false_positives.to_string(),
            est.actual_fraud.to_string(),
            est.false_negatives.to_string(),
        ),
        None => (
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ),
    };

    format!(
        concat!(
            r#"<div class="impact-panel {tier_class}">"#,
            r#"<h4 class="impact-model">{name}</h4>"#,
            r#"<div class="impact-tier">"#,
            r#"<div class="impact-tier-heading">Overall Performance</div>"#,
            r#"<div class="impact-tier-label">{tier}</div>"#,
            "</div>",
            r#"<div class="impact-box">"#,
            r#"<div class="impact-box-title">Flagged Transactions</div>"#,
            r#"<div class="impact-line">Out of <strong>{flagged}</strong> flagged as fraud:</div>"#,
            r#"<div class="impact-split">"#,
            r#"<span class="count-good">&#10003; {tp} genuine fraud</span>"#,
            r#"<span class="count-bad">&#10007; {fp} false alarms</span>"#,
            "</div>",
            r#"<div class="impact-metric">Precision: <strong>{precision}</strong></div>"#,
            "</div>",
            r#"<div class="impact-box">"#,
            r#"<div class="impact-box-title">Fraud Detection</div>"#,
            r#"<div class="impact-line">Out of <strong>{actual}</strong> actual fraud cases:</div>"#,
            r#"<div class="impact-split">"#,
            r#"<span class="count-good">&#10003; {tp} detected</span>"#,
            r#"<span class="count-bad">&#10007; {missed} missed</span>"#,
            "</div>",
            r#"<div class="impact-metric">Recall: <strong>{recall}</strong></div>"#,
            "</div>",
            "</div>"
        ),
        tier_class = tier.css_class(),
        name = html_escape(&model.name),
        tier = tier.label(),
        flagged = flagged,
        tp = tp,
        fp = fp,
        actual = actual,
        missed = missed,
        precision = format_pct(metrics.precision),
        recall = format_pct(metrics.recall),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
