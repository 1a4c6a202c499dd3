//! KPI summary cards for the headline model.

use crate::metrics::{MetricsResponse, format_pct};

/// Render the KPI cards: the headline model's accuracy, precision, recall,
/// and F1. An empty model list renders an empty slot.
pub fn render(data: &MetricsResponse) -> String {
    let Some(model) = data.headline() else {
        return String::new();
    };

    let m = &model.metrics;
    let items = [
        ("Accuracy", m.accuracy),
        ("Precision", m.precision),
        ("Recall", m.recall),
        ("F1 Score", m.f1),
    ];

    items
        .iter()
        .map(|(label, value)| {
            format!(
                concat!(
                    r#"<div class="kpi-card">"#,
                    r#"<div class="kpi-label">{}</div>"#,
                    r#"<div class="kpi-value">{}</div>"#,
                    "</div>"
                ),
                label,
                format_pct(*value)
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricSet, ModelReport};

    #[test]
    fn renders_four_cards_for_headline_model() {
        let data = MetricsResponse {
            models: vec![ModelReport {
                name: "Random Forest".to_string(),
                metrics: MetricSet {
                    accuracy: Some(0.999),
                    precision: Some(0.95),
                    recall: Some(0.87),
                    f1: Some(0.91),
                    roc_auc: Some(0.99),
                },
            }],
            ..Default::default()
        };
        let html = render(&data);
        assert_eq!(html.matches("kpi-card").count(), 4);
        assert!(html.contains("99.90%"));
        assert!(html.contains("F1 Score"));
        // ROC AUC is not a KPI card.
        assert!(!html.contains("ROC"));
    }

    #[test]
    fn missing_metrics_render_placeholders() {
        let data = MetricsResponse {
            models: vec![ModelReport {
                name: "GBM".to_string(),
                metrics: MetricSet::default(),
            }],
            ..Default::default()
        };
        let html = render(&data);
        assert_eq!(html.matches("—").count(), 4);
    }

    #[test]
    fn empty_model_list_renders_nothing() {
        assert_eq!(render(&MetricsResponse::default()), "");
    }
}
