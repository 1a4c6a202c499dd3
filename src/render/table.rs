//! Model comparison table rows.

use crate::metrics::{MetricKey, MetricsResponse, PRIMARY_MODEL, format_pct};
use crate::render::html_escape;

/// Render one `<tr>` per model in wire order, all five metrics as
/// percentage cells. The primary model row is highlighted and badged.
pub fn render_rows(data: &MetricsResponse) -> String {
    data.models
        .iter()
        .map(|model| {
            let primary = model.name == PRIMARY_MODEL;
            let row_class = if primary { "row-primary" } else { "" };

            let mut cells = String::new();
            for key in MetricKey::ALL {
                cells.push_str(&format!(
                    r#"<td class="num">{}</td>"#,
                    format_pct(model.metrics.get(key))
                ));
            }

            let badge = if primary {
                r#" <span class="badge-primary">PRIMARY</span>"#
            } else {
                ""
            };

            format!(
                r#"<tr class="{row_class}"><td class="model-name">{}{badge}</td>{cells}</tr>"#,
                html_escape(&model.name)
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
