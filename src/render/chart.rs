//! Grouped bar chart: layout and SVG assembly.
//!
//! A pure function of (metrics data, container width) to an SVG string.
//! The inner width splits into one group per metric; each group centers a
//! padded band holding one bar per displayed model. Models draw in a fixed
//! priority order with fixed colors, regardless of wire order. The whole
//! chart is replaced on every render.

use crate::metrics::{MetricKey, MetricsResponse, ModelReport};
use crate::render::html_escape;

/// Container width assumed when no measurement is available.
pub const DEFAULT_CONTAINER_WIDTH: u32 = 620;

/// Metrics charted, one group each, in display order.
const CHART_METRICS: [MetricKey; 4] = [
    MetricKey::Accuracy,
    MetricKey::Precision,
    MetricKey::Recall,
    MetricKey::F1,
];

/// Model display priority. Wire order is ignored; models not in this list
/// are not charted.
const MODEL_PRIORITY: [&str; 3] = ["Random Forest", "GBM", "Decision Tree"];

/// Bar color for models without an assigned color.
const FALLBACK_COLOR: &str = "#111827";

/// Fixed model-name → bar-color lookup.
fn model_color(name: &str) -> &'static str {
    match name {
        "Random Forest" => "#F59E0B",
        "GBM" => "#10B981",
        "Decision Tree" => "#6366F1",
        _ => FALLBACK_COLOR,
    }
}

/// Gridline tick values on the vertical axis.
const TICKS: [f64; 4] = [0.85, 0.90, 0.95, 1.00];

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Chart geometry computed from the container width and bar count.
///
/// All coordinates are relative to the inner plot area (inside the margins).
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_left: f64,
    pub inner_w: f64,
    pub inner_h: f64,
    pub group_width: f64,
    /// Centered band within a group that actually holds bars.
    pub band: f64,
    pub bar_width: f64,
    pub bar_gap: f64,
}

impl ChartLayout {
    const HEIGHT: f64 = 280.0;
    const MARGIN_TOP: f64 = 10.0;
    const MARGIN_RIGHT: f64 = 10.0;
    const MARGIN_BOTTOM: f64 = 60.0;
    const MARGIN_LEFT: f64 = 32.0;
    const MIN_CANVAS_WIDTH: f64 = 480.0;
    /// Left+right padding inside each group.
    const GROUP_PADDING: f64 = 20.0;
    const MIN_BAND: f64 = 40.0;
    const BAR_GAP: f64 = 8.0;
    const MIN_BAR_WIDTH: f64 = 8.0;
    const MAX_BAR_WIDTH: f64 = 18.0;

    /// Compute the layout for `group_count` metric groups holding
    /// `bar_count` bars each inside a container of the given width.
    pub fn compute(container_width: u32, group_count: usize, bar_count: usize) -> Self {
        let width = (container_width as f64).max(Self::MIN_CANVAS_WIDTH);
        let inner_w = width - Self::MARGIN_LEFT - Self::MARGIN_RIGHT;
        let inner_h = Self::HEIGHT - Self::MARGIN_TOP - Self::MARGIN_BOTTOM;

        let group_width = inner_w / group_count.max(1) as f64;
        let band = (group_width - Self::GROUP_PADDING).max(Self::MIN_BAND);

        // Fit all bars with fixed gaps, then clamp to keep bars slim on
        // small screens and readable on wide ones.
        let bar_width = if bar_count > 0 {
            let computed =
                (band - Self::BAR_GAP * (bar_count as f64 - 1.0)) / bar_count as f64;
            computed.max(Self::MIN_BAR_WIDTH).min(Self::MAX_BAR_WIDTH)
        } else {
            Self::MAX_BAR_WIDTH
        };

        Self {
            width,
            height: Self::HEIGHT,
            margin_top: Self::MARGIN_TOP,
            margin_left: Self::MARGIN_LEFT,
            inner_w,
            inner_h,
            group_width,
            band,
            bar_width,
            bar_gap: Self::BAR_GAP,
        }
    }

    /// Height of a bar for a metric value. Missing values default to 0;
    /// everything clamps into `[0, 1]` before scaling.
    pub fn bar_height(&self, value: Option<f64>) -> f64 {
        let v = value.unwrap_or(0.0).clamp(0.0, 1.0);
        v * self.inner_h
    }

    /// Vertical position of a value on the linear axis.
    pub fn y(&self, value: f64) -> f64 {
        self.inner_h - value * self.inner_h
    }

    /// Left edge of the centered band in group `i`.
    pub fn band_x(&self, i: usize) -> f64 {
        i as f64 * self.group_width + (self.group_width - self.band) / 2.0
    }

    /// Left edge of bar `j` within the band starting at `band_x`.
    pub fn bar_x(&self, band_x: f64, j: usize) -> f64 {
        band_x + j as f64 * (self.bar_width + self.bar_gap)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the grouped bar chart as an SVG string.
pub fn render(data: &MetricsResponse, container_width: u32) -> String {
    // Fixed display order, filtered to models actually present.
    let display: Vec<&str> = MODEL_PRIORITY
        .iter()
        .copied()
        .filter(|name| data.find(name).is_some())
        .collect();

    let layout = ChartLayout::compute(container_width, CHART_METRICS.len(), display.len());

    let mut svg = vec![
        format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" class="chart-svg">"#,
            w = layout.width,
            h = layout.height,
        ),
        format!(
            r#"<g transform="translate({},{})">"#,
            layout.margin_left, layout.margin_top
        ),
    ];

    // Gridlines and axis labels.
    svg.push(r#"<g font-size="10">"#.to_string());
    for t in TICKS {
        let yy = layout.y(t);
        svg.push(format!(
            r##"<line x1="0" x2="{}" y1="{yy}" y2="{yy}" stroke="#e5e7eb" />"##,
            layout.inner_w
        ));
        svg.push(format!(
            r##"<text x="-8" y="{}" text-anchor="end" fill="#64748b">{:.0}</text>"##,
            yy + 3.0,
            t * 100.0
        ));
    }
    svg.push("</g>".to_string());

    // Bars, one group per metric.
    for (i, key) in CHART_METRICS.iter().enumerate() {
        let gx = layout.band_x(i);
        for (j, name) in display.iter().enumerate() {
            let Some(model) = data.find(name) else {
                continue;
            };
            push_bar(&mut svg, &layout, model, *key, gx, j);
        }

        // Group label under the axis.
        svg.push(format!(
            r##"<text x="{}" y="{}" text-anchor="middle" fill="#111827" font-size="12">{}</text>"##,
            i as f64 * layout.group_width + layout.group_width / 2.0,
            layout.inner_h + 26.0,
            key.label()
        ));
    }

    // Legend: entries centered under evenly spaced slots.
    let legend_y = layout.inner_h + 48.0;
    let slots = display.len().max(1) as f64;
    for (idx, name) in display.iter().enumerate() {
        let color = model_color(name);
        let cx = layout.inner_w * (idx as f64 + 0.5) / slots;
        let rect_x = cx - 40.0;
        svg.push(format!(
            r#"<rect x="{rect_x}" y="{}" width="12" height="12" fill="{color}" rx="2"/>"#,
            legend_y - 7.0
        ));
        svg.push(format!(
            r##"<text x="{}" y="{legend_y}" fill="#111827" font-size="12" dominant-baseline="middle">{}</text>"##,
            rect_x + 16.0,
            html_escape(name)
        ));
    }

    svg.push("</g></svg>".to_string());
    svg.join("")
}

fn push_bar(
    svg: &mut Vec<String>,
    layout: &ChartLayout,
    model: &ModelReport,
    key: MetricKey,
    band_x: f64,
    j: usize,
) {
    let h = layout.bar_height(model.metrics.get(key));
    let x = layout.bar_x(band_x, j);
    let y_top = layout.inner_h - h;
    let color = model_color(&model.name);
    svg.push(format!(
        r#"<rect x="{x}" y="{y_top}" width="{}" height="{h}" fill="{color}" rx="2" ry="2" />"#,
        layout.bar_width
    ));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
