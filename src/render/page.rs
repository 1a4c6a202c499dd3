//! Dashboard page assembly.
//!
//! The served document declares every target element the dashboard
//! contract names (`kpis`, `chart`, `metrics-rows`, `business-impact-grid`,
//! `notice`, `tx-form`, `result`, `prob`, the `transactionType` select and
//! the `isCashOut`/`isTransfer` inputs). Renderers never look elements up:
//! each slot is a field of [`DashboardView`] with an explicit empty state,
//! so a missing target cannot no-op silently.

use crate::metrics::format_pct;
use crate::render::{Notice, NoticeKind, html_escape};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Outcome rendered into the prediction result slot.
#[derive(Debug, Clone)]
pub enum PredictionSlot {
    /// No submission this render.
    Empty,
    /// The submission failed validation; every violation, together.
    Invalid(Vec<String>),
    /// The scoring endpoint answered.
    Scored { label: String, probability: f64 },
    /// The scoring call failed.
    Failed(String),
}

/// Everything the page template needs, one field per slot.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Badge text attached to the dashboard card header, when known.
    pub source_badge: Option<String>,
    pub notice: Option<Notice>,
    pub kpis: String,
    pub chart: String,
    pub table_rows: String,
    pub impact_grid: String,
    pub prediction: PredictionSlot,
}

impl DashboardView {
    /// A view with every slot empty — what renders when the metrics load
    /// fails and only the notice carries information.
    pub fn empty() -> Self {
        Self {
            source_badge: None,
            notice: None,
            kpis: String::new(),
            chart: String::new(),
            table_rows: String::new(),
            impact_grid: String::new(),
            prediction: PredictionSlot::Empty,
        }
    }
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

fn render_notice(notice: &Option<Notice>) -> String {
    match notice {
        Some(n) => {
            let class = match n.kind {
                NoticeKind::Info => "notice-info",
                NoticeKind::Error => "notice-error",
            };
            format!(r#"<div class="{class}">{}</div>"#, html_escape(&n.text))
        }
        None => String::new(),
    }
}

fn render_badge(badge: &Option<String>) -> String {
    match badge {
        Some(text) => format!(r#"<span class="source-badge">{}</span>"#, html_escape(text)),
        None => String::new(),
    }
}

fn render_result(slot: &PredictionSlot) -> (String, String) {
    match slot {
        PredictionSlot::Empty => (String::new(), String::new()),
        PredictionSlot::Invalid(violations) => {
            let items: String = violations
                .iter()
                .map(|v| format!("<li>{}</li>", html_escape(v)))
                .collect();
            (
                format!(
                    r#"<div class="result-error">Please correct the following:<ul>{items}</ul></div>"#
                ),
                String::new(),
            )
        }
        PredictionSlot::Scored { label, probability } => {
            let class = if label == "Fraud" {
                "label-fraud"
            } else {
                "label-legit"
            };
            (
                format!(
                    concat!(
                        r#"<div class="result-heading">Prediction</div>"#,
                        r#"<div class="result-label {}">{}</div>"#
                    ),
                    class,
                    html_escape(label)
                ),
                format!("Fraud probability: {}", format_pct(Some(*probability))),
            )
        }
        PredictionSlot::Failed(message) => (
            format!(
                r#"<div class="result-error">Error: {}</div>"#,
                html_escape(message)
            ),
            String::new(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Render the complete dashboard document.
pub fn render(view: &DashboardView) -> String {
    let (result, prob) = render_result(&view.prediction);

    format!(
        include_str!("page.html"),
        style = STYLE,
        badge = render_badge(&view.source_badge),
        notice = render_notice(&view.notice),
        kpis = view.kpis,
        chart = view.chart,
        table_rows = view.table_rows,
        impact_grid = view.impact_grid,
        result = result,
        prob = prob,
    )
}

/// Stylesheet inlined into the document head.
const STYLE: &str = r#"
:root {
  --bg: #f8fafc;
  --surface: #ffffff;
  --border: #e2e8f0;
  --text: #0f172a;
  --text-muted: #64748b;
  --accent: #d97706;
  --green: #059669;
  --red: #dc2626;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 14px; line-height: 1.5; }

.app { max-width: 1100px; margin: 0 auto; padding: 24px; }
header { margin-bottom: 24px; padding-bottom: 16px; border-bottom: 1px solid var(--border); }
header h1 { font-size: 22px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

.card { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 20px; margin-bottom: 16px; }
.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 16px; }

.source-badge { margin-left: 8px; vertical-align: middle; border-radius: 12px; background: #f1f5f9; padding: 2px 8px; font-size: 10px; text-transform: uppercase; letter-spacing: 0.5px; color: var(--text-muted); }

.notice-info { margin-bottom: 12px; border: 1px solid var(--border); border-radius: var(--radius); background: #f8fafc; color: #334155; padding: 8px 12px; font-size: 13px; }
.notice-error { margin-bottom: 12px; border: 1px solid #fecaca; border-radius: var(--radius); background: #fef2f2; color: #b91c1c; padding: 8px 12px; font-size: 13px; }

.kpi-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; margin-bottom: 16px; }
.kpi-card { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 12px; }
.kpi-label { font-size: 12px; color: var(--text-muted); margin-bottom: 4px; }
.kpi-value { font-size: 20px; font-weight: 700; color: var(--accent); }

.chart-svg { display: block; margin: 0 auto; }

table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 10px 12px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; font-size: 12px; text-transform: uppercase; letter-spacing: 0.5px; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
th.num { text-align: right; }
tr.row-primary { background: #fffbeb; font-weight: 600; }
.badge-primary { background: var(--accent); color: #fff; border-radius: 12px; padding: 2px 8px; font-size: 10px; font-weight: 600; }

.impact-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
.impact-panel { border: 1px solid var(--border); border-radius: var(--radius); padding: 16px; }
.impact-panel.tier-excellent { background: #ecfdf5; border-color: #a7f3d0; }
.impact-panel.tier-excellent .impact-model, .impact-panel.tier-excellent .impact-tier-label { color: var(--green); }
.impact-panel.tier-very-good { background: #fffbeb; border-color: #fde68a; }
.impact-panel.tier-very-good .impact-model, .impact-panel.tier-very-good .impact-tier-label { color: var(--accent); }
.impact-panel.tier-good { background: #eff6ff; border-color: #bfdbfe; }
.impact-panel.tier-good .impact-model, .impact-panel.tier-good .impact-tier-label { color: #2563eb; }
.impact-panel.tier-poor { background: #fef2f2; border-color: #fecaca; }
.impact-panel.tier-poor .impact-model, .impact-panel.tier-poor .impact-tier-label { color: var(--red); }
.impact-model { font-size: 16px; margin-bottom: 10px; }
.impact-tier { margin-bottom: 12px; }
.impact-tier-heading { font-size: 12px; font-weight: 600; color: #334155; }
.impact-tier-label { font-weight: 700; }
.impact-box { background: rgba(255,255,255,0.6); border: 1px solid rgba(255,255,255,0.4); border-radius: 6px; padding: 10px; margin-bottom: 10px; font-size: 12px; }
.impact-box-title { font-weight: 700; text-transform: uppercase; letter-spacing: 0.5px; color: #475569; margin-bottom: 6px; }
.impact-line { color: #475569; margin-bottom: 4px; }
.impact-split { display: flex; justify-content: space-between; margin-bottom: 4px; }
.count-good { color: var(--green); font-weight: 500; }
.count-bad { color: var(--red); font-weight: 500; }
.impact-metric { color: var(--text-muted); }

form .field { margin-bottom: 12px; }
form label { display: block; font-size: 12px; color: var(--text-muted); margin-bottom: 4px; }
form input, form select { width: 100%; border: 1px solid var(--border); border-radius: 6px; padding: 8px 10px; font-size: 13px; background: var(--surface); color: var(--text); }
form input:focus, form select:focus { outline: none; border-color: var(--accent); }
.form-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 0 16px; }
button[type=submit] { border: none; border-radius: 6px; background: var(--accent); color: #fff; padding: 8px 20px; font-size: 13px; font-weight: 600; cursor: pointer; }
button[type=submit]:hover { opacity: 0.9; }

.result-heading { font-size: 13px; color: var(--text-muted); }
.result-label { margin-top: 4px; font-size: 24px; font-weight: 600; }
.label-fraud { color: var(--red); }
.label-legit { color: var(--green); }
.result-error { color: var(--red); font-size: 13px; }
.result-error ul { margin: 6px 0 0 18px; }
#prob { margin-top: 6px; color: var(--text-muted); font-size: 13px; }
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
