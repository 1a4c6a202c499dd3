//! CLI command implementations for fraudlens.
//!
//! Provides subcommand handlers for:
//! - `fraudlens metrics` — model comparison table and business impact
//! - `fraudlens predict` — score one transaction from the command line
//! - `fraudlens health` — check upstream endpoints, snapshot, config

use anyhow::Result;
use colored::Colorize;

use crate::config::{self, FraudlensConfig};
use crate::metrics::impact::{self, PerformanceTier, TOTAL_TRANSACTIONS};
use crate::metrics::source::{MetricsOrigin, MetricsSource, source_badge};
use crate::metrics::{MetricKey, MetricsResponse, format_pct};
use crate::predict::client::ScoringClient;
use crate::predict::{PredictionRequest, TransactionType};

/// Output format for the metrics command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// fraudlens metrics
// ---------------------------------------------------------------------------

/// Load metrics and print the comparison report.
pub fn run_metrics(format: OutputFormat, cfg: &FraudlensConfig) -> Result<()> {
    let source = MetricsSource::from_config(&cfg.upstream);
    let loaded = source.load()?;

    if loaded.origin == MetricsOrigin::Snapshot && format == OutputFormat::Table {
        println!(
            "{}",
            "Using local precomputed metrics (fallback).".yellow()
        );
    }

    if loaded.data.models.is_empty() {
        println!("{}", "No models in the metrics response.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_metrics_json(&loaded.data)?,
        OutputFormat::Csv => print_metrics_csv(&loaded.data),
        OutputFormat::Table => print_metrics_table(&loaded.data),
    }

    Ok(())
}

fn print_metrics_table(data: &MetricsResponse) {
    println!("{}", "Fraud Detection — Model Metrics".bold().cyan());
    println!("{}", "=".repeat(72));
    println!("  Source: {}", source_badge(&data.source));
    if let Some(count) = data.count {
        println!("  Evaluation set: {count} transactions");
    }
    println!();

    println!(
        "  {:<16} {:>9} {:>10} {:>8} {:>8} {:>8}",
        "Model", "Accuracy", "Precision", "Recall", "F1", "ROC AUC"
    );
    println!("  {}", "-".repeat(66));

    for (i, model) in data.models.iter().enumerate() {
        let m = &model.metrics;
        let line = format!(
            "  {:<16} {:>9} {:>10} {:>8} {:>8} {:>8}",
            model.name,
            format_pct(m.accuracy),
            format_pct(m.precision),
            format_pct(m.recall),
            format_pct(m.f1),
            format_pct(m.roc_auc),
        );

        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
    println!();

    // Business impact projection
    println!(
        "{}",
        format!(
            "Business Impact — {} transactions, 1% fraud",
            TOTAL_TRANSACTIONS
        )
        .bold()
        .cyan()
    );
    println!(
        "  {:<16} {:<18} {:>8} {:>8} {:>8} {:>12}",
        "Model", "Tier", "Flagged", "Caught", "Missed", "False Alarms"
    );
    println!("  {}", "-".repeat(74));

    for model in &data.models {
        let tier = PerformanceTier::from_f1(model.metrics.f1);
        match impact::estimate(&model.metrics) {
            Some(est) => println!(
                "  {:<16} {:<18} {:>8} {:>8} {:>8} {:>12}",
                model.name,
                tier.label(),
                est.total_flagged,
                est.true_positives,
                est.false_negatives,
                est.false_positives,
            ),
            None => println!(
                "  {:<16} {:<18} {:>8} {:>8} {:>8} {:>12}",
                model.name,
                tier.label(),
                "—",
                "—",
                "—",
                "—"
            ),
        }
    }
}

fn print_metrics_json(data: &MetricsResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_metrics_csv(data: &MetricsResponse) {
    println!("model,accuracy,precision,recall,f1,roc_auc");
    for model in &data.models {
        let cells: Vec<String> = MetricKey::ALL
            .iter()
            .map(|key| {
                model
                    .metrics
                    .get(*key)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        println!("{},{}", model.name, cells.join(","));
    }
}

// ---------------------------------------------------------------------------
// fraudlens predict
// ---------------------------------------------------------------------------

/// Score one transaction and print the outcome.
#[allow(clippy::too_many_arguments)]
pub fn run_predict(
    cfg: &FraudlensConfig,
    tx_type: &str,
    amount: f64,
    old_balance_org: f64,
    new_balance_orig: f64,
    old_balance_dest: f64,
    new_balance_dest: f64,
) -> Result<()> {
    let Some(tx_type) = TransactionType::parse(tx_type) else {
        anyhow::bail!(
            "unknown transaction type '{tx_type}' (expected cashout, debit, payment, or transfer)"
        );
    };

    let request = PredictionRequest::assemble(
        tx_type,
        amount,
        old_balance_org,
        new_balance_orig,
        old_balance_dest,
        new_balance_dest,
    );

    let client = ScoringClient::from_config(&cfg.upstream);
    match client.predict(&request) {
        Ok(resp) => {
            let label = if resp.is_fraud() {
                resp.label.red().bold()
            } else {
                resp.label.green().bold()
            };
            println!("Prediction:        {label}");
            println!(
                "Fraud probability: {}",
                format_pct(Some(resp.probability))
            );
        }
        Err(e) => {
            println!("{} {e:#}", "Prediction failed:".red().bold());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// fraudlens health
// ---------------------------------------------------------------------------

/// Check upstream endpoints, the snapshot file, and the config file.
pub fn run_health(cfg: &FraudlensConfig) -> Result<()> {
    println!("{}", "fraudlens health".bold().cyan());
    println!("{}", "=".repeat(50));

    let source = MetricsSource::from_config(&cfg.upstream);

    let metrics_ok = source.is_reachable();
    print_check(
        "Metrics API",
        metrics_ok,
        &cfg.upstream.metrics_url,
        "unreachable — the dashboard will use the snapshot",
    );

    print_check(
        "Snapshot",
        source.snapshot_exists(),
        &cfg.upstream.snapshot_path,
        "missing — no fallback if the live fetch fails",
    );

    let config_path = config::global_config_file();
    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);
    let config_display = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.fraudlens/config.toml".to_string());
    print_check(
        "Config",
        config_exists,
        &config_display,
        "not found — using built-in defaults",
    );

    println!("  {:<12} {}", "Predict API", cfg.upstream.predict_url);

    Ok(())
}

fn print_check(label: &str, ok: bool, detail: &str, warn: &str) {
    if ok {
        println!("  {:<12} {} {}", label, "ok".green(), detail.dimmed());
    } else {
        println!("  {:<12} {} {}", label, "!!".yellow(), warn.yellow());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
