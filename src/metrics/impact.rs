//! Business impact estimation: confusion-matrix counts derived from
//! precision and recall under a fixed traffic assumption.
//!
//! The dashboard projects each model's metrics onto a hypothetical day of
//! 10,000 transactions with a 1% fraud rate. Counts are derived, not
//! measured: recall fixes how many of the actual fraud cases are caught,
//! precision fixes how many false alarms ride along.

use crate::metrics::MetricSet;

/// Transactions in the projection window.
pub const TOTAL_TRANSACTIONS: u32 = 10_000;

/// Assumed fraud rate over the projection window.
pub const FRAUD_RATE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Estimate
// ---------------------------------------------------------------------------

/// Derived confusion-matrix counts for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactEstimate {
    /// Fraud cases in the window (`TOTAL_TRANSACTIONS * FRAUD_RATE`).
    pub actual_fraud: u32,
    /// Fraud cases the model catches: `round(actual_fraud * recall)`.
    pub true_positives: u32,
    /// Fraud cases the model misses.
    pub false_negatives: u32,
    /// Legitimate transactions flagged: `round(tp / precision - tp)`.
    pub false_positives: u32,
    /// Everything the model flags, genuine or not.
    pub total_flagged: u32,
}

/// Derive impact counts from a model's precision and recall.
///
/// Returns `None` when the estimate is unmeasurable: precision or recall
/// absent or non-finite, or precision not strictly positive (the derivation
/// divides by precision).
pub fn estimate(metrics: &MetricSet) -> Option<ImpactEstimate> {
    let recall = metrics.recall.filter(|v| v.is_finite())?;
    let precision = metrics.precision.filter(|v| v.is_finite() && *v > 0.0)?;

    let actual_fraud = (TOTAL_TRANSACTIONS as f64 * FRAUD_RATE).round() as u32;
    let true_positives = (actual_fraud as f64 * recall).round() as u32;
    let false_negatives = actual_fraud.saturating_sub(true_positives);
    let false_positives =
        (true_positives as f64 / precision - true_positives as f64).round() as u32;
    let total_flagged = true_positives + false_positives;

    Some(ImpactEstimate {
        actual_fraud,
        true_positives,
        false_negatives,
        false_positives,
        total_flagged,
    })
}

// ---------------------------------------------------------------------------
// Performance tiers
// ---------------------------------------------------------------------------

/// Qualitative performance band, thresholded on F1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Excellent,
    VeryGood,
    Good,
    NeedsImprovement,
}

impl PerformanceTier {
    /// Band an F1 value: ≥0.9, ≥0.8, ≥0.7, else the lowest band.
    /// A missing F1 lands in the lowest band.
    pub fn from_f1(f1: Option<f64>) -> Self {
        match f1 {
            Some(v) if v >= 0.9 => Self::Excellent,
            Some(v) if v >= 0.8 => Self::VeryGood,
            Some(v) if v >= 0.7 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    /// CSS class suffix used by the impact panels.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "tier-excellent",
            Self::VeryGood => "tier-very-good",
            Self::Good => "tier-good",
            Self::NeedsImprovement => "tier-poor",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
