//! HTTP client for the upstream scoring endpoint.
//!
//! Posts the assembled [`PredictionRequest`](super::PredictionRequest) as
//! JSON using the synchronous `ureq` client. A non-2xx status or a response
//! that is not `application/json` is an error — neither ever reaches the
//! success path.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::PredictionRequest;
use crate::config::schema::UpstreamConfig;

/// Response body from the scoring endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// `"Fraud"` or `"Legit"`.
    pub label: String,
    /// Fraud probability in `[0, 1]`.
    pub probability: f64,
}

impl PredictionResponse {
    /// Whether the scored transaction was labeled fraudulent.
    pub fn is_fraud(&self) -> bool {
        self.label == "Fraud"
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous scoring client bound to one upstream configuration.
#[derive(Debug)]
pub struct ScoringClient {
    url: String,
    timeout: Duration,
}

impl ScoringClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            url: config.predict_url.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Score one transaction.
    ///
    /// Errors carry enough detail to show the user: the HTTP status and
    /// body on a non-2xx answer, the offending content type on a non-JSON
    /// one.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let resp = ureq::post(&self.url)
            .timeout(self.timeout)
            .send_json(request);

        let resp = match resp {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                let detail = if body.trim().is_empty() {
                    "unknown error".to_string()
                } else {
                    body
                };
                anyhow::bail!("API Error ({code}): {detail}");
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("prediction request to {} failed", self.url)
                });
            }
        };

        let content_type = resp.header("Content-Type").unwrap_or("").to_string();
        if !content_type.contains("application/json") {
            anyhow::bail!(
                "expected a JSON response, got content type \"{content_type}\""
            );
        }

        resp.into_json()
            .context("failed to parse prediction response as JSON")
    }

    /// The configured scoring endpoint, for health reports.
    pub fn url(&self) -> &str {
        &self.url
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
