//! Wire and state models for the verification API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Error, Result};

/// Message shown when the user submits a blank explanation.
pub const EMPTY_EXPLANATION_MESSAGE: &str = "Please enter an explanation to verify.";

/// Request body for `POST /verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VerificationRequest {
    /// Explanation text, already trimmed
    #[validate(length(min = 1, message = "Please enter an explanation to verify."))]
    pub explanation: String,
    /// Domain selector from the form
    pub domain: String,
}

impl VerificationRequest {
    /// Build a request from raw form input.
    pub fn new(explanation: &str, domain: &str) -> Self {
        Self {
            explanation: explanation.trim().to_string(),
            domain: domain.to_string(),
        }
    }
}

/// Overall verdict for an explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Valid,
    Invalid,
    Questionable,
}

impl OverallStatus {
    /// Human-readable badge label.
    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Valid => "Valid",
            OverallStatus::Invalid => "Invalid",
            OverallStatus::Questionable => "Questionable",
        }
    }

    /// Wire name, also used as the style class.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Valid => "valid",
            OverallStatus::Invalid => "invalid",
            OverallStatus::Questionable => "questionable",
        }
    }
}

/// Backend's report on whether the explanation resembles a known scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub found: bool,
    #[serde(default)]
    pub similarity_score: f64,
    #[serde(default)]
    pub matched_scenario: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub message: String,
}

/// The five quality metrics, each nominally 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub data_quality: f64,
    pub logical_consistency: f64,
    pub completeness: f64,
    pub evidence_strength: f64,
    pub contextual_relevance: f64,
}

impl Metrics {
    /// Metrics in display order as `(wire key, label, value)`.
    pub fn entries(&self) -> [(&'static str, &'static str, f64); 5] {
        [
            ("data_quality", "Data Quality", self.data_quality),
            ("logical_consistency", "Logical Consistency", self.logical_consistency),
            ("completeness", "Completeness", self.completeness),
            ("evidence_strength", "Evidence Strength", self.evidence_strength),
            ("contextual_relevance", "Contextual Relevance", self.contextual_relevance),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub valid: u32,
    pub invalid: u32,
    pub questionable: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// Radar series; `labels[i]` names `values[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRadar {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Data behind the three chart widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub status_distribution: StatusDistribution,
    pub confidence_distribution: ConfidenceDistribution,
    pub metrics_radar: MetricsRadar,
}

/// One atomic assertion extracted from the explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim: String,
    /// Free-form verdict such as `valid` or `unverified`
    pub status: String,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// A problem the backend flagged in the explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Response body for `POST /verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub overall_status: OverallStatus,
    pub summary: String,
    #[serde(default)]
    pub similarity_match: Option<SimilarityMatch>,
    pub metrics: Metrics,
    #[serde(default)]
    pub chart_data: Option<ChartData>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub claims: Vec<Claim>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

impl VerificationResponse {
    /// Parse and shape-check a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let response: Self = serde_json::from_slice(body)
            .map_err(|e| Error::MalformedPayload(e.to_string()))?;
        response.validate()?;
        Ok(response)
    }

    /// Check invariants serde cannot express.
    ///
    /// Out-of-range percentages are accepted; only values no panel could
    /// render are refused.
    pub fn validate(&self) -> Result<()> {
        for (key, _, value) in self.metrics.entries() {
            ensure_finite(key, value)?;
        }

        if let Some(similarity) = &self.similarity_match {
            ensure_finite("similarity_score", similarity.similarity_score)?;
        }

        if let Some(chart_data) = &self.chart_data {
            let radar = &chart_data.metrics_radar;
            if radar.labels.len() != radar.values.len() {
                return Err(Error::MalformedPayload(format!(
                    "metrics_radar has {} labels but {} values",
                    radar.labels.len(),
                    radar.values.len()
                )));
            }
            for value in &radar.values {
                ensure_finite("metrics_radar", *value)?;
            }
        }

        for claim in &self.claims {
            ensure_finite("claim confidence", claim.confidence)?;
        }

        Ok(())
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::MalformedPayload(format!("{field} is not a finite number")))
    }
}

/// A sample explanation served by `GET /random-demo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoScenario {
    pub title: String,
    pub explanation: String,
}

/// Response body for `GET /random-demo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoResponse {
    pub success: bool,
    #[serde(default)]
    pub demo: Option<DemoScenario>,
}

/// Stage of the verification request lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Controller-owned request state.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    pub phase: Phase,
    pub last_response: Option<VerificationResponse>,
}
