//! Mapping from a validated response to the result panels.
//!
//! Each panel has a pure builder that turns response data into a view model
//! and a `render_*` function that hands the view model to its target on the
//! `ResultView` port. Targets replace the panel's whole content on every
//! call, so rendering the same response twice shows the same thing once.

use tracing::debug;

use crate::charts::ChartLifecycleManager;
use crate::models::{Claim, Issue, Metrics, OverallStatus, SimilarityMatch, VerificationResponse};

pub const NO_RECOMMENDATIONS: &str = "No recommendations available.";
pub const NO_CLAIMS: &str = "No claims were analyzed.";
pub const NO_ISSUES: &str = "No issues detected.";
pub const NO_ASSUMPTIONS: &str = "No assumptions identified.";
pub const NOVEL_SCENARIO: &str =
    "No similar scenario found. This appears to be a novel case.";

/// Content of a list panel: the items, or a single placeholder line.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Items(Vec<T>),
    Empty(&'static str),
}

impl<T> Listing<T> {
    fn from_items(items: Vec<T>, placeholder: &'static str) -> Self {
        if items.is_empty() {
            Listing::Empty(placeholder)
        } else {
            Listing::Items(items)
        }
    }
}

/// Similarity banner state.
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityBanner {
    Hidden,
    MatchFound {
        similarity: String,
        matched_scenario: String,
        recommendation: String,
        message: String,
    },
    Novel {
        message: String,
    },
}

impl SimilarityBanner {
    pub fn class(&self) -> Option<&'static str> {
        match self {
            SimilarityBanner::Hidden => None,
            SimilarityBanner::MatchFound { .. } => Some("match-found"),
            SimilarityBanner::Novel { .. } => Some("no-match"),
        }
    }

    /// Banner body as displayed.
    pub fn text(&self) -> String {
        match self {
            SimilarityBanner::Hidden => String::new(),
            SimilarityBanner::MatchFound {
                similarity,
                matched_scenario,
                recommendation,
                message,
            } => {
                let mut text = format!(
                    "{similarity} match with known scenario: {matched_scenario}\nRecommendation: {recommendation}"
                );
                if !message.is_empty() {
                    text.push('\n');
                    text.push_str(message);
                }
                text
            }
            SimilarityBanner::Novel { message } => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub status: OverallStatus,
    pub label: &'static str,
    pub class: &'static str,
    pub summary: String,
}

/// Color band for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricBand {
    Good,
    Warning,
    Critical,
}

impl MetricBand {
    /// Lower edges are inclusive: 75 is good, 50 is warning.
    pub fn classify(value: f64) -> Self {
        if value >= 75.0 {
            MetricBand::Good
        } else if value >= 50.0 {
            MetricBand::Warning
        } else {
            MetricBand::Critical
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            MetricBand::Good => "good",
            MetricBand::Warning => "warning",
            MetricBand::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub percent: String,
    /// Bar fill, clamped to 0-100
    pub fill: f64,
    pub band: MetricBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCard {
    pub status: String,
    pub confidence: String,
    pub claim: String,
    pub reasoning: String,
}

/// Output port for the result panels.
pub trait ResultView: Send + Sync {
    fn set_results_visible(&self, visible: bool);
    fn similarity_banner(&self, banner: &SimilarityBanner);
    fn status(&self, badge: &StatusBadge);
    fn metrics(&self, rows: &[MetricRow]);
    fn recommendations(&self, lines: &Listing<String>);
    fn claims(&self, cards: &Listing<ClaimCard>);
    fn issues(&self, lines: &Listing<String>);
    fn assumptions(&self, lines: &Listing<String>);
}

/// Whole percent, truncated so a label never reads as the next band up.
fn percent(value: f64) -> String {
    format!("{:.0}%", value.floor())
}

pub fn similarity_banner(similarity: Option<&SimilarityMatch>) -> SimilarityBanner {
    match similarity {
        None => SimilarityBanner::Hidden,
        Some(m) if m.found => SimilarityBanner::MatchFound {
            similarity: percent(m.similarity_score),
            matched_scenario: m.matched_scenario.clone(),
            recommendation: m.recommendation.clone(),
            message: m.message.clone(),
        },
        Some(m) => SimilarityBanner::Novel {
            message: if m.message.is_empty() {
                NOVEL_SCENARIO.to_string()
            } else {
                m.message.clone()
            },
        },
    }
}

pub fn status_badge(status: OverallStatus, summary: &str) -> StatusBadge {
    StatusBadge {
        status,
        label: status.label(),
        class: status.as_str(),
        summary: summary.to_string(),
    }
}

pub fn metric_rows(metrics: &Metrics) -> Vec<MetricRow> {
    metrics
        .entries()
        .into_iter()
        .map(|(key, label, value)| MetricRow {
            key,
            label,
            value,
            percent: percent(value),
            fill: value.clamp(0.0, 100.0),
            band: MetricBand::classify(value),
        })
        .collect()
}

pub fn recommendation_lines(recommendations: &[String]) -> Listing<String> {
    Listing::from_items(recommendations.to_vec(), NO_RECOMMENDATIONS)
}

pub fn claim_cards(claims: &[Claim]) -> Listing<ClaimCard> {
    let cards = claims
        .iter()
        .map(|c| ClaimCard {
            status: c.status.clone(),
            confidence: percent(c.confidence),
            claim: c.claim.clone(),
            reasoning: c.reasoning.clone(),
        })
        .collect();
    Listing::from_items(cards, NO_CLAIMS)
}

pub fn issue_lines(issues: &[Issue]) -> Listing<String> {
    let lines = issues
        .iter()
        .map(|i| match &i.severity {
            Some(severity) => format!("{} ({}): {}", i.kind, severity, i.description),
            None => format!("{}: {}", i.kind, i.description),
        })
        .collect();
    Listing::from_items(lines, NO_ISSUES)
}

pub fn assumption_lines(assumptions: &[String]) -> Listing<String> {
    Listing::from_items(assumptions.to_vec(), NO_ASSUMPTIONS)
}

pub fn render_similarity_banner(view: &dyn ResultView, similarity: Option<&SimilarityMatch>) {
    view.similarity_banner(&similarity_banner(similarity));
}

pub fn render_status(view: &dyn ResultView, status: OverallStatus, summary: &str) {
    view.status(&status_badge(status, summary));
}

pub fn render_metrics(view: &dyn ResultView, metrics: &Metrics) {
    view.metrics(&metric_rows(metrics));
}

pub fn render_recommendations(view: &dyn ResultView, recommendations: Option<&[String]>) {
    view.recommendations(&recommendation_lines(recommendations.unwrap_or_default()));
}

pub fn render_claims(view: &dyn ResultView, claims: Option<&[Claim]>) {
    view.claims(&claim_cards(claims.unwrap_or_default()));
}

/// Fan a validated response out to every panel, in display order.
pub fn render_response(
    view: &dyn ResultView,
    charts: &ChartLifecycleManager,
    response: &VerificationResponse,
) {
    debug!(status = response.overall_status.as_str(), "Rendering results");

    view.set_results_visible(true);
    render_similarity_banner(view, response.similarity_match.as_ref());
    render_status(view, response.overall_status, &response.summary);
    render_metrics(view, &response.metrics);
    charts.render_charts(response.chart_data.as_ref());
    render_recommendations(view, Some(response.recommendations.as_slice()));
    render_claims(view, Some(response.claims.as_slice()));
    view.issues(&issue_lines(&response.issues));
    view.assumptions(&assumption_lines(&response.assumptions));
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Keeps the latest content of every panel, the way a page would.
    #[derive(Default)]
    pub struct PanelState {
        pub visible: bool,
        pub banner: Option<SimilarityBanner>,
        pub status: Option<StatusBadge>,
        pub metrics: Vec<MetricRow>,
        pub recommendations: Option<Listing<String>>,
        pub claims: Option<Listing<ClaimCard>>,
        pub issues: Option<Listing<String>>,
        pub assumptions: Option<Listing<String>>,
        /// Panel names in the order they were written
        pub writes: Vec<&'static str>,
    }

    #[derive(Default)]
    pub struct RecordingView {
        pub state: Mutex<PanelState>,
    }

    impl ResultView for RecordingView {
        fn set_results_visible(&self, visible: bool) {
            let mut state = self.state.lock().unwrap();
            state.visible = visible;
            state.writes.push("visible");
        }

        fn similarity_banner(&self, banner: &SimilarityBanner) {
            let mut state = self.state.lock().unwrap();
            state.banner = Some(banner.clone());
            state.writes.push("similarity");
        }

        fn status(&self, badge: &StatusBadge) {
            let mut state = self.state.lock().unwrap();
            state.status = Some(badge.clone());
            state.writes.push("status");
        }

        fn metrics(&self, rows: &[MetricRow]) {
            let mut state = self.state.lock().unwrap();
            state.metrics = rows.to_vec();
            state.writes.push("metrics");
        }

        fn recommendations(&self, lines: &Listing<String>) {
            let mut state = self.state.lock().unwrap();
            state.recommendations = Some(lines.clone());
            state.writes.push("recommendations");
        }

        fn claims(&self, cards: &Listing<ClaimCard>) {
            let mut state = self.state.lock().unwrap();
            state.claims = Some(cards.clone());
            state.writes.push("claims");
        }

        fn issues(&self, lines: &Listing<String>) {
            let mut state = self.state.lock().unwrap();
            state.issues = Some(lines.clone());
            state.writes.push("issues");
        }

        fn assumptions(&self, lines: &Listing<String>) {
            let mut state = self.state.lock().unwrap();
            state.assumptions = Some(lines.clone());
            state.writes.push("assumptions");
        }
    }
}
