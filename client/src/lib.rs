//! Client core for the ExplainCheck verification service.
//!
//! This crate submits explanations to the verification backend, tracks the
//! request lifecycle, and renders the returned critique through output-port
//! traits that a host (terminal, web view, tests) implements.

pub mod api;
pub mod charts;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod notify;
pub mod render;

pub use api::{HttpVerifierApi, VerifierApi};
pub use charts::{ChartHandle, ChartKind, ChartLifecycleManager, ChartSpec, ChartSurface};
pub use config::Config;
pub use controller::{FormControls, SubmitOutcome, VerificationController, FALLBACK_DEMO};
pub use error::{Error, Result};
pub use models::{Phase, VerificationRequest, VerificationResponse};
pub use notify::{NotificationService, NotificationSurface, Severity};
pub use render::{ClaimCard, Listing, MetricBand, MetricRow, ResultView, SimilarityBanner, StatusBadge};
