//! Chart widget lifecycle.
//!
//! The three result charts are always replaced as a set: every previously
//! created widget is destroyed before its successor is created, so a surface
//! never holds two canvases for the same chart or mixes data from two
//! responses.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::models::{ChartData, ConfidenceDistribution, MetricsRadar, StatusDistribution};

pub const GREEN: &str = "#10b981";
pub const AMBER: &str = "#f59e0b";
pub const RED: &str = "#ef4444";
pub const BLUE: &str = "#3b82f6";

/// Which of the three result charts a spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    StatusPie,
    ConfidenceBar,
    MetricsRadar,
}

/// Everything a charting backend needs to draw one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// One color per label, or a single series color for the radar
    pub colors: Vec<&'static str>,
}

/// Opaque handle to a live widget, issued by a `ChartSurface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Output port to the charting backend.
pub trait ChartSurface: Send + Sync {
    /// Construct a widget and return its handle.
    fn create(&self, spec: &ChartSpec) -> ChartHandle;

    /// Tear down a widget created by `create`.
    fn destroy(&self, handle: ChartHandle);
}

/// Pie over the overall status counts.
pub fn status_pie(distribution: &StatusDistribution) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::StatusPie,
        labels: vec!["Valid".into(), "Invalid".into(), "Questionable".into()],
        values: vec![
            distribution.valid as f64,
            distribution.invalid as f64,
            distribution.questionable as f64,
        ],
        colors: vec![GREEN, RED, AMBER],
    }
}

/// Bar chart over claim confidence buckets.
pub fn confidence_bar(distribution: &ConfidenceDistribution) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::ConfidenceBar,
        labels: vec!["High".into(), "Medium".into(), "Low".into()],
        values: vec![
            distribution.high as f64,
            distribution.medium as f64,
            distribution.low as f64,
        ],
        colors: vec![GREEN, AMBER, RED],
    }
}

/// Radar over the labelled metric series.
pub fn metrics_radar(radar: &MetricsRadar) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::MetricsRadar,
        labels: radar.labels.clone(),
        values: radar.values.clone(),
        colors: vec![BLUE],
    }
}

#[derive(Debug, Clone, Copy)]
struct ChartSet {
    status: ChartHandle,
    confidence: ChartHandle,
    radar: ChartHandle,
}

/// Sole owner of the three live chart handles.
pub struct ChartLifecycleManager {
    surface: Arc<dyn ChartSurface>,
    live: Mutex<Option<ChartSet>>,
}

impl ChartLifecycleManager {
    pub fn new(surface: Arc<dyn ChartSurface>) -> Self {
        Self {
            surface,
            live: Mutex::new(None),
        }
    }

    /// Replace all three charts with widgets built from `chart_data`.
    ///
    /// `None` leaves whatever is currently on screen.
    pub fn render_charts(&self, chart_data: Option<&ChartData>) {
        let Some(data) = chart_data else {
            debug!("No chart data; keeping existing charts");
            return;
        };

        let specs = [
            status_pie(&data.status_distribution),
            confidence_bar(&data.confidence_distribution),
            metrics_radar(&data.metrics_radar),
        ];

        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(old) = live.take() {
            for handle in [old.status, old.confidence, old.radar] {
                self.surface.destroy(handle);
            }
        }

        let [status, confidence, radar] = specs.map(|spec| self.surface.create(&spec));
        *live = Some(ChartSet {
            status,
            confidence,
            radar,
        });

        debug!(?status, ?confidence, ?radar, "Charts rebuilt");
    }

    /// Handles of the live widgets, in status/confidence/radar order.
    pub fn handles(&self) -> Option<[ChartHandle; 3]> {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|set| [set.status, set.confidence, set.radar])
    }
}
