//! Console host - renders ExplainCheck verification results in a terminal.
//!
//! Usage: `explaincheck-console [--domain <domain>] [--demo] [explanation...]`
//!
//! Results go to stdout, notifications and logs to stderr.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use explaincheck_client::{
    ChartHandle, ChartLifecycleManager, ChartSpec, ChartSurface, ClaimCard, Config, FormControls,
    HttpVerifierApi, Listing, MetricRow, NotificationService, NotificationSurface, ResultView,
    Severity, SimilarityBanner, StatusBadge, SubmitOutcome, VerificationController,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "explaincheck-console", version)]
struct Args {
    /// Domain the explanation belongs to
    #[arg(long, default_value = "agriculture")]
    domain: String,
    /// Load a sample explanation from the backend before verifying
    #[arg(long)]
    demo: bool,
    /// Explanation text; words are joined with spaces
    explanation: Vec<String>,
}

/// Terminal implementation of every output port.
#[derive(Default)]
struct Terminal {
    next_chart: AtomicU64,
}

fn print_listing(title: &str, listing: &Listing<String>) {
    println!("{title}:");
    match listing {
        Listing::Items(lines) => lines.iter().for_each(|line| println!("  - {line}")),
        Listing::Empty(placeholder) => println!("  {placeholder}"),
    }
}

impl ResultView for Terminal {
    fn set_results_visible(&self, visible: bool) {
        if visible {
            println!("==== Verification results ====");
        }
    }

    fn similarity_banner(&self, banner: &SimilarityBanner) {
        if let Some(class) = banner.class() {
            println!("[{class}] {}", banner.text());
        }
    }

    fn status(&self, badge: &StatusBadge) {
        println!("Status: {} - {}", badge.label, badge.summary);
    }

    fn metrics(&self, rows: &[MetricRow]) {
        println!("Metrics:");
        for row in rows {
            println!(
                "  {:<22} {:>5}  [{}]",
                row.label,
                row.percent,
                row.band.class()
            );
        }
    }

    fn recommendations(&self, lines: &Listing<String>) {
        print_listing("Recommendations", lines);
    }

    fn claims(&self, cards: &Listing<ClaimCard>) {
        println!("Claims:");
        match cards {
            Listing::Items(cards) => {
                for card in cards {
                    println!("  [{}] {} confidence", card.status, card.confidence);
                    println!("    {}", card.claim);
                    println!("    {}", card.reasoning);
                }
            }
            Listing::Empty(placeholder) => println!("  {placeholder}"),
        }
    }

    fn issues(&self, lines: &Listing<String>) {
        print_listing("Issues", lines);
    }

    fn assumptions(&self, lines: &Listing<String>) {
        print_listing("Assumptions", lines);
    }
}

impl FormControls for Terminal {
    fn set_submit_enabled(&self, enabled: bool) {
        if !enabled {
            eprintln!("Verifying...");
        }
    }

    fn set_explanation(&self, text: &str) {
        println!("Explanation: {text}");
    }
}

impl ChartSurface for Terminal {
    fn create(&self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_chart.fetch_add(1, Ordering::Relaxed));
        let series: Vec<String> = spec
            .labels
            .iter()
            .zip(&spec.values)
            .map(|(label, value)| format!("{label}={value}"))
            .collect();
        println!("Chart {:?}: {}", spec.kind, series.join(", "));
        handle
    }

    fn destroy(&self, _handle: ChartHandle) {}
}

impl NotificationSurface for Terminal {
    fn show(&self, _id: Uuid, message: &str, severity: Severity) {
        eprintln!("[{}] {message}", severity.as_str());
    }

    fn dismiss(&self, _id: Uuid) {}

    fn remove(&self, _id: Uuid) {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    info!(base_url = %config.base_url, domain = %args.domain, "Starting console");

    let terminal = Arc::new(Terminal::default());
    let controller = VerificationController::new(
        Arc::new(HttpVerifierApi::new(&config)),
        terminal.clone(),
        terminal.clone(),
        ChartLifecycleManager::new(terminal.clone()),
        NotificationService::new(terminal.clone()),
        &config,
    );

    let explanation = if args.demo {
        controller.load_random_demo().await
    } else {
        args.explanation.join(" ")
    };

    let outcome = controller.submit(&explanation, &args.domain).await;
    controller.notifier().settle().await;

    match outcome {
        SubmitOutcome::Rendered => Ok(()),
        SubmitOutcome::Failed(e) => Err(e.into()),
        SubmitOutcome::Rejected => bail!("nothing to verify"),
        SubmitOutcome::Ignored => bail!("a verification was already running"),
    }
}
