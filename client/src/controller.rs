//! Verification request lifecycle.
//!
//! The controller owns `RequestState` and is the only place it changes. A
//! submit moves the phase `Idle -> Loading -> Success | Error -> Idle`;
//! results reach the panels only after the whole payload has been checked,
//! and failures leave the previously rendered result on screen.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::api::VerifierApi;
use crate::charts::ChartLifecycleManager;
use crate::models::{Phase, RequestState, VerificationRequest, VerificationResponse};
use crate::notify::{NotificationService, Severity};
use crate::render::{self, ResultView};
use crate::{Config, Error, Result};

/// Explanation used when the demo endpoint has nothing to offer.
pub const FALLBACK_DEMO: &str = "You should water banana plants at 5pm because the soil is cooler, leading to less evaporation. Given that banana plants need consistent moisture, this timing maximizes water absorption.";

/// Output port for the input form.
pub trait FormControls: Send + Sync {
    /// Enable or disable the submit control.
    fn set_submit_enabled(&self, enabled: bool);

    /// Replace the explanation field's text.
    fn set_explanation(&self, text: &str);
}

/// What a call to `submit` did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The response was rendered.
    Rendered,
    /// The request failed; the user was notified.
    Failed(Error),
    /// Blank input; no request was sent.
    Rejected,
    /// Another request was already in flight.
    Ignored,
}

#[derive(Default)]
struct ControllerState {
    request: RequestState,
    in_flight: bool,
}

/// Releases the in-flight guard when a submit ends, including when its
/// future is dropped before the backend answers.
struct InFlight<'a> {
    controller: &'a VerificationController,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.controller.state();
            state.in_flight = false;
            state.request.phase = Phase::Idle;
        }
        self.controller.controls.set_submit_enabled(true);
    }
}

/// Orchestrates one verification at a time.
pub struct VerificationController {
    api: Arc<dyn VerifierApi>,
    view: Arc<dyn ResultView>,
    controls: Arc<dyn FormControls>,
    charts: ChartLifecycleManager,
    notifier: NotificationService,
    request_timeout: Duration,
    state: Mutex<ControllerState>,
}

impl VerificationController {
    pub fn new(
        api: Arc<dyn VerifierApi>,
        view: Arc<dyn ResultView>,
        controls: Arc<dyn FormControls>,
        charts: ChartLifecycleManager,
        notifier: NotificationService,
        config: &Config,
    ) -> Self {
        Self {
            api,
            view,
            controls,
            charts,
            notifier,
            request_timeout: config.request_timeout,
            state: Mutex::new(ControllerState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> Phase {
        self.state().request.phase
    }

    pub fn last_response(&self) -> Option<VerificationResponse> {
        self.state().request.last_response.clone()
    }

    pub fn notifier(&self) -> &NotificationService {
        &self.notifier
    }

    pub fn charts(&self) -> &ChartLifecycleManager {
        &self.charts
    }

    /// Verify `explanation` within `domain` and render the result.
    pub async fn submit(&self, explanation: &str, domain: &str) -> SubmitOutcome {
        let request = VerificationRequest::new(explanation, domain);
        if let Err(e) = request.validate() {
            let e = Error::from(e);
            debug!(error = %e, "Rejected submission");
            self.notifier.notify(&e.user_message(), Severity::Error);
            return SubmitOutcome::Rejected;
        }

        {
            let mut state = self.state();
            if state.in_flight {
                debug!("Verification already in flight; ignoring submit");
                return SubmitOutcome::Ignored;
            }
            state.in_flight = true;
            state.request.phase = Phase::Loading;
        }
        self.controls.set_submit_enabled(false);
        let _in_flight = InFlight { controller: self };

        let request_id = Uuid::new_v4();
        info!(
            request_id = %request_id,
            domain = %request.domain,
            chars = request.explanation.len(),
            "Submitting explanation"
        );

        match self.verify(&request).await {
            Ok(response) => {
                {
                    let mut state = self.state();
                    state.request.last_response = Some(response.clone());
                    state.request.phase = Phase::Success;
                }
                info!(
                    request_id = %request_id,
                    status = response.overall_status.as_str(),
                    claims = response.claims.len(),
                    "Verification succeeded"
                );
                render::render_response(self.view.as_ref(), &self.charts, &response);
                SubmitOutcome::Rendered
            }
            Err(e) => {
                self.state().request.phase = Phase::Error;
                error!(request_id = %request_id, error = %e, "Verification failed");
                self.notifier.notify(&e.user_message(), Severity::Error);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationResponse> {
        let response = tokio::time::timeout(self.request_timeout, self.api.verify(request))
            .await
            .map_err(|_| Error::Timeout(self.request_timeout))??;

        response.validate()?;
        Ok(response)
    }

    /// Drop the current result and hide the result panels.
    ///
    /// An in-flight request keeps running and renders when it settles.
    pub fn clear(&self) {
        {
            let mut state = self.state();
            state.request.phase = Phase::Idle;
            state.request.last_response = None;
        }
        self.view.set_results_visible(false);
        debug!("Results cleared");
    }

    /// Fill the explanation field with a sample from the backend.
    pub async fn load_random_demo(&self) -> String {
        let fetched = tokio::time::timeout(self.request_timeout, self.api.random_demo())
            .await
            .map_err(|_| Error::Timeout(self.request_timeout))
            .and_then(|result| result);

        let text = match fetched {
            Ok(demo) if demo.success => match demo.demo {
                Some(scenario) => {
                    info!(title = %scenario.title, "Loaded demo scenario");
                    scenario.explanation
                }
                None => {
                    warn!("Demo endpoint reported success without a scenario");
                    FALLBACK_DEMO.to_string()
                }
            },
            Ok(_) => {
                warn!("Demo endpoint reported failure; using built-in sample");
                FALLBACK_DEMO.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch demo; using built-in sample");
                FALLBACK_DEMO.to_string()
            }
        };

        self.controls.set_explanation(&text);
        text
    }
}
