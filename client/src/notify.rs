//! Transient, auto-dismissing user notifications.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How long a notification stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// Length of the fade-out before the element is removed.
pub const DISMISS_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

/// Output port for the notification area.
pub trait NotificationSurface: Send + Sync {
    /// Insert a visible notification.
    fn show(&self, id: Uuid, message: &str, severity: Severity);

    /// Start the dismissal transition.
    fn dismiss(&self, id: Uuid);

    /// Remove the element entirely.
    fn remove(&self, id: Uuid);
}

/// Shows notifications and schedules their removal.
///
/// Must be used from within a Tokio runtime.
pub struct NotificationService {
    surface: Arc<dyn NotificationSurface>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl NotificationService {
    pub fn new(surface: Arc<dyn NotificationSurface>) -> Self {
        Self {
            surface,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Show `message` and remove it after `DISPLAY_DURATION` plus the fade.
    pub fn notify(&self, message: &str, severity: Severity) -> Uuid {
        let id = Uuid::new_v4();
        match severity {
            Severity::Info => info!(notification_id = %id, %message, "Notify"),
            Severity::Error => warn!(notification_id = %id, %message, "Notify"),
        }

        self.surface.show(id, message, severity);

        let surface = self.surface.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(DISPLAY_DURATION).await;
            surface.dismiss(id);
            tokio::time::sleep(DISMISS_TRANSITION).await;
            surface.remove(id);
            debug!(notification_id = %id, "Notification removed");
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|task| !task.is_finished());
        pending.push(task);

        id
    }

    /// Wait until every scheduled removal has run.
    pub async fn settle(&self) {
        let tasks: Vec<_> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Notification task failed");
            }
        }
    }
}
