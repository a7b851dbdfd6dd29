use chrono::Utc;
use movie_sync_models::{AlertKind, AlertState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Single-slot notification holder with one auto-dismiss task.
///
/// Showing a new alert replaces the current one and restarts the countdown;
/// there is no queue. The dismiss task is aborted on overwrite, on
/// [`AlertManager::shutdown`] and when the manager is dropped.
pub struct AlertManager {
    slot: Arc<Mutex<AlertSlot>>,
    dismiss_after: Duration,
}

#[derive(Default)]
struct AlertSlot {
    current: Option<AlertState>,
    // Bumped on every show so a stale timer never clears a newer alert
    generation: u64,
    dismiss_task: Option<JoinHandle<()>>,
}

impl AlertSlot {
    fn cancel_dismiss(&mut self) {
        if let Some(task) = self.dismiss_task.take() {
            task.abort();
        }
    }
}

impl AlertManager {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(AlertSlot::default())),
            dismiss_after,
        }
    }

    /// Replace the current alert and schedule its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn show(&self, message: impl Into<String>, kind: AlertKind) {
        let message = message.into();
        let mut slot = self.slot.lock().await;
        slot.cancel_dismiss();

        slot.generation += 1;
        let generation = slot.generation;
        let lifetime = chrono::Duration::from_std(self.dismiss_after).unwrap_or_else(|_| chrono::Duration::zero());

        debug!(message = %message, ?kind, generation, "Showing alert");
        slot.current = Some(AlertState {
            message,
            kind,
            expires_at: Utc::now() + lifetime,
        });

        let shared = Arc::clone(&self.slot);
        let delay = self.dismiss_after;
        slot.dismiss_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = shared.lock().await;
            if slot.generation == generation {
                slot.current = None;
                slot.dismiss_task = None;
                debug!(generation, "Alert expired");
            }
        }));
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.show(message, AlertKind::Success).await;
    }

    pub async fn failure(&self, message: impl Into<String>) {
        self.show(message, AlertKind::Failure).await;
    }

    pub async fn current(&self) -> Option<AlertState> {
        self.slot.lock().await.current.clone()
    }

    /// Whether a dismiss task is still scheduled
    pub async fn has_pending_dismiss(&self) -> bool {
        self.slot.lock().await.dismiss_task.is_some()
    }

    /// Clear the alert now, as if its timer had fired
    pub async fn dismiss(&self) {
        let mut slot = self.slot.lock().await;
        slot.cancel_dismiss();
        slot.current = None;
    }

    /// Tear down: cancel the scheduled dismissal and drop the alert
    pub async fn shutdown(&self) {
        self.dismiss().await;
        debug!("Alert manager shut down");
    }
}

impl Drop for AlertManager {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.slot.try_lock() {
            slot.cancel_dismiss();
        }
    }
}
