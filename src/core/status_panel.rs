use crate::backend::api::DashcamBackend;
use crate::core::retry::{FailurePolicy, RetryPolicy};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// The two-valued mode flag held by the backend and mirrored on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkState {
    Parked,
    Driving,
}

impl ParkState {
    pub fn from_flag(parked: bool) -> Self {
        if parked { ParkState::Parked } else { ParkState::Driving }
    }

    pub fn is_parked(self) -> bool {
        self == ParkState::Parked
    }

    pub fn flipped(self) -> Self {
        match self {
            ParkState::Parked => ParkState::Driving,
            ParkState::Driving => ParkState::Parked,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParkState::Parked => "PARKED",
            ParkState::Driving => "DRIVING",
        }
    }
}

/// Live-status side of the panel: the parked-state poller, the optimistic
/// toggle, and the one-shot clip trigger.
///
/// The poller is a spawned loop scoped to this value; dropping the panel
/// (or calling [`StatusPanel::shutdown`]) tears it down deterministically.
pub struct StatusPanel {
    backend: Arc<dyn DashcamBackend>,
    displayed: watch::Sender<ParkState>,
    poller: Option<JoinHandle<()>>,
}

impl StatusPanel {
    pub fn new(backend: Arc<dyn DashcamBackend>) -> Self {
        let (displayed, _) = watch::channel(ParkState::Driving);
        StatusPanel {
            backend,
            displayed,
            poller: None,
        }
    }

    /// The state currently shown, which may be ahead of the backend right
    /// after a toggle.
    pub fn displayed(&self) -> ParkState {
        *self.displayed.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ParkState> {
        self.displayed.subscribe()
    }

    /// Start the background poll loop: an immediate fetch, then one fetch
    /// per policy interval. A failed poll is logged and, under
    /// `FailurePolicy::Continue`, never stops the loop.
    pub fn start_polling(&mut self, policy: RetryPolicy) {
        if self.poller.is_some() {
            debug!("Parked poller already running, not starting another");
            return;
        }
        info!("🚗 Starting parked-state poller (every {:?})", policy.interval);
        let backend = Arc::clone(&self.backend);
        let displayed = self.displayed.clone();
        self.poller = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(policy.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match backend.get_parked().await {
                    Ok(parked) => {
                        let state = ParkState::from_flag(parked);
                        if *displayed.borrow() != state {
                            info!("🅿️ Parked state is now {}", state.label());
                        }
                        displayed.send_replace(state);
                    }
                    Err(e) => {
                        warn!("⚠️ Parked-state poll failed: {:#}", e);
                        if policy.on_failure == FailurePolicy::Abort {
                            break;
                        }
                    }
                }
            }
        }));
    }

    /// Set the displayed state immediately and notify the backend
    /// best-effort. The local update is synchronous and is never rolled
    /// back if the notification fails; the returned handle belongs to the
    /// notification task and callers are free to drop it.
    pub fn set_parked(&self, state: ParkState) -> JoinHandle<()> {
        self.displayed.send_replace(state);
        info!("🅿️ Parked state set locally to {}", state.label());
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Err(e) = backend.set_parked(state.is_parked()).await {
                warn!(
                    "⚠️ Failed to notify backend of parked state {} (keeping local state): {:#}",
                    state.label(),
                    e
                );
            }
        })
    }

    /// Flip between PARKED and DRIVING.
    pub fn toggle(&self) -> JoinHandle<()> {
        self.set_parked(self.displayed().flipped())
    }

    /// Fire-and-forget clip request. The panel tracks no pending/progress
    /// state; that lives entirely in the backend.
    pub fn schedule_clip(&self) -> JoinHandle<()> {
        info!("🎬 Requesting clip capture");
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Err(e) = backend.schedule_clip().await {
                warn!("⚠️ Clip request failed: {:#}", e);
            }
        })
    }

    /// Stop the poll loop. Also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.poller.take() {
            debug!("Stopping parked-state poller");
            handle.abort();
        }
    }
}

impl Drop for StatusPanel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn panel_with(mock: MockBackend) -> (StatusPanel, Arc<MockBackend>) {
        let backend = Arc::new(mock);
        (StatusPanel::new(backend.clone()), backend)
    }

    #[tokio::test(start_paused = true)]
    async fn first_poll_reflects_backend_state() {
        let mock = MockBackend::default();
        *mock.parked.lock().unwrap() = true;
        let (mut panel, _backend) = panel_with(mock);

        panel.start_polling(RetryPolicy::continue_every(Duration::from_secs(2)));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(panel.displayed(), ParkState::Parked);
        assert_eq!(panel.displayed().label(), "PARKED");
    }

    #[tokio::test(start_paused = true)]
    async fn poll_loop_survives_failures() {
        let mock = MockBackend::default();
        *mock.parked.lock().unwrap() = true;
        mock.fail_get_parked_times.store(2, Ordering::SeqCst);
        let (mut panel, backend) = panel_with(mock);

        panel.start_polling(RetryPolicy::continue_every(Duration::from_secs(2)));
        // Two failing polls at t=0s and t=2s, a successful one at t=4s.
        tokio::time::sleep(Duration::from_secs(7)).await;

        let polls = backend
            .call_log()
            .iter()
            .filter(|c| *c == "feGetParked")
            .count();
        assert!(polls >= 3, "expected the loop to keep polling, saw {} polls", polls);
        assert_eq!(panel.displayed(), ParkState::Parked);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_updates_locally_before_notifying() {
        let (panel, backend) = panel_with(MockBackend::default());
        assert_eq!(panel.displayed(), ParkState::Driving);

        let notify = panel.toggle();
        // Local flip is synchronous, before the notification task ran.
        assert_eq!(panel.displayed(), ParkState::Parked);

        notify.await.unwrap();
        assert_eq!(backend.call_log(), vec!["feSetParked(true)".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_notification_keeps_local_state() {
        let mock = MockBackend::default();
        mock.fail_set_parked.store(true, Ordering::SeqCst);
        let (panel, backend) = panel_with(mock);

        let notify = panel.set_parked(ParkState::Parked);
        assert_eq!(panel.displayed(), ParkState::Parked);
        notify.await.unwrap();

        // No rollback: still parked locally, backend still driving.
        assert_eq!(panel.displayed(), ParkState::Parked);
        assert!(!*backend.parked.lock().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn clip_request_reaches_the_backend() {
        let (panel, backend) = panel_with(MockBackend::default());
        panel.schedule_clip().await.unwrap();
        assert_eq!(backend.call_log(), vec!["feScheduleClip".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_poller() {
        let (mut panel, backend) = panel_with(MockBackend::default());
        panel.start_polling(RetryPolicy::continue_every(Duration::from_secs(2)));
        tokio::time::sleep(Duration::from_millis(100)).await;
        panel.shutdown();

        let polls_at_shutdown = backend.call_log().len();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(backend.call_log().len(), polls_at_shutdown);
    }
}
