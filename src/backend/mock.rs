//! Call-recording in-memory backend for tests.

use crate::backend::api::DashcamBackend;
use crate::errors::AppError;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MockBackend {
    pub config_text: Mutex<String>,
    pub known_networks: Mutex<Vec<String>>,
    pub parked: Mutex<bool>,
    /// Every command invocation in order, e.g. "feSetParked(false)".
    pub calls: Mutex<Vec<String>>,
    pub saved_config: Mutex<Option<String>>,
    pub fail_set_config: AtomicBool,
    pub fail_get_parked_times: AtomicUsize,
    pub fail_set_parked: AtomicBool,
}

impl MockBackend {
    pub fn with_config(config_text: &str, known_networks: &[&str]) -> Self {
        let mock = MockBackend::default();
        *mock.config_text.lock().unwrap() = config_text.to_string();
        *mock.known_networks.lock().unwrap() =
            known_networks.iter().map(|n| n.to_string()).collect();
        mock
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl DashcamBackend for MockBackend {
    async fn get_config(&self) -> Result<String, AppError> {
        self.record("feGetConfig");
        Ok(self.config_text.lock().unwrap().clone())
    }

    async fn set_config(&self, config: String) -> Result<(), AppError> {
        self.record("feSetConfig");
        if self.fail_set_config.load(Ordering::SeqCst) {
            return Err(AppError::backend("feSetConfig", "injected failure"));
        }
        *self.saved_config.lock().unwrap() = Some(config);
        Ok(())
    }

    async fn reboot_system(&self) -> Result<(), AppError> {
        self.record("feRebootSystem");
        Ok(())
    }

    async fn get_known_networks(&self) -> Result<Vec<String>, AppError> {
        self.record("feGetKnownNetworks");
        Ok(self.known_networks.lock().unwrap().clone())
    }

    async fn schedule_clip(&self) -> Result<(), AppError> {
        self.record("feScheduleClip");
        Ok(())
    }

    async fn get_parked(&self) -> Result<bool, AppError> {
        self.record("feGetParked");
        let remaining = self.fail_get_parked_times.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_get_parked_times.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::backend("feGetParked", "injected failure"));
        }
        Ok(*self.parked.lock().unwrap())
    }

    async fn set_parked(&self, parked: bool) -> Result<(), AppError> {
        self.record(format!("feSetParked({})", parked));
        if self.fail_set_parked.load(Ordering::SeqCst) {
            return Err(AppError::backend("feSetParked", "injected failure"));
        }
        *self.parked.lock().unwrap() = parked;
        Ok(())
    }
}
