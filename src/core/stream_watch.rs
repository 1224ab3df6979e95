use crate::core::retry::{FailurePolicy, RetryPolicy};
use crate::errors::AppError;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Connection states of the live-preview stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Connecting,
    Playing,
    Errored,
}

impl StreamState {
    pub fn label(self) -> &'static str {
        match self {
            StreamState::Connecting => "CONNECTING",
            StreamState::Playing => "PLAYING",
            StreamState::Errored => "ERRORED",
        }
    }
}

/// Where the live stream comes from. The panel only needs "give me the
/// current manifest"; tests script this seam.
#[async_trait]
pub trait StreamSource: Send + Sync {
    async fn fetch_manifest(&self) -> Result<String, AppError>;
}

/// The fixed local HLS endpoint served by the appliance's media server.
pub struct HlsSource {
    client: Client,
    url: String,
}

impl HlsSource {
    pub fn new(url: &str) -> Self {
        HlsSource {
            client: Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl StreamSource for HlsSource {
    async fn fetch_manifest(&self) -> Result<String, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Stream(format!("manifest request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Stream(format!(
                "manifest request answered HTTP {}",
                status
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Stream(format!("manifest body unreadable: {}", e)))?;
        if !body.trim_start().starts_with("#EXTM3U") {
            return Err(AppError::Stream("response is not an HLS manifest".to_string()));
        }
        Ok(body)
    }
}

/// Supervisor for the live-stream connection.
///
/// `Connecting → Playing` on a successful attach, `Playing → Errored` on a
/// fatal error, `Errored → Connecting` after the policy delay, retried
/// indefinitely. The only way out is teardown, which releases the
/// connection task from whatever state it is in.
pub struct StreamWatch {
    state: watch::Sender<StreamState>,
    task: Option<JoinHandle<()>>,
}

impl StreamWatch {
    /// Spawn the supervisor. `reconnect` is the fixed-delay retry policy;
    /// `keepalive` is how often the manifest is re-polled while playing.
    pub fn spawn(
        source: Arc<dyn StreamSource>,
        reconnect: RetryPolicy,
        keepalive: Duration,
    ) -> Self {
        let (state, _) = watch::channel(StreamState::Connecting);
        let state_tx = state.clone();
        let task = tokio::spawn(async move {
            loop {
                state_tx.send_replace(StreamState::Connecting);
                debug!("📺 Attaching to live stream...");
                match source.fetch_manifest().await {
                    Ok(_) => {
                        info!("📺 Live stream attached");
                        state_tx.send_replace(StreamState::Playing);
                        // Hold the session by re-polling the manifest until
                        // a fatal error knocks it over.
                        loop {
                            tokio::time::sleep(keepalive).await;
                            if let Err(e) = source.fetch_manifest().await {
                                warn!(
                                    "📺 Stream error, retrying in {:?}: {:#}",
                                    reconnect.interval, e
                                );
                                state_tx.send_replace(StreamState::Errored);
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(
                            "📺 Stream attach failed, retrying in {:?}: {:#}",
                            reconnect.interval, e
                        );
                        state_tx.send_replace(StreamState::Errored);
                    }
                }
                if reconnect.on_failure == FailurePolicy::Abort {
                    break;
                }
                tokio::time::sleep(reconnect.interval).await;
            }
        });
        StreamWatch {
            state,
            task: Some(task),
        }
    }

    pub fn state(&self) -> StreamState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<StreamState> {
        self.state.subscribe()
    }

    /// Release the connection task. Also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.task.take() {
            debug!("Releasing live-stream connection");
            handle.abort();
        }
    }
}

impl Drop for StreamWatch {
    fn drop(&mut self) {
        self.shutdown();
    }
}
