use crate::backend::api::DashcamBackend;
use crate::core::status_panel::StatusPanel;
use anyhow::Result;
use log::info;
use std::sync::Arc;

/// One-shot clip request. No acknowledgment beyond delivery; the backend
/// owns the clip lifecycle.
pub async fn handle_clip_cli(backend: Arc<dyn DashcamBackend>) -> Result<()> {
    info!("Handling clip command...");
    let panel = StatusPanel::new(backend);
    // Await delivery before the process exits; a failure is logged by the
    // panel and deliberately not treated as an operation failure.
    panel.schedule_clip().await?;
    Ok(())
}
