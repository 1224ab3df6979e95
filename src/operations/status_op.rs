use crate::backend::api::DashcamBackend;
use crate::core::status_panel::{ParkState, StatusPanel};
use anyhow::Result;
use chrono::Local;
use log::info;
use std::sync::Arc;

/// Set the parked/driving flag the way the panel toggle does: display the
/// new state immediately, notify the backend best-effort.
pub async fn handle_park_cli(backend: Arc<dyn DashcamBackend>, parked: bool) -> Result<()> {
    let state = ParkState::from_flag(parked);
    info!("Handling {} command...", state.label().to_lowercase());

    let panel = StatusPanel::new(backend);
    let notify = panel.set_parked(state);
    println!(
        "[{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        panel.displayed().label()
    );
    // Let the best-effort notification finish before the process exits.
    notify.await?;
    Ok(())
}
