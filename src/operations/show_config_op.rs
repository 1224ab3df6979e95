use crate::backend::api::DashcamBackend;
use crate::device_config::DeviceConfig;
use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

pub async fn handle_show_config_cli(backend: Arc<dyn DashcamBackend>) -> Result<()> {
    info!("Handling show-config command...");

    let config_text = backend
        .get_config()
        .await
        .context("Failed to fetch device configuration from the backend")?;
    let config = DeviceConfig::from_yaml(&config_text)
        .context("Backend returned a configuration that does not decode")?;

    info!(
        "Device configuration: camera {} @ {} fps, {} hotspot network(s), cloud limit {} GB",
        config.camera_input.resolution,
        config.camera_input.fps,
        config.hotspot_networks.len(),
        config.g_cloud.limit_gb
    );
    println!("{}", config_text);
    Ok(())
}
