use crate::panel_config::PanelConfig;
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub fn load_panel_config(path: &str) -> Result<PanelConfig> {
    debug!("📄 Attempting to load panel config from: {}", path);
    let start_time = Instant::now();

    if !Path::new(path).exists() {
        warn!(
            "⚠️ Panel config file '{}' not found. Falling back to built-in defaults.",
            path
        );
        return Ok(PanelConfig::default());
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read panel config file '{}'. 📖", path))?;
    debug!("Read panel config file in {:?}", start_time.elapsed());

    let parse_start_time = Instant::now();
    let config = parse_panel_config(&config_str)
        .with_context(|| format!("Failed to parse YAML panel config from '{}'. 💔", path))?;
    debug!("Parsed YAML in {:?}", parse_start_time.elapsed());

    info!(
        "✅ Successfully loaded and validated panel config from '{}' in {:?}",
        path,
        start_time.elapsed()
    );
    Ok(config)
}

pub fn parse_panel_config(config_str: &str) -> Result<PanelConfig> {
    let config: PanelConfig = serde_yaml::from_str(config_str)?;
    validate_panel_config(&config).with_context(|| "Panel config validation failed 👎")?;
    Ok(config)
}

fn validate_panel_config(config: &PanelConfig) -> Result<()> {
    debug!("🕵️ Validating panel config...");
    if config.backend_url.is_empty() {
        bail!("❌ backend_url cannot be empty.");
    }
    if !config.backend_url.starts_with("http://") && !config.backend_url.starts_with("https://") {
        bail!("❌ backend_url '{}' must be an http(s) URL.", config.backend_url);
    }
    if config.stream_url.is_empty() {
        bail!("❌ stream_url cannot be empty.");
    }
    if !config.stream_url.starts_with("http://") && !config.stream_url.starts_with("https://") {
        bail!("❌ stream_url '{}' must be an http(s) URL.", config.stream_url);
    }
    if config.parked_poll_interval_secs == 0 {
        bail!("❌ parked_poll_interval_secs must be at least 1.");
    }
    if config.stream_retry_delay_secs == 0 {
        bail!("❌ stream_retry_delay_secs must be at least 1.");
    }
    if config.stream_keepalive_secs == 0 {
        bail!("❌ stream_keepalive_secs must be at least 1.");
    }
    debug!("👍 Panel config validated successfully.");
    Ok(())
}
