use crate::backend::api::DashcamBackend;
use crate::core::settings_session::SettingsSession;
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

/// The settings screen as a CLI operation: load, apply field overrides and
/// hotspot selections, save, reboot.
pub async fn handle_apply_settings_cli(
    backend: Arc<dyn DashcamBackend>,
    args: &ArgMatches,
) -> Result<()> {
    info!("Handling apply-settings command...");
    let op_start_time = Instant::now();

    let mut session = SettingsSession::open(backend.as_ref())
        .await
        .context("Failed to open settings session")?;
    info!(
        "Loaded configuration; known networks: {:?}",
        session.known_networks
    );

    if let Some(overrides) = args.get_many::<String>("set") {
        for entry in overrides {
            let (field, value) = entry
                .split_once('=')
                .with_context(|| format!("Override '{}' is not in FIELD=VALUE form", entry))?;
            session
                .form
                .set_field(field, value)
                .with_context(|| format!("Cannot apply override '{}'", entry))?;
        }
    }

    if let Some(hotspots) = args.get_many::<String>("hotspot") {
        for network in hotspots {
            if !session.form.set_hotspot(network, true) {
                bail!(
                    "Network '{}' is not in the current scan: {:?}",
                    network,
                    session.known_networks
                );
            }
        }
    }
    if let Some(removed) = args.get_many::<String>("no-hotspot") {
        for network in removed {
            if !session.form.set_hotspot(network, false) {
                warn!(
                    "Network '{}' is not in the current scan; nothing to uncheck.",
                    network
                );
            }
        }
    }

    session
        .save_and_reboot(backend.as_ref())
        .await
        .context("Failed to save configuration and reboot")?;

    info!(
        "✅ Configuration saved and reboot requested in {:?}.",
        op_start_time.elapsed()
    );
    Ok(())
}
