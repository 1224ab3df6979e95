mod backend;
mod cli;
mod common;
mod config_loader;
mod core;
mod device_config;
mod errors;
mod operations;
mod panel_config;

use backend::api::DashcamBackend;
use backend::http_remote::HttpBackend;
use common::logging_setup;
use anyhow::{Context, Result, bail};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    // Parse CLI arguments early for potential use in logging or config path
    let matches = cli::build_cli().get_matches();

    // Determine the panel configuration file path
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str()).unwrap_or("config/dcam.yaml");

    debug!("Attempting to load panel configuration from: {}", config_path);
    let config_load_start_time = Instant::now();
    let panel_config = match config_loader::load_panel_config(config_path) {
        Ok(cfg) => {
            logging_setup::initialize_logging(Some(&cfg), &matches)
                .context("Failed to initialize logging with full config")?;
            info!("✅ Panel configuration ready ({}) in {:?}", config_path, config_load_start_time.elapsed());
            cfg
        }
        Err(e) => {
            // Try to initialize logging with CLI args only, or defaults
            logging_setup::initialize_logging(None, &matches)
                .context("Failed to initialize logging with basic settings after config load failure")?;
            error!("❌ Failed to load panel configuration from '{}': {:#}. Exiting.", config_path, e);
            return Err(e.context(format!("Failed to load panel configuration from '{}'", config_path)));
        }
    };

    info!("🚗 DCam panel targeting backend at {}", panel_config.backend_url);
    let backend: Arc<dyn DashcamBackend> = Arc::new(HttpBackend::new(&panel_config.backend_url));

    // Dispatch based on subcommand
    if let Some((operation_name, sub_matches)) = matches.subcommand() {
        debug!("🎬 Dispatching to subcommand: {}", operation_name);
        let op_start_time = Instant::now();

        let op_result: Result<()> = match operation_name {
            "show-config" => {
                operations::show_config_op::handle_show_config_cli(backend).await
            }
            "apply-settings" => {
                operations::settings_op::handle_apply_settings_cli(backend, sub_matches).await
            }
            "park" => {
                operations::status_op::handle_park_cli(backend, true).await
            }
            "unpark" => {
                operations::status_op::handle_park_cli(backend, false).await
            }
            "clip" => {
                operations::clip_op::handle_clip_cli(backend).await
            }
            "watch" => {
                operations::watch_op::handle_watch_cli(&panel_config, backend, sub_matches).await
            }
            other => {
                bail!("Subcommand '{}' not implemented.", other)
            }
        };

        if let Err(e) = op_result {
            error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, op_start_time.elapsed(), e);
            return Err(e);
        } else {
            info!("✅ Operation '{}' completed successfully in {:?}.", operation_name, op_start_time.elapsed());
        }
    } else {
        info!("🤔 No subcommand provided. Try 'dcam watch' for the live panel or 'dcam --help'.");
    }

    info!("🏁 DCam finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
