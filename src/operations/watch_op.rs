use crate::backend::api::DashcamBackend;
use crate::core::retry::RetryPolicy;
use crate::core::status_panel::StatusPanel;
use crate::core::stream_watch::{HlsSource, StreamWatch};
use crate::panel_config::PanelConfig;
use anyhow::Result;
use chrono::Local;
use clap::ArgMatches;
use log::info;
use std::sync::Arc;
use std::time::Duration;

fn print_line(what: &str) {
    println!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), what);
}

/// Run the live panel headless: parked-state poller plus stream supervisor,
/// printing every transition until Ctrl-C (or an optional duration).
pub async fn handle_watch_cli(
    panel_config: &PanelConfig,
    backend: Arc<dyn DashcamBackend>,
    args: &ArgMatches,
) -> Result<()> {
    info!("Handling watch command...");

    let mut panel = StatusPanel::new(backend);
    panel.start_polling(RetryPolicy::continue_every(Duration::from_secs(
        panel_config.parked_poll_interval_secs,
    )));

    let source = Arc::new(HlsSource::new(&panel_config.stream_url));
    let mut stream = StreamWatch::spawn(
        source,
        RetryPolicy::continue_every(Duration::from_secs(
            panel_config.stream_retry_delay_secs,
        )),
        Duration::from_secs(panel_config.stream_keepalive_secs),
    );

    let mut parked_rx = panel.subscribe();
    let mut stream_rx = stream.subscribe();
    print_line(&format!("mode: {}", panel.displayed().label()));
    print_line(&format!("stream: {}", stream.state().label()));

    let deadline = args
        .get_one::<u64>("duration")
        .map(|secs| tokio::time::Instant::now() + Duration::from_secs(*secs));

    loop {
        let until_deadline = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => futures::future::pending::<()>().await,
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting the panel down.");
                break;
            }
            _ = until_deadline => {
                info!("Watch duration elapsed, shutting the panel down.");
                break;
            }
            changed = parked_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let label = parked_rx.borrow_and_update().label();
                print_line(&format!("mode: {}", label));
            }
            changed = stream_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let label = stream_rx.borrow_and_update().label();
                print_line(&format!("stream: {}", label));
            }
        }
    }

    // Deterministic teardown of both view-scoped loops.
    panel.shutdown();
    stream.shutdown();
    Ok(())
}
