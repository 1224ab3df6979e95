use clap::{Arg, ArgAction, Command};
use log::debug;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    Command::new("dcam")
        .version("0.1.0")
        .author("DCam Developers")
        .about("Control panel for a dash-camera appliance: settings, parked mode, clips and live-stream supervision.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom panel configuration file")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("show-config")
                .about("Fetches and prints the device configuration held by the backend")
        )
        .subcommand(
            Command::new("apply-settings")
                .about("Loads the device configuration, applies edits and saves it back, then reboots the appliance")
                .arg(Arg::new("set").long("set").value_name("FIELD=VALUE").help("Override an editable field (e.g. g_cloud.limit_gb=20); an empty value leaves the field unchanged").action(ArgAction::Append))
                .arg(Arg::new("hotspot").long("hotspot").value_name("NETWORK").help("Mark a known network as a hotspot source").action(ArgAction::Append))
                .arg(Arg::new("no-hotspot").long("no-hotspot").value_name("NETWORK").help("Unmark a known network as a hotspot source").action(ArgAction::Append))
        )
        .subcommand(
            Command::new("park")
                .about("Switches the appliance to PARKED mode")
        )
        .subcommand(
            Command::new("unpark")
                .about("Switches the appliance to DRIVING mode")
        )
        .subcommand(
            Command::new("clip")
                .about("Requests a one-shot clip capture")
        )
        .subcommand(
            Command::new("watch")
                .about("Runs the parked-state poller and the live-stream supervisor, printing transitions")
                .arg(Arg::new("duration").long("duration").value_name("SECONDS").help("Stop after this many seconds (default: run until Ctrl-C)").value_parser(clap::value_parser!(u64)).action(ArgAction::Set))
        )
}
