pub mod clip_op;
pub mod settings_op;
pub mod show_config_op;
pub mod status_op;
pub mod watch_op;
