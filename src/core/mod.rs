pub mod retry;
pub mod settings_form;
pub mod settings_session;
pub mod status_panel;
pub mod stream_watch;
