use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub backend_url: String, // base URL of the appliance control service
    pub stream_url: String,  // HLS manifest served by the local media server
    pub parked_poll_interval_secs: u64,
    pub stream_retry_delay_secs: u64,
    pub stream_keepalive_secs: u64, // manifest re-poll cadence while playing
    pub log_level: Option<String>, // Making it optional to potentially use CLI or env var as primary
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            backend_url: "http://127.0.0.1:4777".to_string(),
            stream_url: "http://localhost:8888/stream1/index.m3u8".to_string(),
            parked_poll_interval_secs: 2,
            stream_retry_delay_secs: 3,
            stream_keepalive_secs: 2,
            log_level: Some("info".to_string()),
        }
    }
}
