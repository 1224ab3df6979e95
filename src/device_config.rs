use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// The device configuration blob owned by the appliance backend.
///
/// The panel only exposes a fixed subset of these fields for editing; every
/// nesting level keeps a flattened map of untouched values so that a
/// load→edit→save cycle preserves fields the panel knows nothing about.
/// Numeric editable fields are `f64` so an invalid entry can travel as NaN
/// (`.nan` in YAML) instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub telegram_key: String,
    pub camera_input: CameraInput,
    pub motion_listener: MotionListener,
    pub gui_stream_output: GuiStreamOutput,
    pub internet_stream_output: InternetStreamOutput,
    pub g_cloud: GCloud,
    pub hotspot_networks: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraInput {
    pub resolution: String,
    pub fps: String,
    pub clip: ClipSettings,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSettings {
    pub segment_size_sec: f64,
    pub segments: f64,
    pub timer_before_clip_sec: f64,
    pub cooldown_sec: f64,
    pub disk_full_buffer_gb: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionListener {
    pub sensitivity_inverse: f64,
    pub threshold_sum_kilo: f64,
    pub frame_delay_millisec: f64,
    pub trigger_duration: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiStreamOutput {
    pub resolution: String,
    pub bit_rate: String,
    pub fps: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternetStreamOutput {
    pub url: String,
    pub username: String,
    pub password: String,
    pub resolution: String,
    pub bit_rate: String,
    pub fps: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCloud {
    pub limit_gb: f64,
    pub backup_scheduler_timeout_sec: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DeviceConfig {
    pub fn from_yaml(text: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(text).map_err(|e| AppError::Decode(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        serde_yaml::to_string(self).map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub mod test_fixtures {
    /// A configuration in the shape the appliance writes to disk, including
    /// fields the panel never edits (`wifi_country`, `low_light_boost`,
    /// `bucket_name`) that must survive a save untouched.
    pub const SAMPLE_CONFIG_YAML: &str = r#"
telegram_key: "123456:ABCDEF"
wifi_country: "DE"
camera_input:
  resolution: "1920x1080"
  fps: "30"
  low_light_boost: true
  clip:
    segment_size_sec: 60
    segments: 5
    timer_before_clip_sec: 10
    cooldown_sec: 30
    disk_full_buffer_gb: 2
motion_listener:
  sensitivity_inverse: 40
  threshold_sum_kilo: 1200
  frame_delay_millisec: 250
  trigger_duration: 3
gui_stream_output:
  resolution: "1280x720"
  bit_rate: "2M"
  fps: "30"
internet_stream_output:
  url: "rtmp://upstream.example/live"
  username: "zero"
  password: "cam"
  resolution: "854x480"
  bit_rate: "800k"
  fps: "15"
g_cloud:
  limit_gb: 12
  backup_scheduler_timeout_sec: 600
  bucket_name: "dashcam-clips"
hotspot_networks:
  - "home-wifi"
  - "garage"
"#;
}
