use crate::device_config::DeviceConfig;
use crate::errors::AppError;
use log::debug;

/// One editable field of the settings screen.
///
/// An empty input means "leave unchanged": the placeholder mirrors the value
/// that was loaded, and the effective value falls back to it whenever the
/// user entered nothing.
#[derive(Debug, Clone)]
pub struct FieldInput {
    entered: Option<String>,
    placeholder: String,
}

impl FieldInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        FieldInput {
            entered: None,
            placeholder: placeholder.into(),
        }
    }

    /// Record user input. An empty string clears the override.
    pub fn enter(&mut self, raw: &str) {
        if raw.is_empty() {
            self.entered = None;
        } else {
            self.entered = Some(raw.to_string());
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// User input if present, otherwise the placeholder.
    pub fn effective(&self) -> &str {
        match &self.entered {
            Some(value) => value,
            None => &self.placeholder,
        }
    }

    /// Numeric reading of the effective value. Unparseable (or empty) text
    /// yields NaN, which is carried through to the persisted configuration
    /// rather than being coerced or rejected.
    pub fn as_number(&self) -> f64 {
        self.effective().trim().parse::<f64>().unwrap_or(f64::NAN)
    }
}

/// A known network row: identifier plus hotspot checkbox state.
#[derive(Debug, Clone)]
pub struct HotspotBox {
    pub network: String,
    pub checked: bool,
}

/// Working copy of the editable subset of the device configuration.
///
/// The field set is fixed; everything else in the loaded configuration is
/// passed through untouched on save.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub g_cloud_limit_gb: FieldInput,
    pub disk_full_buffer_gb: FieldInput,
    pub sensitivity_inverse: FieldInput,
    pub threshold_sum_kilo: FieldInput,
    pub frame_delay_millisec: FieldInput,
    pub trigger_duration: FieldInput,
    pub segment_size_sec: FieldInput,
    pub segments: FieldInput,
    pub timer_before_clip_sec: FieldInput,
    pub cooldown_sec: FieldInput,
    pub telegram_key: FieldInput,
    pub internet_stream_url: FieldInput,
    pub hotspot_boxes: Vec<HotspotBox>,
}

impl SettingsForm {
    /// Build the form from a freshly loaded configuration and the current
    /// known-network scan. Placeholders mirror the loaded values; a hotspot
    /// box starts checked iff its network is a member of the loaded
    /// `hotspot_networks`.
    pub fn from_loaded(config: &DeviceConfig, known_networks: &[String]) -> Self {
        let clip = &config.camera_input.clip;
        let motion = &config.motion_listener;
        SettingsForm {
            g_cloud_limit_gb: FieldInput::new(number_placeholder(config.g_cloud.limit_gb)),
            disk_full_buffer_gb: FieldInput::new(number_placeholder(clip.disk_full_buffer_gb)),
            sensitivity_inverse: FieldInput::new(number_placeholder(motion.sensitivity_inverse)),
            threshold_sum_kilo: FieldInput::new(number_placeholder(motion.threshold_sum_kilo)),
            frame_delay_millisec: FieldInput::new(number_placeholder(motion.frame_delay_millisec)),
            trigger_duration: FieldInput::new(number_placeholder(motion.trigger_duration)),
            segment_size_sec: FieldInput::new(number_placeholder(clip.segment_size_sec)),
            segments: FieldInput::new(number_placeholder(clip.segments)),
            timer_before_clip_sec: FieldInput::new(number_placeholder(clip.timer_before_clip_sec)),
            cooldown_sec: FieldInput::new(number_placeholder(clip.cooldown_sec)),
            telegram_key: FieldInput::new(config.telegram_key.clone()),
            internet_stream_url: FieldInput::new(config.internet_stream_output.url.clone()),
            hotspot_boxes: known_networks
                .iter()
                .map(|n| HotspotBox {
                    network: n.clone(),
                    checked: config.hotspot_networks.contains(n),
                })
                .collect(),
        }
    }

    /// Route raw user input to a field by its settings-screen identifier.
    pub fn set_field(&mut self, field_name: &str, raw: &str) -> Result<(), AppError> {
        debug!("✏️ Settings field '{}' set to '{}'", field_name, raw);
        let field = match field_name {
            "g_cloud.limit_gb" => &mut self.g_cloud_limit_gb,
            "camera_input.clip.disk_full_buffer_gb" => &mut self.disk_full_buffer_gb,
            "motion_listener.sensitivity_inverse" => &mut self.sensitivity_inverse,
            "motion_listener.threshold_sum_kilo" => &mut self.threshold_sum_kilo,
            "motion_listener.frame_delay_millisec" => &mut self.frame_delay_millisec,
            "motion_listener.trigger_duration" => &mut self.trigger_duration,
            "camera_input.clip.segment_size_sec" => &mut self.segment_size_sec,
            "camera_input.clip.segments" => &mut self.segments,
            "camera_input.clip.timer_before_clip_sec" => &mut self.timer_before_clip_sec,
            "camera_input.clip.cooldown_sec" => &mut self.cooldown_sec,
            "telegram_key" => &mut self.telegram_key,
            "internet_stream_output.url" => &mut self.internet_stream_url,
            other => {
                return Err(AppError::Config(format!(
                    "'{}' is not an editable settings field",
                    other
                )));
            }
        };
        field.enter(raw);
        Ok(())
    }

    /// Check or uncheck a hotspot box. Returns false when the network is not
    /// in the current scan.
    pub fn set_hotspot(&mut self, network: &str, checked: bool) -> bool {
        match self.hotspot_boxes.iter_mut().find(|b| b.network == network) {
            Some(hotspot_box) => {
                hotspot_box.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Exactly the known networks whose box is currently checked, in scan
    /// order. Networks that disappeared from the scan are gone with it.
    pub fn checked_networks(&self) -> Vec<String> {
        self.hotspot_boxes
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.network.clone())
            .collect()
    }

    /// Merge the form into a loaded configuration value. The hotspot set is
    /// recomputed wholesale; every other exposed field takes its effective
    /// value; nothing else is touched.
    pub fn merge_into(&self, config: &mut DeviceConfig) {
        config.hotspot_networks = self.checked_networks();

        config.g_cloud.limit_gb = self.g_cloud_limit_gb.as_number();

        let clip = &mut config.camera_input.clip;
        clip.disk_full_buffer_gb = self.disk_full_buffer_gb.as_number();
        clip.segment_size_sec = self.segment_size_sec.as_number();
        clip.segments = self.segments.as_number();
        clip.timer_before_clip_sec = self.timer_before_clip_sec.as_number();
        clip.cooldown_sec = self.cooldown_sec.as_number();

        let motion = &mut config.motion_listener;
        motion.sensitivity_inverse = self.sensitivity_inverse.as_number();
        motion.threshold_sum_kilo = self.threshold_sum_kilo.as_number();
        motion.frame_delay_millisec = self.frame_delay_millisec.as_number();
        motion.trigger_duration = self.trigger_duration.as_number();

        config.telegram_key = self.telegram_key.effective().to_string();
        config.internet_stream_output.url = self.internet_stream_url.effective().to_string();
    }
}

/// Mirror a numeric value into input-placeholder text the way the settings
/// screen displays it ("12", not "12.0").
fn number_placeholder(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_finite() && value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_config::test_fixtures::SAMPLE_CONFIG_YAML;

    fn loaded() -> DeviceConfig {
        DeviceConfig::from_yaml(SAMPLE_CONFIG_YAML).unwrap()
    }

    fn known() -> Vec<String> {
        vec![
            "home-wifi".to_string(),
            "garage".to_string(),
            "cafe".to_string(),
        ]
    }

    #[test]
    fn placeholders_mirror_loaded_values() {
        let form = SettingsForm::from_loaded(&loaded(), &known());
        assert_eq!(form.g_cloud_limit_gb.placeholder(), "12");
        assert_eq!(form.segment_size_sec.placeholder(), "60");
        assert_eq!(form.telegram_key.placeholder(), "123456:ABCDEF");
        assert_eq!(
            form.internet_stream_url.placeholder(),
            "rtmp://upstream.example/live"
        );
    }

    #[test]
    fn hotspot_boxes_start_checked_iff_member() {
        let form = SettingsForm::from_loaded(&loaded(), &known());
        let states: Vec<(String, bool)> = form
            .hotspot_boxes
            .iter()
            .map(|b| (b.network.clone(), b.checked))
            .collect();
        assert_eq!(
            states,
            vec![
                ("home-wifi".to_string(), true),
                ("garage".to_string(), true),
                ("cafe".to_string(), false),
            ]
        );
    }

    #[test]
    fn empty_input_falls_back_to_loaded_value() {
        let mut form = SettingsForm::from_loaded(&loaded(), &known());
        form.set_field("g_cloud.limit_gb", "20").unwrap();
        form.set_field("g_cloud.limit_gb", "").unwrap();

        let mut config = loaded();
        form.merge_into(&mut config);
        assert_eq!(config.g_cloud.limit_gb, 12.0);
    }

    #[test]
    fn no_edit_merge_reproduces_the_original() {
        let original = loaded();
        // Known networks match the loaded hotspot set, so even the
        // wholesale-recomputed field comes back identical.
        let networks = original.hotspot_networks.clone();
        let form = SettingsForm::from_loaded(&original, &networks);

        let mut merged = original.clone();
        form.merge_into(&mut merged);
        assert_eq!(merged, original);
    }

    #[test]
    fn invalid_numeric_input_persists_as_nan() {
        let mut form = SettingsForm::from_loaded(&loaded(), &known());
        form.set_field("motion_listener.threshold_sum_kilo", "abc")
            .unwrap();

        let mut config = loaded();
        form.merge_into(&mut config);
        assert!(config.motion_listener.threshold_sum_kilo.is_nan());
        // Neighboring fields are untouched.
        assert_eq!(config.motion_listener.sensitivity_inverse, 40.0);
    }

    #[test]
    fn hotspot_set_is_recomputed_wholesale() {
        let mut original = loaded();
        // A previously persisted hotspot that no longer shows up in the scan.
        original.hotspot_networks.push("long-gone".to_string());

        let mut form = SettingsForm::from_loaded(&original, &known());
        assert!(form.set_hotspot("cafe", true));
        assert!(form.set_hotspot("garage", false));
        assert!(!form.set_hotspot("long-gone", true));

        let mut merged = original.clone();
        form.merge_into(&mut merged);
        assert_eq!(
            merged.hotspot_networks,
            vec!["home-wifi".to_string(), "cafe".to_string()]
        );
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let mut form = SettingsForm::from_loaded(&loaded(), &known());
        assert!(form.set_field("g_cloud.backup_scheduler_timeout_sec", "1").is_err());
    }

    #[test]
    fn numeric_field_accepts_fractional_input() {
        let mut form = SettingsForm::from_loaded(&loaded(), &known());
        form.set_field("camera_input.clip.disk_full_buffer_gb", "1.5")
            .unwrap();
        let mut config = loaded();
        form.merge_into(&mut config);
        assert_eq!(config.camera_input.clip.disk_full_buffer_gb, 1.5);
    }
}
