use crate::backend::api::DashcamBackend;
use crate::core::settings_form::SettingsForm;
use crate::device_config::DeviceConfig;
use crate::errors::AppError;
use log::{debug, info};
use std::time::Instant;

/// One settings-screen visit: the loaded configuration, the known-network
/// scan, and the working form.
///
/// The configuration is fetched once on open, held only for the lifetime of
/// the session, and written back in one piece on save. The backend file is
/// the durable owner; there is no locking against concurrent writers
/// (last write wins).
pub struct SettingsSession {
    loaded: DeviceConfig,
    pub known_networks: Vec<String>,
    pub form: SettingsForm,
}

impl SettingsSession {
    /// Fetch the serialized configuration and the known-network list,
    /// independently and concurrently, then decode and build the form.
    ///
    /// There is no retry: a failed open propagates and the screen simply
    /// stays unpopulated. Dropping the future before completion discards
    /// the late result instead of applying it anywhere.
    pub async fn open(backend: &dyn DashcamBackend) -> Result<Self, AppError> {
        debug!("🛠️ Opening settings session...");
        let start_time = Instant::now();

        let (config_text, known_networks) =
            tokio::join!(backend.get_config(), backend.get_known_networks());
        let config_text = config_text?;
        let known_networks = known_networks?;

        let loaded = DeviceConfig::from_yaml(&config_text)?;
        let form = SettingsForm::from_loaded(&loaded, &known_networks);
        info!(
            "✅ Settings session opened ({} known networks) in {:?}",
            known_networks.len(),
            start_time.elapsed()
        );
        Ok(SettingsSession {
            loaded,
            known_networks,
            form,
        })
    }

    /// The configuration as loaded, before any edits.
    pub fn loaded(&self) -> &DeviceConfig {
        &self.loaded
    }

    /// Merge the form into the loaded value and re-encode it. Fields the
    /// form does not expose come through verbatim.
    pub fn merged_yaml(&self) -> Result<String, AppError> {
        let mut merged = self.loaded.clone();
        self.form.merge_into(&mut merged);
        merged.to_yaml()
    }

    /// Persist the merged configuration, then reboot.
    ///
    /// Strictly sequential: the persist call is awaited and must succeed
    /// before the reboot command is issued. A persist failure propagates and
    /// the reboot never fires. There is no rollback and no confirmation.
    pub async fn save_and_reboot(&self, backend: &dyn DashcamBackend) -> Result<(), AppError> {
        let yaml = self.merged_yaml()?;
        info!("💾 Saving configuration ({} bytes) and rebooting", yaml.len());
        backend.set_config(yaml).await?;
        backend.reboot_system().await?;
        Ok(())
    }
}
