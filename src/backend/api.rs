use crate::errors::AppError;
use async_trait::async_trait;

/// The command boundary to the appliance backend.
///
/// Everything the panel cannot do on its own (motion detection, clip
/// lifecycle, disk management, networking, reboot) lives behind these seven
/// operations. The panel never reaches past this surface, which also lets
/// tests substitute a recording fake.
#[async_trait]
pub trait DashcamBackend: Send + Sync {
    /// Fetch the serialized (YAML) device configuration.
    async fn get_config(&self) -> Result<String, AppError>;

    /// Persist a serialized device configuration. The backend owns the file;
    /// last write wins.
    async fn set_config(&self, config: String) -> Result<(), AppError>;

    /// Reboot the appliance.
    async fn reboot_system(&self) -> Result<(), AppError>;

    /// Network identifiers discovered by the backend's scan.
    async fn get_known_networks(&self) -> Result<Vec<String>, AppError>;

    /// Request a one-shot clip capture. No progress reporting.
    async fn schedule_clip(&self) -> Result<(), AppError>;

    /// Current parked/driving mode flag.
    async fn get_parked(&self) -> Result<bool, AppError>;

    /// Set the parked/driving mode flag.
    async fn set_parked(&self, parked: bool) -> Result<(), AppError>;
}
