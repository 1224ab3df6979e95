use crate::backend::api::DashcamBackend;
use crate::errors::AppError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Instant;

/// `DashcamBackend` over the appliance's local control service.
///
/// Each command maps to `POST <base>/rpc/<command>` with a JSON argument
/// object; the command names on the wire are the historical frontend command
/// names (`feGetConfig`, `feSetParked`, ...).
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        HttpBackend {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn call(&self, command: &str, args: Value) -> Result<Value, AppError> {
        let url = format!("{}/rpc/{}", self.base_url, command);
        debug!("📡 Invoking backend command '{}' at {}", command, url);
        let start_time = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(&args)
            .send()
            .await
            .map_err(|e| AppError::backend(command, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::backend(
                command,
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::backend(command, e))?;
        debug!(
            "Backend command '{}' answered {} bytes in {:?}",
            command,
            body.len(),
            start_time.elapsed()
        );

        // Ack-style commands answer with an empty body.
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body)
            .map_err(|e| AppError::backend(command, format!("invalid JSON response: {}", e)))
    }
}

#[async_trait]
impl DashcamBackend for HttpBackend {
    async fn get_config(&self) -> Result<String, AppError> {
        let value = self.call("feGetConfig", json!({})).await?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::backend("feGetConfig", "expected a string response"))
    }

    async fn set_config(&self, config: String) -> Result<(), AppError> {
        info!("💾 Persisting device configuration ({} bytes)", config.len());
        self.call("feSetConfig", json!({ "config": config })).await?;
        Ok(())
    }

    async fn reboot_system(&self) -> Result<(), AppError> {
        info!("🔄 Requesting system reboot");
        self.call("feRebootSystem", json!({})).await?;
        Ok(())
    }

    async fn get_known_networks(&self) -> Result<Vec<String>, AppError> {
        let value = self.call("feGetKnownNetworks", json!({})).await?;
        serde_json::from_value(value)
            .map_err(|e| AppError::backend("feGetKnownNetworks", format!("expected a string list: {}", e)))
    }

    async fn schedule_clip(&self) -> Result<(), AppError> {
        self.call("feScheduleClip", json!({})).await?;
        Ok(())
    }

    async fn get_parked(&self) -> Result<bool, AppError> {
        let value = self.call("feGetParked", json!({})).await?;
        value
            .as_bool()
            .ok_or_else(|| AppError::backend("feGetParked", "expected a boolean response"))
    }

    async fn set_parked(&self, parked: bool) -> Result<(), AppError> {
        self.call("feSetParked", json!({ "parked": parked })).await?;
        Ok(())
    }
}
