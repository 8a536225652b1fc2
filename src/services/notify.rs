use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts rendered streak messages to the configured webhook.
pub struct Notifier {
    http: Client,
    webhook_url: String,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build http client"),
            webhook_url: config.webhook_url.clone(),
        }
    }

    /// Fire-and-forget delivery: the caller logs a failure and moves on to
    /// the next account instead of aborting the run.
    pub async fn send(&self, message: &str) -> Result<()> {
        self.http
            .post(&self.webhook_url)
            .json(&json!({ "content": message }))
            .send()
            .await?
            .error_for_status()?;

        info!(message, "notification delivered");
        Ok(())
    }
}
