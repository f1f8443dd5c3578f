//! SMSC HTTP gateway notifier
//!
//! Sends the code as an SMS through the SMSC `send.php` endpoint and reads
//! the JSON reply (`fmt=3`). A non-zero `error_code` in the reply is a
//! failure even though the HTTP status is 200.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use otp_core::services::Notifier;
use otp_shared::config::SmscSettings;
use otp_shared::phone::mask_phone_number;

use crate::InfrastructureError;

/// Reply body of `send.php` in JSON mode
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SmscReply {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    cnt: Option<i64>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

/// Turn a raw reply body into a delivery id or a provider error
///
/// A reply without `error_code` counts as accepted; a missing id becomes
/// `unknown`.
pub(crate) fn parse_reply(body: &str) -> Result<(String, i64), String> {
    let reply: SmscReply =
        serde_json::from_str(body).map_err(|e| format!("smsc response parse error: {}", e))?;

    match reply.error_code {
        Some(code) if code != 0 => Err(format!(
            "smsc API error {}: {}",
            code,
            reply.error.unwrap_or_default()
        )),
        _ => {
            let id = reply
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Ok((id, reply.cnt.unwrap_or(1)))
        }
    }
}

/// SMSC gateway client
pub struct SmscNotifier {
    client: reqwest::Client,
    settings: SmscSettings,
}

impl SmscNotifier {
    /// Create a notifier with a request timeout
    ///
    /// Fails when login or password is empty.
    pub fn new(settings: SmscSettings, timeout: Duration) -> Result<Self, InfrastructureError> {
        if settings.login.is_empty() || settings.password.is_empty() {
            return Err(InfrastructureError::Config(
                "SMSC_LOGIN and SMSC_PASSWORD must be set for the smsc provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            endpoint = %settings.endpoint,
            login = %settings.login,
            "SMSC notifier initialized"
        );

        Ok(Self { client, settings })
    }

    fn message_for(&self, code: &str) -> String {
        format!("{}{}", self.settings.prefix, code)
    }
}

#[async_trait]
impl Notifier for SmscNotifier {
    async fn send(&self, destination: &str, message: &str) -> Result<String, String> {
        let text = self.message_for(message);
        let masked = mask_phone_number(destination);
        debug!(phone = %masked, body = %text, "smsc: sending message");

        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[
                ("login", self.settings.login.as_str()),
                ("psw", self.settings.password.as_str()),
                ("phones", destination),
                ("mes", text.as_str()),
                ("fmt", "3"),
            ])
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, which includes the password
                let e = e.without_url();
                error!(phone = %masked, error = %e, "smsc: request failed");
                format!("smsc send request error: {}", e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("smsc response read error: {}", e.without_url()))?;

        if !status.is_success() {
            error!(phone = %masked, status = %status, "smsc: unexpected HTTP status");
            return Err(format!("smsc HTTP status {}", status));
        }

        match parse_reply(&body) {
            Ok((id, parts)) => {
                info!(
                    provider = "smsc",
                    phone = %masked,
                    message_id = %id,
                    parts = parts,
                    "smsc: message sent"
                );
                Ok(format!("smsc_{}", id))
            }
            Err(e) => {
                error!(phone = %masked, error = %e, "smsc: gateway rejected message");
                Err(e)
            }
        }
    }

    fn provider_name(&self) -> &str {
        "smsc"
    }
}
