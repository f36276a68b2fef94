use crate::{abstract_trait::SmsServiceTrait, config::SmsConfig};
use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;
use shared::errors::ServiceError;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(rename = "SMSMessageData")]
    data: MessageData,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Recipients", default)]
    recipients: Vec<Recipient>,
}

#[derive(Debug, Deserialize)]
struct Recipient {
    number: String,
    status: String,
}

/// Bulk SMS client speaking the Africa's Talking messaging API.
#[derive(Debug, Clone)]
pub struct AfricasTalkingSms {
    client: Client,
    config: SmsConfig,
}

impl AfricasTalkingSms {
    pub fn new(config: SmsConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServiceError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/version1/messaging", self.config.base_url)
    }
}

#[async_trait]
impl SmsServiceTrait for AfricasTalkingSms {
    async fn send(&self, to: &str, message: &str) -> Result<(), ServiceError> {
        let mut form = vec![
            ("username", self.config.username.as_str()),
            ("to", to),
            ("message", message),
        ];
        if let Some(sender) = self.config.sender_id.as_deref() {
            form.push(("from", sender));
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("apiKey", &self.config.api_key)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("SMS request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!(
                "SMS gateway returned {status}: {body}"
            )));
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Invalid SMS gateway response: {e}")))?;

        match body.data.recipients.first() {
            Some(recipient) if recipient.status == "Success" => {
                info!("📨 SMS accepted for {}", recipient.number);
                Ok(())
            }
            Some(recipient) => Err(ServiceError::Upstream(format!(
                "SMS to {} rejected: {}",
                recipient.number, recipient.status
            ))),
            None => Err(ServiceError::Upstream(format!(
                "SMS gateway accepted no recipients: {}",
                body.data.message
            ))),
        }
    }
}

/// Used when no gateway credentials are configured.
#[derive(Debug, Clone, Default)]
pub struct LogOnlySms;

#[async_trait]
impl SmsServiceTrait for LogOnlySms {
    async fn send(&self, to: &str, message: &str) -> Result<(), ServiceError> {
        info!("📵 SMS gateway not configured, would send to {to}: {message}");
        Ok(())
    }
}
