//! Outbound email seam.
//!
//! The shop's mail relay is an external collaborator: it takes a recipient,
//! a subject and a rendered HTML body and answers success or failure.
//! Credentials are entered through the UI and held in memory only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailConfig {
    /// HTTP endpoint of the relay, e.g. "https://relay.local/send".
    pub relay_url: String,
    pub api_key: String,
    pub from_address: String,
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, config: &EmailConfig, email: &OutboundEmail) -> Result<(), MailerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("relay rejected message: {0}")]
    Rejected(String),
    #[error("relay unreachable: {0}")]
    Transport(String),
}

/// Production mailer: posts the message as JSON to the configured relay.
pub struct RelayMailer {
    client: reqwest::Client,
}

impl RelayMailer {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for RelayMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, config: &EmailConfig, email: &OutboundEmail) -> Result<(), MailerError> {
        let from = match &config.from_name {
            Some(name) => format!("{} <{}>", name, config.from_address),
            None => config.from_address.clone(),
        };
        let payload = RelayRequest {
            from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html_body,
        };

        let response = self
            .client
            .post(&config.relay_url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| MailerError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected(format!("{status}: {body}")));
        }

        tracing::info!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}
