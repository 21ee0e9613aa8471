#[cfg(test)]
#[path = "mail_test.rs"]
mod tests;
use std::str::FromStr;

use anyhow::bail;

use super::AssistantError;

/// SMTP session security. `StartTls` upgrades a plaintext session (port
/// 587), `SslTls` opens an SSL-wrapped session (port 465).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportSecurity {
    StartTls,
    SslTls,
}

impl ToString for TransportSecurity {
    fn to_string(&self) -> String {
        match self {
            TransportSecurity::StartTls => return String::from("starttls"),
            TransportSecurity::SslTls => return String::from("ssltls"),
        }
    }
}

impl FromStr for TransportSecurity {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> anyhow::Result<TransportSecurity> {
        match text.to_lowercase().as_str() {
            "starttls" => return Ok(TransportSecurity::StartTls),
            "ssltls" => return Ok(TransportSecurity::SslTls),
            _ => bail!(format!("{text} is not a valid SMTP security mode")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Envelope {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Envelope {
    /// Rejects incomplete envelopes before any network traffic happens.
    pub fn validate(&self) -> Result<(), AssistantError> {
        if self.recipient.trim().is_empty() {
            return Err(AssistantError::Delivery(
                "recipient must not be empty".to_string(),
            ));
        }
        if self.subject.trim().is_empty() {
            return Err(AssistantError::Delivery(
                "subject must not be empty".to_string(),
            ));
        }
        if self.body.trim().is_empty() {
            return Err(AssistantError::Delivery(
                "message body must not be empty".to_string(),
            ));
        }

        return Ok(());
    }
}

/// Sends one message and blocks until the provider accepts or rejects it.
/// No delivery confirmation beyond provider acceptance, no retries.
pub trait Mailer {
    fn send(&self, envelope: &Envelope) -> Result<(), AssistantError>;
}
