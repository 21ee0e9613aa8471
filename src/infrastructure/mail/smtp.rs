#[cfg(test)]
#[path = "smtp_test.rs"]
mod tests;

use std::env;
use std::str::FromStr;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::SmtpTransport;
use lettre::Transport;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AssistantError;
use crate::domain::models::Envelope;
use crate::domain::models::Mailer;
use crate::domain::models::TransportSecurity;

fn parse_mailbox(address: &str, field: &str) -> Result<Mailbox, AssistantError> {
    return address.parse::<Mailbox>().map_err(|err| {
        return AssistantError::Delivery(format!("invalid {field} address {address}: {err}"));
    });
}

fn build_message(envelope: &Envelope) -> Result<lettre::Message, AssistantError> {
    return lettre::Message::builder()
        .from(parse_mailbox(&envelope.sender, "sender")?)
        .to(parse_mailbox(&envelope.recipient, "recipient")?)
        .subject(envelope.subject.clone())
        .body(envelope.body.clone())
        .map_err(|err| {
            return AssistantError::Delivery(err.to_string());
        });
}

pub struct SmtpMailer {
    relay: String,
    security: TransportSecurity,
    credentials: Credentials,
}

impl SmtpMailer {
    /// Mailer for the notification path: sender credentials come from the
    /// process environment at call time, session security is the configured
    /// default. Presence of the variables is not checked up front; missing
    /// credentials surface as a provider rejection.
    pub fn from_env() -> SmtpMailer {
        let sender = env::var("SENDER_EMAIL").unwrap_or_default();
        let password = env::var("SENDER_PASSWORD").unwrap_or_default();
        let security = TransportSecurity::from_str(&Config::get(ConfigKey::SmtpSecurity))
            .unwrap_or(TransportSecurity::StartTls);

        return SmtpMailer {
            relay: Config::get(ConfigKey::SmtpRelay),
            security,
            credentials: Credentials::new(sender, password),
        };
    }

    /// Mailer for operator-entered credentials, as used by the email form.
    pub fn with_credentials(sender: &str, password: &str, security: TransportSecurity) -> SmtpMailer {
        return SmtpMailer {
            relay: Config::get(ConfigKey::SmtpRelay),
            security,
            credentials: Credentials::new(sender.to_string(), password.to_string()),
        };
    }

    fn transport(&self) -> Result<SmtpTransport, AssistantError> {
        let builder = match self.security {
            TransportSecurity::StartTls => SmtpTransport::starttls_relay(&self.relay),
            TransportSecurity::SslTls => SmtpTransport::relay(&self.relay),
        };

        let builder = builder.map_err(|err| {
            return AssistantError::Delivery(err.to_string());
        })?;

        return Ok(builder.credentials(self.credentials.clone()).build());
    }
}

impl Mailer for SmtpMailer {
    /// Blocks until the provider accepts or rejects the message. Incomplete
    /// envelopes are rejected before any network traffic.
    fn send(&self, envelope: &Envelope) -> Result<(), AssistantError> {
        envelope.validate()?;

        let message = build_message(envelope)?;
        let transport = self.transport()?;

        transport.send(&message).map_err(|err| {
            tracing::error!(error = %err, recipient = %envelope.recipient, "Failed to send email");
            return AssistantError::Delivery(err.to_string());
        })?;

        tracing::info!(recipient = %envelope.recipient, "Email sent");
        return Ok(());
    }
}

/// Notification utility: delivers a message using environment-sourced sender
/// credentials over the configured relay.
pub fn notify(recipient: &str, subject: &str, body: &str) -> Result<(), AssistantError> {
    let sender = env::var("SENDER_EMAIL").unwrap_or_default();
    let envelope = Envelope {
        sender,
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
    };

    return SmtpMailer::from_env().send(&envelope);
}
