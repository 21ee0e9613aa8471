use std::str::FromStr;

use super::AssistantError;
use super::Envelope;
use super::TransportSecurity;

fn envelope() -> Envelope {
    return Envelope {
        sender: "hr@example.com".to_string(),
        recipient: "dev@example.com".to_string(),
        subject: "Job match".to_string(),
        body: "You matched a posting.".to_string(),
    };
}

#[test]
fn it_accepts_a_complete_envelope() {
    assert!(envelope().validate().is_ok());
}

#[test]
fn it_rejects_an_empty_recipient() {
    let mut env = envelope();
    env.recipient = "  ".to_string();

    let err = env.validate().unwrap_err();
    assert!(matches!(err, AssistantError::Delivery(_)));
    assert!(err.to_string().contains("recipient"));
}

#[test]
fn it_rejects_an_empty_subject() {
    let mut env = envelope();
    env.subject = "".to_string();

    assert!(env.validate().is_err());
}

#[test]
fn it_rejects_an_empty_body() {
    let mut env = envelope();
    env.body = "".to_string();

    assert!(env.validate().is_err());
}

#[test]
fn it_parses_security_modes() {
    assert_eq!(
        TransportSecurity::from_str("starttls").unwrap(),
        TransportSecurity::StartTls
    );
    assert_eq!(
        TransportSecurity::from_str("SSLTLS").unwrap(),
        TransportSecurity::SslTls
    );
    assert!(TransportSecurity::from_str("plaintext").is_err());
}
