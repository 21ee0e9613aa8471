use thiserror::Error;

/// Failure taxonomy for a session. `Execution` is the only variant that does
/// not abort a turn: its text is threaded in to answer synthesis so the
/// assistant can narrate the failure.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("model request failed: {0}")]
    Generation(String),
    #[error("SQL execution failed: {0}")]
    Execution(String),
    #[error("email delivery failed: {0}")]
    Delivery(String),
}
