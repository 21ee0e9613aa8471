use async_trait::async_trait;

use super::AssistantError;

pub type LlmBox = Box<dyn Llm + Send + Sync>;

/// A chat-completion language model. Two call sites exist, SQL generation
/// and answer synthesis, both invoked at temperature zero.
#[async_trait]
pub trait Llm {
    /// Used at startup to verify all configurations are available to work
    /// with the model provider.
    async fn health_check(&self) -> anyhow::Result<()>;

    /// Sends a rendered prompt and returns the full completion text. Calls
    /// block until the provider responds; there is no client-side timeout.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, AssistantError>;
}
