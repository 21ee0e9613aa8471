#[cfg(test)]
#[path = "groq_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AssistantError;
use crate::domain::models::Llm;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    temperature: f32,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

pub struct Groq {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Groq {
    fn default() -> Groq {
        return Groq {
            url: Config::get(ConfigKey::GroqURL),
            token: Config::get(ConfigKey::GroqToken),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Llm for Groq {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Groq URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Groq token is not defined. Set GROQ_API_KEY or pass --groq-token");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/v1/models", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Groq is not reachable");
            bail!("Groq is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Groq health check failed");
            bail!("Groq health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, AssistantError> {
        let req = CompletionRequest {
            model: Config::get(ConfigKey::Model),
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
            stream: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                return AssistantError::Generation(err.to_string());
            })?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(status = status, "Failed to make completion request to Groq");
            return Err(AssistantError::Generation(format!(
                "Groq returned status code {status}"
            )));
        }

        let completion = res.json::<CompletionResponse>().await.map_err(|err| {
            return AssistantError::Generation(err.to_string());
        })?;
        tracing::debug!(body = ?completion, "Completion response");

        if completion.choices.is_empty() {
            return Err(AssistantError::Generation(
                "Groq returned no choices".to_string(),
            ));
        }

        return Ok(completion.choices[0].message.content.to_string());
    }
}
