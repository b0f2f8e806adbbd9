//! Reasoning service seam and its OpenAI-compatible implementation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReasoningError;

pub trait ReasoningService: Send + Sync {
    /// Send one system + user exchange and return the reply text.
    fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, ReasoningError>;
}

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiCompatible {
    agent: ureq::Agent,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiCompatible {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(60)))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            temperature: 0.3,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ReasoningService for OpenAiCompatible {
    fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, ReasoningError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        info!(model = %self.model, "invoking reasoning service");

        let mut request = self.agent.post(&url);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", &format!("Bearer {key}"));
        }
        let mut response = request
            .send_json(&body)
            .map_err(|e| ReasoningError::Invocation(e.to_string()))?;

        let reply: ChatResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ReasoningError::ResponseParse(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ReasoningError::ResponseParse("no message in response".to_string()))
    }
}
