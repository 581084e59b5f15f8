use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::errors::CompletionError;
use crate::wire::{ChatRequest, ChatResponse};

/// OpenAI-compatible chat-completion client routed through OpenRouter.
///
/// Sends exactly one request per call. No retries, and no timeout beyond
/// reqwest's default.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    referer: String,
    title: String,
}

impl OpenRouterClient {
    pub fn new(cfg: &Config, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            referer: cfg.referer.clone(),
            title: cfg.title.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl crate::provider::CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let body = ChatRequest::new(&self.model, system, user, temperature);
        let url = self.endpoint();
        debug!(%url, model = %self.model, temperature, prompt_chars = user.len(), "POST chat completion");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(%status, body_bytes = text.len(), "chat completion response");

        if !status.is_success() {
            return Err(CompletionError::Transport(format!("API error ({}): {}", status, text)));
        }

        parse_completion(&text)
    }
}

/// Pull `choices[0].message.content` out of a raw response body.
fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::Transport(format!("failed to parse response: {e}\nRaw: {body}")))?;
    parsed.first_text().ok_or(CompletionError::EmptyResponse)
}
