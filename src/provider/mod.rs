use async_trait::async_trait;

use crate::config::Config;
use crate::errors::{CompletionError, ConfigError};

pub mod openrouter;

/// One chat-completion round trip: prompts in, raw reply text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        temperature: f32,
    ) -> Result<String, CompletionError>;
}

pub type DynClient = Box<dyn CompletionClient>;

/// Build the configured client. Fails before any request when no API key is available.
pub fn make_client(cfg: &Config) -> Result<DynClient, ConfigError> {
    let api_key = cfg.api_key()?;
    Ok(Box::new(openrouter::OpenRouterClient::new(cfg, api_key)))
}
