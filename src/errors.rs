use thiserror::Error;

/// Failure of a single chat-completion round trip.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("transport error: {0}")] Transport(String),
    #[error("endpoint returned no text")] EmptyResponse,
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        CompletionError::Transport(e.to_string())
    }
}

/// Decoded model output did not match the plan schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema validation error: invalid or missing field(s): {}", .fields.join(", "))]
pub struct SchemaValidationError {
    pub fields: Vec<String>,
}

#[derive(Error, Debug)]
pub enum PlanGenerationError {
    #[error("failed to generate startup plan: {0}")]
    Completion(#[from] CompletionError),
    #[error("failed to generate startup plan: no valid JSON found in response")]
    NoJsonFound,
    #[error("failed to generate startup plan: {0}")]
    Schema(#[from] SchemaValidationError),
}

#[derive(Error, Debug)]
#[error("failed to generate mentorship advice: {0}")]
pub struct MentorshipGenerationError(#[from] pub CompletionError);

#[derive(Error, Debug)]
#[error("failed to generate HTML prototype: {0}")]
pub struct PrototypeGenerationError(#[from] pub CompletionError);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API key missing: set `api_key` in the config file or the {0} env var")]
    MissingApiKey(String),
    #[error("reading config: {0}")] Read(#[from] std::io::Error),
    #[error("parsing config: {0}")] Parse(#[from] toml::de::Error),
}
