use serde::{Serialize, Deserialize};
use fs_err as fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub model: String,
    /// Static value sent as `HTTP-Referer` on every completion call.
    pub referer: String,
    /// Static value sent as `X-Title` on every completion call.
    pub title: String,
    pub api_key_env: String,
    /// Secrets-file style key; takes precedence over `api_key_env`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub output_dir: PathBuf,
    pub save_transcripts: bool,
    pub transcript_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".into(),
            model: "deepseek/deepseek-chat".into(),
            referer: "http://localhost:8501".into(),
            title: "Builder School in a Box".into(),
            api_key_env: "OPENROUTER_API_KEY".into(),
            api_key: None,
            output_dir: ".".into(),
            save_transcripts: false,
            transcript_dir: ".builder/sessions".into(),
        }
    }
}

impl Config {
    /// Load from a TOML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                let s = fs::read_to_string(p)?;
                Ok(toml::from_str(&s)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    fn api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
        let present = |k: &String| !k.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| lookup(&self.api_key_env))
            .filter(present)
            .ok_or_else(|| ConfigError::MissingApiKey(self.api_key_env.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_target_openrouter() {
        let cfg = Config::load(None).unwrap();
        assert_eq!(cfg.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(cfg.model, "deepseek/deepseek-chat");
        assert!(!cfg.save_transcripts);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "model = \"other/model\"\napi_key = \"sk-file\"\nsave_transcripts = true").unwrap();

        let cfg = Config::load(Some(f.path())).unwrap();
        assert_eq!(cfg.model, "other/model");
        assert_eq!(cfg.title, "Builder School in a Box");
        assert!(cfg.save_transcripts);
        assert_eq!(cfg.api_key_with(|_| Some("sk-env".into())).unwrap(), "sk-file");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "model = ").unwrap();
        assert!(matches!(Config::load(Some(f.path())), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn api_key_falls_back_to_env() {
        let cfg = Config::default();
        let key = cfg
            .api_key_with(|name| (name == "OPENROUTER_API_KEY").then(|| "sk-env".to_string()))
            .unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn missing_or_blank_key_is_fatal() {
        let cfg = Config::default();
        assert!(matches!(cfg.api_key_with(|_| None), Err(ConfigError::MissingApiKey(v)) if v == "OPENROUTER_API_KEY"));
        assert!(cfg.api_key_with(|_| Some("  ".into())).is_err());
    }

    #[test]
    fn blank_file_key_defers_to_env() {
        let cfg = Config { api_key: Some("".into()), ..Config::default() };
        assert_eq!(cfg.api_key_with(|_| Some("sk-env".into())).unwrap(), "sk-env");
    }
}
