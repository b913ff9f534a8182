use crate::error::{Error, Result};
use std::time::Duration;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_TIMEOUT_SEC: u64 = 90;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
const MAX_RETRIES_LIMIT: u32 = 10;

pub const ENV_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_MODEL: &str = "GROQ_MODEL";
pub const ENV_API_URL: &str = "GROQ_API_URL";
pub const ENV_TIMEOUT_SEC: &str = "GROQ_TIMEOUT_SEC";
pub const ENV_MAX_RETRIES: &str = "GROQ_MAX_RETRIES";

/// Everything the completion client needs, resolved once at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: GROQ_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SEC),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_with_model(None)
    }

    /// Like [`Config::from_env`], with an optional model that wins over
    /// `GROQ_MODEL`.
    pub fn from_env_with_model(model: Option<&str>) -> Result<Self> {
        Self::from_lookup_with_model(env_lookup, model)
    }

    /// Settings for a run that never reaches the network. Everything except
    /// the API key is read and validated.
    pub fn preview_from_env(model: Option<&str>) -> Result<Self> {
        Self::preview_from_lookup(env_lookup, model)
    }

    /// Builds the config from an arbitrary variable source. An unset or blank
    /// API key is an error; other variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_model(lookup, None)
    }

    pub fn from_lookup_with_model<F>(lookup: F, model: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingApiKey)?;
        Self::settings_from_lookup(&lookup, api_key, model)
    }

    pub fn preview_from_lookup<F>(lookup: F, model: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::settings_from_lookup(&lookup, String::new(), model)
    }

    fn settings_from_lookup<F>(lookup: &F, api_key: String, model: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(api_key);
        if let Some(model) = model.map(str::to_string).or_else(|| lookup(ENV_MODEL)) {
            config.model = model;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            config.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SEC) {
            let secs = parse_number::<u64>(ENV_TIMEOUT_SEC, &raw)?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_number::<u32>(ENV_MAX_RETRIES, &raw)?;
        }

        config.validate_settings()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        self.validate_settings()
    }

    fn validate_settings(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(invalid(ENV_MODEL, &self.model, "must not be empty"));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(invalid(ENV_API_URL, &self.api_url, "must be an http(s) URL"));
        }
        if self.timeout.is_zero() {
            return Err(invalid(ENV_TIMEOUT_SEC, "0", "must be positive"));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(invalid(
                ENV_MAX_RETRIES,
                &self.max_retries.to_string(),
                "must be between 0 and 10",
            ));
        }
        Ok(())
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(field, raw, "not a non-negative integer"))
}

fn invalid(field: &str, value: &str, reason: &str) -> Error {
    Error::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
