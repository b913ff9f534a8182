use crate::config::Config;
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Anything that can turn a chat request into the assistant's reply.
pub trait CompletionBackend {
    fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// Pulls `choices[0].message.content` out of a raw response body.
pub fn extract_content(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", e, body)))?;
    parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse("No choices returned".to_string()))?
        .message
        .content
        .ok_or_else(|| Error::MalformedResponse("First choice has no content".to_string()))
}

pub struct GroqClient {
    client: Client,
    config: Config,
    retry: RetryPolicy,
}

impl GroqClient {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::HttpClient)?;
        let retry = RetryPolicy::new(config.max_retries);
        Ok(GroqClient {
            client,
            config,
            retry,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn send_once(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .map_err(Error::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Status { status, body });
        }
        let text = response.text().map_err(Error::Request)?;
        debug!("Received {} bytes from completion endpoint", text.len());
        extract_content(&text)
    }
}

impl CompletionBackend for GroqClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let mut retry = 0;
        loop {
            info!(
                "Calling Groq API ({}), model {}",
                self.config.api_url, request.model
            );
            match self.send_once(request) {
                Ok(content) => return Ok(content),
                Err(e) if e.is_transient() => match self.retry.delay_for(retry) {
                    Some(delay) => {
                        warn!(
                            "Attempt {} failed: {}; retrying in {:?}",
                            retry + 1,
                            e,
                            delay
                        );
                        std::thread::sleep(delay);
                        retry += 1;
                    }
                    None => return Err(e),
                },
                Err(e) => return Err(e),
            }
        }
    }
}
