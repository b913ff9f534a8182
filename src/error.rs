use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read input file {path:?}: {source}")]
    ReadDiff {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GROQ_API_KEY environment variable must be set")]
    MissingApiKey,

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request to completion endpoint failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Failed to write to {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Network failures and 5xx answers are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
