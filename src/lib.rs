//! Turns a code diff into a QA test plan using an OpenAI-compatible
//! chat-completion endpoint (Groq by default).
//!
//! The pipeline is strictly sequential: read the diff, build the prompt,
//! ask the model, write its answer.

pub mod config;
pub mod diff;
pub mod error;
pub mod groq;
pub mod output;
pub mod prompt;
pub mod retry;

use groq::{ChatMessage, ChatRequest, CompletionBackend};
use log::info;
use std::path::Path;

pub use config::Config;
pub use error::{Error, Result};
pub use groq::GroqClient;

/// System instruction followed by the templated diff.
pub fn build_request(model: &str, diff: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(prompt::SYSTEM_PROMPT),
            ChatMessage::user(prompt::build_prompt(diff)),
        ],
    }
}

/// Loads the diff and wraps it into a request, without any network access.
pub fn prepare_request(model: &str, input: &Path) -> Result<ChatRequest> {
    info!("Reading input file: {}", input.display());
    let diff = diff::read_diff(input)?;
    Ok(build_request(model, &diff))
}

/// Runs the whole pipeline and returns the generated plan. The input is read
/// before the backend is called, and the output is only touched on success.
pub fn generate_test_plan(
    backend: &dyn CompletionBackend,
    model: &str,
    input: &Path,
    output: &Path,
) -> Result<String> {
    let request = prepare_request(model, input)?;
    let plan = backend.complete(&request)?;

    output::write_output(output, &plan)?;
    info!("Test plan written to: {}", output.display());
    Ok(plan)
}
