pub mod gemini;
pub mod mock;

pub use gemini::*;
pub use mock::*;

use thiserror::Error;

/// Failure talking to the generative text backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Generative service unreachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Generative service returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Model answer was cut off by the output token limit")]
    Truncated,

    #[error("Model returned an empty answer")]
    EmptyResponse,

    #[error("Generative service unavailable: {0}")]
    Unavailable(String),
}

/// Single-turn generative text capability consumed by the case pipeline.
///
/// Implementations return plain text; every bit of structure is imposed
/// by the caller's parsing.
pub trait GenerativeTextService: Send + Sync {
    /// Answer a free-form prompt. No conversation state.
    fn ask(&self, prompt: &str) -> Result<String, LlmError>;

    /// Produce a marker-delimited case summary for a raw support transcript.
    fn summarize(&self, transcript: &str) -> Result<String, LlmError>;
}
