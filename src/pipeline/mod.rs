pub mod llm; // Generative text backend seam (Gemini + scripted mock)
pub mod orchestrator; // Case pipeline: summary → lookup → filter → tips
pub mod suggestion; // Similarity filter + tip synthesizer
pub mod summary; // Marker extraction + module/mood classification
pub mod text;
pub mod types;

pub use orchestrator::CasePipeline;
pub use types::*;

use thiserror::Error;

use crate::db::DatabaseError;
use llm::LlmError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Transcript is empty")]
    InputEmpty,

    #[error("Generative model error: {0}")]
    Llm(#[from] LlmError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
