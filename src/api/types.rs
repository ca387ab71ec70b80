use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::models::CaseRecord;
use crate::pipeline::{CasePipeline, StructuredSummary};

/// Shared state for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub pipeline: Arc<CasePipeline>,
}

impl ApiContext {
    pub fn new(pipeline: Arc<CasePipeline>) -> Self {
        Self { pipeline }
    }

    /// Run a pipeline call on the blocking pool.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&CasePipeline) -> T + Send + 'static,
        T: Send + 'static,
    {
        let pipeline = self.pipeline.clone();
        tokio::task::spawn_blocking(move || f(pipeline.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(format!("Pipeline task failed: {e}")))
    }
}

/// Body of every text-carrying request. `texto` is accepted for older clients.
#[derive(Debug, Deserialize)]
pub struct CaseTextRequest {
    #[serde(default, alias = "texto")]
    pub text: String,
}

impl CaseTextRequest {
    /// The text, or a 400 when it is blank.
    pub fn into_text(self) -> Result<String, ApiError> {
        if self.text.trim().is_empty() {
            return Err(ApiError::BadRequest("Text is required".into()));
        }
        Ok(self.text)
    }
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: StructuredSummary,
    pub case: CaseRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_field_names() {
        let a: CaseTextRequest = serde_json::from_str(r#"{"text":"oi"}"#).unwrap();
        let b: CaseTextRequest = serde_json::from_str(r#"{"texto":"oi"}"#).unwrap();
        assert_eq!(a.text, "oi");
        assert_eq!(b.text, "oi");
    }

    #[test]
    fn missing_or_blank_text_is_rejected() {
        let missing: CaseTextRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(missing.into_text(), Err(ApiError::BadRequest(_))));
        let blank = CaseTextRequest { text: " \n".into() };
        assert!(blank.into_text().is_err());
    }
}
