use serde::{Deserialize, Serialize};

use crate::models::{Module, Mood};

/// Fields derived from a marker-delimited model summary.
///
/// Every text field is present even when its marker was missing from the
/// model output; in that case it is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSummary {
    /// The model's answer, untouched.
    pub full_summary: String,
    pub problem: String,
    pub solution: String,
    pub upsell: String,
    pub prints: bool,
    pub mood: Mood,
    pub module: Module,
}

/// Which branch of the case pipeline produced a `TipResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipStatus {
    Success,
    NoHistory,
    NoSimilarity,
    Error,
}

/// Response value of one `process_case` run. Built once, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StructuredSummary>,
    pub problem_detected: Option<String>,
    pub module_detected: Option<String>,
    /// Historical cases found for the module search set.
    #[serde(rename = "SimilarTagsFound")]
    pub similar_tags_found: usize,
    pub solutions_analyzed: usize,
    pub tips: Vec<String>,
    pub status: TipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one model-backed stage, tagged with how it was obtained.
///
/// Every variant carries a usable value; the tag only records which
/// branch produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// Input was empty; no model call was made.
    Skipped(T),
    /// The model answered and its output was parsed.
    Parsed(T),
    /// The model answered but its output was unusable; a deterministic value was substituted.
    Fallback(T),
    /// The model call failed; the safe default was substituted.
    Failed(T),
}

impl<T> StageOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Skipped(v) | Self::Parsed(v) | Self::Fallback(v) | Self::Failed(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Skipped(v) | Self::Parsed(v) | Self::Fallback(v) | Self::Failed(v) => v,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Parsed(_) => "parsed",
            Self::Fallback(_) => "fallback",
            Self::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&TipStatus::NoSimilarity).unwrap(),
            "\"NO_SIMILARITY\""
        );
    }

    #[test]
    fn tip_result_uses_wire_field_names() {
        let result = TipResult {
            summary: None,
            problem_detected: Some("p".into()),
            module_detected: Some("ESTOQUE".into()),
            similar_tags_found: 5,
            solutions_analyzed: 0,
            tips: vec!["a".into()],
            status: TipStatus::NoSimilarity,
            error: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["SimilarTagsFound"], 5);
        assert_eq!(json["solutionsAnalyzed"], 0);
        assert_eq!(json["moduleDetected"], "ESTOQUE");
        assert!(json.get("summary").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn outcome_exposes_value_regardless_of_kind() {
        let outcome = StageOutcome::Fallback(vec![1, 2]);
        assert_eq!(outcome.kind(), "fallback");
        assert_eq!(outcome.value().len(), 2);
        assert_eq!(outcome.into_value(), vec![1, 2]);
    }
}
