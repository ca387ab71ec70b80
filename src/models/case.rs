use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Module, Mood};
use crate::pipeline::text::truncate_chars;

/// Column bounds for persisted case text, in characters.
pub const MAX_PROBLEM_CHARS: usize = 2000;
pub const MAX_SOLUTION_CHARS: usize = 5000;
pub const MAX_UPSELL_CHARS: usize = 3000;

/// One historical support interaction on file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: Uuid,
    pub problem: String,
    pub solution: String,
    pub upsell: String,
    pub prints: bool,
    pub mood: Mood,
    pub module: Module,
    pub created_at: DateTime<Utc>,
}

/// A case about to be persisted. The repository assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCaseRecord {
    pub problem: String,
    pub solution: String,
    pub upsell: String,
    pub prints: bool,
    pub mood: Mood,
    pub module: Module,
}

impl NewCaseRecord {
    /// Build a record with every text field clamped to its column bound.
    pub fn new(
        problem: &str,
        solution: &str,
        upsell: &str,
        prints: bool,
        mood: Mood,
        module: Module,
    ) -> Self {
        Self {
            problem: truncate_chars(problem, MAX_PROBLEM_CHARS).to_string(),
            solution: truncate_chars(solution, MAX_SOLUTION_CHARS).to_string(),
            upsell: truncate_chars(upsell, MAX_UPSELL_CHARS).to_string(),
            prints,
            mood,
            module,
        }
    }

    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> CaseRecord {
        CaseRecord {
            id,
            problem: self.problem,
            solution: self.solution,
            upsell: self.upsell,
            prints: self.prints,
            mood: self.mood,
            module: self.module,
            created_at,
        }
    }
}
