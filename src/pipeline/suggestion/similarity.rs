use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use uuid::Uuid;

use super::prompt::build_similarity_prompt;
use crate::models::CaseRecord;
use crate::pipeline::llm::GenerativeTextService;
use crate::pipeline::types::StageOutcome;

/// Canonical 8-4-4-4-12 hex identifier.
static UUID_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .unwrap()
});

static TOKEN_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;\s]+").unwrap());

/// Whole-answer values meaning "nothing is similar", compared lower-cased.
/// A blank answer means the same.
const NONE_SENTINELS: &[&str] = &["nenhum", "nenhuma", "none", "0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityConfig {
    /// Candidates past this many are never shown to the model.
    pub max_candidates: usize,
    /// Most ids kept from one answer.
    pub max_selected: usize,
    /// Characters of each candidate problem quoted in the prompt.
    pub problem_chars: usize,
    /// Characters of each candidate solution quoted, if any.
    pub solution_chars: Option<usize>,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            max_candidates: 50,
            max_selected: 5,
            problem_chars: 150,
            solution_chars: None,
        }
    }
}

/// What a similarity answer said, before matching against candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimilarityAnswer {
    /// The model answered with a "none" sentinel.
    NoneSimilar,
    /// Well-formed ids, deduplicated, in answer order, capped.
    Ids(Vec<Uuid>),
    /// Nothing in the answer looked like an id.
    Unparseable,
}

/// Parse a similarity answer into candidate ids.
///
/// Tokens are split on commas, semicolons and whitespace, stripped of
/// surrounding punctuation, and must be full UUIDs. Anything else is
/// dropped; a partially valid answer keeps its valid ids.
pub fn parse_similar_ids(answer: &str, max_selected: usize) -> SimilarityAnswer {
    let normalized = answer
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if normalized.is_empty() || NONE_SENTINELS.contains(&normalized.as_str()) {
        return SimilarityAnswer::NoneSimilar;
    }

    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = TOKEN_SEPARATORS
        .split(answer)
        .map(strip_id_label)
        .map(|token| token.trim_matches(|c: char| !c.is_ascii_hexdigit()))
        .filter(|token| UUID_TOKEN.is_match(token))
        .filter_map(|token| Uuid::parse_str(token).ok())
        .filter(|id| seen.insert(*id))
        .take(max_selected)
        .collect();

    if ids.is_empty() {
        SimilarityAnswer::Unparseable
    } else {
        SimilarityAnswer::Ids(ids)
    }
}

/// Drop a leading `ID:` label, echoed from the prompt's row format.
fn strip_id_label(token: &str) -> &str {
    let token = token.trim_start_matches(|c: char| !c.is_alphanumeric());
    match token.get(..3) {
        Some(label) if label.eq_ignore_ascii_case("id:") => &token[3..],
        _ => token,
    }
}

/// Asks the model which historical cases match the current problem.
///
/// Fails closed: any model failure or unusable answer selects nothing.
pub struct SimilarityFilter {
    llm: Arc<dyn GenerativeTextService>,
    config: SimilarityConfig,
}

impl SimilarityFilter {
    pub fn new(llm: Arc<dyn GenerativeTextService>) -> Self {
        Self::with_config(llm, SimilarityConfig::default())
    }

    pub fn with_config(llm: Arc<dyn GenerativeTextService>, config: SimilarityConfig) -> Self {
        Self { llm, config }
    }

    /// Candidates judged similar to `problem`, in candidate order.
    pub fn filter_similar(&self, candidates: &[CaseRecord], problem: &str) -> Vec<CaseRecord> {
        self.filter_similar_outcome(candidates, problem).into_value()
    }

    /// Same as [`filter_similar`](Self::filter_similar), tagged with the
    /// branch that produced the selection.
    pub fn filter_similar_outcome(
        &self,
        candidates: &[CaseRecord],
        problem: &str,
    ) -> StageOutcome<Vec<CaseRecord>> {
        if candidates.is_empty() || problem.trim().is_empty() {
            return StageOutcome::Skipped(Vec::new());
        }

        let shown = &candidates[..candidates.len().min(self.config.max_candidates)];
        if shown.len() < candidates.len() {
            tracing::debug!(
                total = candidates.len(),
                shown = shown.len(),
                "Similarity candidates capped"
            );
        }

        let prompt = build_similarity_prompt(
            shown,
            problem,
            self.config.problem_chars,
            self.config.solution_chars,
            self.config.max_selected,
        );

        let answer = match self.llm.ask(&prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, candidates = shown.len(), "Similarity judge failed, selecting none");
                return StageOutcome::Failed(Vec::new());
            }
        };

        match parse_similar_ids(&answer, self.config.max_selected) {
            SimilarityAnswer::NoneSimilar => StageOutcome::Parsed(Vec::new()),
            SimilarityAnswer::Unparseable => {
                tracing::warn!(answer_len = answer.len(), "Similarity answer had no usable ids");
                StageOutcome::Fallback(Vec::new())
            }
            SimilarityAnswer::Ids(ids) => {
                let chosen: HashSet<Uuid> = ids.into_iter().collect();
                let selected: Vec<CaseRecord> = shown
                    .iter()
                    .filter(|c| chosen.contains(&c.id))
                    .cloned()
                    .collect();
                if selected.len() < chosen.len() {
                    tracing::debug!(
                        returned = chosen.len(),
                        kept = selected.len(),
                        "Similarity answer named ids outside the candidate set"
                    );
                }
                StageOutcome::Parsed(selected)
            }
        }
    }
}
