use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::prompt::build_tips_prompt;
use crate::pipeline::llm::GenerativeTextService;
use crate::pipeline::text::ellipsize;
use crate::pipeline::types::StageOutcome;

/// Sole tip when there are no solutions to work from.
pub const NO_SOLUTIONS_TIP: &str = "Não foram encontradas soluções históricas para análise.";

/// First line of the deterministic fallback list.
pub const FALLBACK_HEADER: &str = "**Análise de Soluções Históricas:**";

/// First line of the list returned when the model call fails.
pub const SYNTHESIS_ERROR_TIP: &str = "Erro ao processar dicas automaticamente.";

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipConfig {
    /// Solutions quoted in the prompt; the rest are only counted.
    pub max_solutions_in_prompt: usize,
    /// Characters of each quoted solution.
    pub solution_chars: usize,
    /// Solutions listed when the model answer has no bullets.
    pub fallback_entries: usize,
    /// Characters of each fallback entry.
    pub fallback_chars: usize,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            max_solutions_in_prompt: 10,
            solution_chars: 300,
            fallback_entries: 3,
            fallback_chars: 200,
        }
    }
}

/// Keep the lines of a model answer that look like list items.
///
/// Accepts `•`, `-` or `*` bullets followed by text, with or without a
/// space, and numbered items like `1.` or `2)`. Horizontal rules and
/// Markdown bold headings are not bullets.
pub fn parse_tips(answer: &str) -> Vec<String> {
    answer
        .lines()
        .map(str::trim)
        .filter(|line| is_list_item(line))
        .map(str::to_string)
        .collect()
}

fn is_list_item(line: &str) -> bool {
    if let Some(rest) = line.strip_prefix('•') {
        return !rest.trim().is_empty();
    }
    if line.starts_with("**") {
        return false;
    }
    for bullet in ['-', '*'] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.chars().any(|c| c != bullet && !c.is_whitespace());
        }
    }
    NUMBERED_ITEM.is_match(line)
        && line
            .split_once(char::is_whitespace)
            .is_some_and(|(_, rest)| !rest.trim().is_empty())
}

/// Header plus the first few solutions, numbered and shortened.
pub fn fallback_tips(solutions: &[String], entries: usize, max_chars: usize) -> Vec<String> {
    let mut tips = Vec::with_capacity(entries + 1);
    tips.push(FALLBACK_HEADER.to_string());
    tips.extend(
        solutions
            .iter()
            .take(entries)
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, ellipsize(s.trim(), max_chars))),
    );
    tips
}

/// Two-line list reported when the model could not be reached.
pub fn synthesis_error_tips(solution_count: usize) -> Vec<String> {
    vec![
        SYNTHESIS_ERROR_TIP.to_string(),
        format!("Soluções encontradas no histórico: {solution_count}"),
    ]
}

/// Turns the solutions of similar cases into a short list of practical tips.
///
/// Always yields at least one line.
pub struct TipSynthesizer {
    llm: Arc<dyn GenerativeTextService>,
    config: TipConfig,
}

impl TipSynthesizer {
    pub fn new(llm: Arc<dyn GenerativeTextService>) -> Self {
        Self::with_config(llm, TipConfig::default())
    }

    pub fn with_config(llm: Arc<dyn GenerativeTextService>, config: TipConfig) -> Self {
        Self { llm, config }
    }

    pub fn synthesize_tips(&self, solutions: &[String], problem: &str) -> Vec<String> {
        self.synthesize_tips_outcome(solutions, problem).into_value()
    }

    pub fn synthesize_tips_outcome(
        &self,
        solutions: &[String],
        problem: &str,
    ) -> StageOutcome<Vec<String>> {
        let usable: Vec<String> = solutions
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();
        if usable.is_empty() {
            return StageOutcome::Skipped(vec![NO_SOLUTIONS_TIP.to_string()]);
        }

        let prompt = build_tips_prompt(
            &usable,
            problem,
            self.config.max_solutions_in_prompt,
            self.config.solution_chars,
        );

        match self.llm.ask(&prompt) {
            Ok(answer) => {
                let tips = parse_tips(&answer);
                if tips.is_empty() {
                    tracing::info!(
                        solutions = usable.len(),
                        "Tip answer had no list items, listing solutions instead"
                    );
                    StageOutcome::Fallback(fallback_tips(
                        &usable,
                        self.config.fallback_entries,
                        self.config.fallback_chars,
                    ))
                } else {
                    StageOutcome::Parsed(tips)
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, solutions = usable.len(), "Tip synthesis failed");
                StageOutcome::Failed(synthesis_error_tips(usable.len()))
            }
        }
    }
}
