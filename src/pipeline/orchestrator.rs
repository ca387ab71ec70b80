use std::sync::Arc;

use super::llm::GenerativeTextService;
use super::suggestion::{SimilarityFilter, TipSynthesizer};
use super::summary::extract_summary;
use super::types::{StructuredSummary, TipResult, TipStatus};
use super::PipelineError;
use crate::db::CaseRepository;
use crate::models::{CaseRecord, Module, NewCaseRecord};

const NO_HISTORY_TIPS: [&str; 3] = [
    "Não foram encontrados chamados históricos relacionados a este módulo.",
    "O problema foi analisado e categorizado automaticamente.",
    SEE_SUMMARY_TIP,
];

const NO_SIMILARITY_TIP: &str = "O problema parece ser específico ou com características únicas.";

const SEE_SUMMARY_TIP: &str =
    "Consulte a solução apresentada no resumo para verificar os passos recomendados.";

const ERROR_TIP: &str = "Não foi possível processar as dicas no momento.";

/// Runs a support transcript through summary, history lookup, similarity
/// filtering and tip synthesis:
/// summarize → {module, GENERIC} lookup → filter → tips → TipResult
pub struct CasePipeline {
    llm: Arc<dyn GenerativeTextService>,
    repo: Arc<dyn CaseRepository>,
    similarity: SimilarityFilter,
    tips: TipSynthesizer,
}

impl CasePipeline {
    pub fn new(llm: Arc<dyn GenerativeTextService>, repo: Arc<dyn CaseRepository>) -> Self {
        Self {
            similarity: SimilarityFilter::new(llm.clone()),
            tips: TipSynthesizer::new(llm.clone()),
            llm,
            repo,
        }
    }

    /// Replace the default stage settings.
    pub fn with_stages(mut self, similarity: SimilarityFilter, tips: TipSynthesizer) -> Self {
        self.similarity = similarity;
        self.tips = tips;
        self
    }

    /// Full pipeline. Never fails: any error becomes an ERROR result.
    pub fn process_case(&self, transcript: &str) -> TipResult {
        let span = tracing::info_span!("process_case", transcript_len = transcript.len());
        let _enter = span.enter();

        match self.run(transcript) {
            Ok(result) => {
                tracing::info!(
                    status = ?result.status,
                    found = result.similar_tags_found,
                    analyzed = result.solutions_analyzed,
                    tips = result.tips.len(),
                    "Case processed"
                );
                result
            }
            Err(e) => {
                tracing::error!(error = %e, "Case pipeline failed");
                error_result(&e)
            }
        }
    }

    fn run(&self, transcript: &str) -> Result<TipResult, PipelineError> {
        let summary = self.summarize_only(transcript)?;

        let modules = search_set(summary.module);
        let candidates = self.repo.find_by_module_in(&modules)?;
        tracing::debug!(modules = ?modules, candidates = candidates.len(), "History lookup");

        if candidates.is_empty() {
            return Ok(no_history_result(summary));
        }

        let similar = self
            .similarity
            .filter_similar_outcome(&candidates, &summary.problem);
        tracing::debug!(outcome = similar.kind(), selected = similar.value().len(), "Similarity filter");
        let similar = similar.into_value();

        if similar.is_empty() {
            return Ok(no_similarity_result(summary, candidates.len()));
        }

        let solutions: Vec<String> = similar
            .iter()
            .map(|c| c.solution.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let tips = self
            .tips
            .synthesize_tips_outcome(&solutions, &summary.problem);
        tracing::debug!(outcome = tips.kind(), tips = tips.value().len(), "Tip synthesis");

        Ok(TipResult {
            problem_detected: Some(summary.problem.clone()),
            module_detected: Some(summary.module.as_str().to_string()),
            similar_tags_found: candidates.len(),
            solutions_analyzed: solutions.len(),
            tips: tips.into_value(),
            status: TipStatus::Success,
            error: None,
            summary: Some(summary),
        })
    }

    /// Summarize a transcript without looking up history or persisting.
    pub fn summarize_only(&self, transcript: &str) -> Result<StructuredSummary, PipelineError> {
        if transcript.trim().is_empty() {
            return Err(PipelineError::InputEmpty);
        }
        let raw = self.llm.summarize(transcript)?;
        Ok(extract_summary(&raw))
    }

    /// Persist the fields of an already generated summary as a new case.
    pub fn save_summary(&self, summary_text: &str) -> Result<CaseRecord, PipelineError> {
        if summary_text.trim().is_empty() {
            return Err(PipelineError::InputEmpty);
        }
        let summary = extract_summary(summary_text);
        self.persist(&summary)
    }

    /// Summarize a transcript and store the result.
    pub fn summarize_and_save(
        &self,
        transcript: &str,
    ) -> Result<(StructuredSummary, CaseRecord), PipelineError> {
        let summary = self.summarize_only(transcript)?;
        let record = self.persist(&summary)?;
        Ok((summary, record))
    }

    fn persist(&self, summary: &StructuredSummary) -> Result<CaseRecord, PipelineError> {
        let record = self.repo.save(NewCaseRecord::new(
            &summary.problem,
            &summary.solution,
            &summary.upsell,
            summary.prints,
            summary.mood,
            summary.module,
        ))?;
        tracing::info!(case_id = %record.id, module = %record.module, "Summary stored");
        Ok(record)
    }
}

/// Detected module plus GENERIC, without duplicates.
fn search_set(detected: Module) -> Vec<Module> {
    if detected == Module::Generic {
        vec![Module::Generic]
    } else {
        vec![detected, Module::Generic]
    }
}

fn no_history_result(summary: StructuredSummary) -> TipResult {
    TipResult {
        problem_detected: Some(summary.problem.clone()),
        module_detected: Some(summary.module.as_str().to_string()),
        similar_tags_found: 0,
        solutions_analyzed: 0,
        tips: NO_HISTORY_TIPS.iter().map(|t| t.to_string()).collect(),
        status: TipStatus::NoHistory,
        error: None,
        summary: Some(summary),
    }
}

fn no_similarity_result(summary: StructuredSummary, found: usize) -> TipResult {
    TipResult {
        problem_detected: Some(summary.problem.clone()),
        module_detected: Some(summary.module.as_str().to_string()),
        similar_tags_found: found,
        solutions_analyzed: 0,
        tips: vec![
            format!("Foram encontrados {found} chamados no módulo, mas nenhum com problema similar."),
            NO_SIMILARITY_TIP.to_string(),
            SEE_SUMMARY_TIP.to_string(),
        ],
        status: TipStatus::NoSimilarity,
        error: None,
        summary: Some(summary),
    }
}

fn error_result(error: &PipelineError) -> TipResult {
    TipResult {
        summary: None,
        problem_detected: None,
        module_detected: None,
        similar_tags_found: 0,
        solutions_analyzed: 0,
        tips: vec![ERROR_TIP.to_string()],
        status: TipStatus::Error,
        error: Some(public_error_message(error).to_string()),
    }
}

/// Caller-facing reason for an ERROR result. Storage and upstream details
/// stay in the logs.
fn public_error_message(error: &PipelineError) -> &'static str {
    match error {
        PipelineError::InputEmpty => "Transcript is empty",
        PipelineError::Llm(_) => "Generative model unavailable",
        PipelineError::Database(_) => "Case history unavailable",
    }
}
