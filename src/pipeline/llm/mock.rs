use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{GenerativeTextService, LlmError};

/// Scripted generative service for tests and offline runs.
///
/// `summarize` always returns the configured summary; `ask` pops scripted
/// answers in order and fails once the script is exhausted.
pub struct MockTextService {
    summary: Result<String, LlmError>,
    answers: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    ask_calls: AtomicUsize,
    summarize_calls: AtomicUsize,
}

impl MockTextService {
    pub fn new() -> Self {
        Self {
            summary: Err(LlmError::Unavailable("no summary scripted".into())),
            answers: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            ask_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Ok(summary.to_string());
        self
    }

    pub fn with_summary_error(mut self, err: LlmError) -> Self {
        self.summary = Err(err);
        self
    }

    /// Queue the next `ask` answer.
    pub fn then_answer(self, answer: &str) -> Self {
        self.push(Ok(answer.to_string()));
        self
    }

    /// Queue an `ask` failure.
    pub fn then_fail(self, err: LlmError) -> Self {
        self.push(Err(err));
        self
    }

    fn push(&self, entry: Result<String, LlmError>) {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(entry);
        }
    }

    pub fn ask_calls(&self) -> usize {
        self.ask_calls.load(Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::SeqCst)
    }

    /// Prompts received by `ask`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for MockTextService {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeTextService for MockTextService {
    fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        self.ask_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answers
            .lock()
            .map_err(|_| LlmError::Unavailable("mock lock poisoned".into()))?
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Unavailable("no answer scripted".into())))
    }

    fn summarize(&self, _transcript: &str) -> Result<String, LlmError> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        self.summary.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_returned_in_order() {
        let mock = MockTextService::new().then_answer("one").then_answer("two");
        assert_eq!(mock.ask("a").unwrap(), "one");
        assert_eq!(mock.ask("b").unwrap(), "two");
        assert_eq!(mock.ask_calls(), 2);
        assert_eq!(mock.prompts(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn exhausted_script_fails() {
        let mock = MockTextService::new();
        assert!(matches!(mock.ask("x"), Err(LlmError::Unavailable(_))));
    }

    #[test]
    fn scripted_failure_is_returned() {
        let mock = MockTextService::new().then_fail(LlmError::Timeout(5));
        assert_eq!(mock.ask("x"), Err(LlmError::Timeout(5)));
    }

    #[test]
    fn summary_is_counted() {
        let mock = MockTextService::new().with_summary("**MÓDULO:** ESTOQUE");
        assert_eq!(mock.summarize("t").unwrap(), "**MÓDULO:** ESTOQUE");
        assert_eq!(mock.summarize_calls(), 1);
    }
}
