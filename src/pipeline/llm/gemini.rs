use serde::{Deserialize, Serialize};

use super::{GenerativeTextService, LlmError};
use crate::config::GeminiSettings;
use crate::pipeline::summary::prompt::build_summary_prompt;

/// Sampling temperature for transcript summaries.
const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Output budget for transcript summaries.
const SUMMARY_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Gemini `generateContent` HTTP client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            client,
            timeout_secs: settings.timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn generate(
        &self,
        prompt: &str,
        config: Option<GenerationConfig>,
    ) -> Result<GenerateResponse, LlmError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    // reqwest errors carry the URL, which carries the key
                    LlmError::HttpClient(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| LlmError::MalformedResponse(e.without_url().to_string()))
    }
}

/// Request body for `generateContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Response body from `generateContent`.
#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

/// Text of the first part of the first candidate.
fn first_candidate_text(response: &GenerateResponse) -> Result<String, LlmError> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.clone())
        .ok_or_else(|| LlmError::MalformedResponse("No candidate text in response".into()))
}

/// Stricter extraction for summaries: a cut-off or blank answer is an error.
fn complete_candidate_text(response: &GenerateResponse) -> Result<String, LlmError> {
    let truncated = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
        .is_some_and(|r| r.eq_ignore_ascii_case("MAX_TOKENS"));
    if truncated {
        return Err(LlmError::Truncated);
    }

    let text = first_candidate_text(response)?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

impl GenerativeTextService for GeminiClient {
    fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.generate(prompt, None)?;
        first_candidate_text(&response)
    }

    fn summarize(&self, transcript: &str) -> Result<String, LlmError> {
        let prompt = build_summary_prompt(transcript);
        let response = self.generate(
            &prompt,
            Some(GenerationConfig {
                temperature: SUMMARY_TEMPERATURE,
                max_output_tokens: SUMMARY_MAX_OUTPUT_TOKENS,
            }),
        )?;
        complete_candidate_text(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> GeminiSettings {
        GeminiSettings {
            api_key: "test-key".into(),
            model: "gemini-2.5-flash-lite".into(),
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = GeminiClient::new(&settings("https://example.test/v1/")).unwrap();
        assert_eq!(client.base_url, "https://example.test/v1");
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[test]
    fn request_body_matches_wire_format() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "olá" }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: SUMMARY_TEMPERATURE,
                max_output_tokens: SUMMARY_MAX_OUTPUT_TOKENS,
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "olá");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn ask_body_omits_generation_config() {
        let body = GenerateRequest {
            contents: vec![],
            generation_config: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"a1, b2"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(first_candidate_text(&response).unwrap(), "a1, b2");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let response = parse(r#"{"promptFeedback":{}}"#);
        assert!(matches!(
            first_candidate_text(&response),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn max_tokens_finish_is_truncated_for_summaries() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"**PROBLEMA"}]},"finishReason":"MAX_TOKENS"}]}"#,
        );
        assert_eq!(complete_candidate_text(&response), Err(LlmError::Truncated));
        // ask() does not care about the finish reason
        assert!(first_candidate_text(&response).is_ok());
    }

    #[test]
    fn blank_summary_is_empty_response() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#);
        assert_eq!(complete_candidate_text(&response), Err(LlmError::EmptyResponse));
    }

    #[test]
    fn unreachable_host_maps_to_connection_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = GeminiClient::new(&settings("http://127.0.0.1:9/v1")).unwrap();
        let err = client.ask("ping").unwrap_err();
        assert!(matches!(
            err,
            LlmError::Connection(_) | LlmError::HttpClient(_) | LlmError::Timeout(_)
        ));
    }
}
