//! Generation backend.
//!
//! Model selection is an ordered candidate list tried in sequence — the
//! first model that answers wins. No per-candidate retry and no timeout
//! imposed here; a hang blocks the request.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::PipelineError;
use crate::util::truncate_chars;

/// One instruction string in, one response string out. The response is
/// expected to contain JSON, possibly wrapped in formatting noise — all
/// enforcement happens downstream in recovery/validation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Model identifiers tried in order until one answers.
pub const MODEL_CANDIDATES: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ============================================================================
// API response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

// ============================================================================
// Gemini client
// ============================================================================

pub struct GeminiBackend {
    api_key: String,
    models: Vec<String>,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: String, models: Vec<String>) -> Self {
        GeminiBackend {
            api_key,
            models,
            client: reqwest::Client::new(),
        }
    }

    async fn call_model(&self, model: &str, prompt: &str) -> Result<String, String> {
        let url = format!(
            "{GENERATE_URL_BASE}/{model}:generateContent?key={}",
            self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("HTTP {status}: {}", truncate_chars(&body, 200)));
        }

        let decoded: GenerateResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(candidate_text(decoded))
    }
}

fn candidate_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let mut last_error = String::from("no model candidates configured");
        for model in &self.models {
            match self.call_model(model, prompt).await {
                Ok(text) => {
                    log::debug!("generation served by {model}");
                    return Ok(text);
                }
                Err(e) => {
                    log::warn!("model {model} failed: {e}");
                    last_error = format!("{model}: {e}");
                }
            }
        }
        Err(PipelineError::GenerationFailed(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_text_joins_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "{\"kind\": "},
                        {"text": "\"task\"}"}
                    ]
                }
            }]
        }"#;
        let decoded: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(candidate_text(decoded), "{\"kind\": \"task\"}");
    }

    #[test]
    fn test_candidate_text_tolerates_empty_response() {
        let decoded: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(candidate_text(decoded), "");

        let decoded: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{}]}"#).unwrap();
        assert_eq!(candidate_text(decoded), "");
    }
}
