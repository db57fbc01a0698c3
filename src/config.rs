//! Process configuration.
//!
//! Credentials are read once at the entry point and passed in explicitly —
//! no ambient environment lookups at call sites, so the pipeline runs
//! against injected fakes in tests.

use crate::error::PipelineError;
use crate::generate::MODEL_CANDIDATES;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub google_access_token: String,
    /// Model identifiers tried in order; first success wins.
    pub model_candidates: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the environment. A missing credential is
    /// fatal — the request must abort before any model call.
    pub fn from_env() -> Result<Self, PipelineError> {
        Ok(AppConfig {
            gemini_api_key: required_env("GEMINI_API_KEY")?,
            google_access_token: required_env("GOOGLE_ACCESS_TOKEN")?,
            model_candidates: MODEL_CANDIDATES.iter().map(|m| m.to_string()).collect(),
        })
    }
}

fn required_env(key: &str) -> Result<String, PipelineError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PipelineError::Configuration(format!("{key} is not set"))),
    }
}
