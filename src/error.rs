//! Pipeline error taxonomy.
//!
//! Errors are classified by where they stop the request:
//! - Configuration: fatal, aborts before any model call
//! - Interpretation (empty/malformed/generation/unrecognized): absorbed by
//!   the fallback classifier, never surfaced raw to the caller
//! - Validation/Dispatch: reported per action so a multi-action request can
//!   partially succeed

use thiserror::Error;

use crate::google_api::GoogleApiError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Generation backend returned an empty response")]
    EmptyResponse,

    #[error("Generation backend call failed: {0}")]
    GenerationFailed(String),

    #[error("Could not decode JSON from model response: {snippet}")]
    MalformedResponse { snippet: String },

    #[error("Decoded response carries no recognizable action")]
    UnrecognizedIntent,

    #[error("{kind} action is missing required field '{field}'")]
    Validation {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] GoogleApiError),
}

impl PipelineError {
    /// True for failures the fallback classifier absorbs. The caller then
    /// receives a structurally valid action record instead of this error.
    ///
    /// Validation and dispatch failures are never absorbed: the intent was
    /// understood, so they are reported against the individual action.
    pub fn is_recovered_by_fallback(&self) -> bool {
        matches!(
            self,
            PipelineError::EmptyResponse
                | PipelineError::GenerationFailed(_)
                | PipelineError::MalformedResponse { .. }
                | PipelineError::UnrecognizedIntent
        )
    }
}
