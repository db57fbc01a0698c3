//! Google API collaborator clients.
//!
//! Direct HTTP via reqwest. Token acquisition and refresh happen upstream —
//! every call here takes a ready access token. Failures are surfaced to the
//! dispatcher as-is; this core does not retry.
//!
//! Modules:
//! - calendar: Google Calendar API v3, event creation
//! - tasks: Google Tasks API v1, task creation
//! - gmail: Gmail API v1, message send

pub mod calendar;
pub mod gmail;
pub mod tasks;

#[derive(Debug, thiserror::Error)]
pub enum GoogleApiError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token expired or revoked")]
    AuthExpired,
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map a non-success response to the collaborator error type.
pub(crate) async fn error_for_status(resp: reqwest::Response) -> GoogleApiError {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return GoogleApiError::AuthExpired;
    }
    let message = resp.text().await.unwrap_or_default();
    GoogleApiError::ApiError {
        status: status.as_u16(),
        message,
    }
}
