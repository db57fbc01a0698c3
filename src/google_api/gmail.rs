//! Gmail API v1 — message send.
//!
//! The outgoing body always carries the canonical signature: the dispatcher
//! enforces it, and this module repeats the strip-then-append discipline as
//! a final safety net before the bytes leave the process. Sender display
//! name resolution also lives here — the verified name when on file, else
//! the local part of the address.

use base64::Engine;
use serde::Deserialize;

use super::{error_for_status, GoogleApiError};
use crate::signature;
use crate::types::{ActingIdentity, EmailAction};

const SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

#[derive(Debug, Deserialize)]
struct SentMessage {
    #[serde(default)]
    id: String,
}

/// Send a plain-text message as the acting user.
///
/// `recipient`, `subject`, and `body` are hard requirements, checked by the
/// dispatcher. Returns the sent message id as confirmation.
pub async fn send_message(
    access_token: &str,
    email: &EmailAction,
    sender: &ActingIdentity,
) -> Result<String, GoogleApiError> {
    let raw = encode_message(email, sender);

    let client = reqwest::Client::new();
    let resp = client
        .post(SEND_URL)
        .bearer_auth(access_token)
        .json(&serde_json::json!({ "raw": raw }))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(error_for_status(resp).await);
    }

    let sent: SentMessage = resp.json().await?;
    Ok(sent.id)
}

/// Build the RFC 2822 message and encode it as URL-safe base64, the Gmail
/// API wire format.
fn encode_message(email: &EmailAction, sender: &ActingIdentity) -> String {
    let sender_name = sender.display_name();
    let body = signature::enforce_signature(email.body.as_deref().unwrap_or_default(), &sender_name);

    let mime = format!(
        "From: {sender_name} <{sender_email}>\r\n\
         To: {recipient}\r\n\
         Subject: {subject}\r\n\
         Content-Type: text/plain; charset=\"UTF-8\"\r\n\
         \r\n\
         {body}",
        sender_email = sender.email,
        recipient = email.recipient.as_deref().unwrap_or_default(),
        subject = email.subject.as_deref().unwrap_or_default(),
    );

    base64::engine::general_purpose::URL_SAFE.encode(mime)
}
