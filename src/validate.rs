//! Decoded-structure validation.
//!
//! The recovery layer produces untyped JSON; this is the boundary where it
//! becomes the closed `ParsedAction` union. Kind matching is
//! case-insensitive and accepts the legacy `action` field name. Field-level
//! requirements are deliberately not checked here — dispatch re-validates
//! what each collaborator hard-requires, immediately before the call.

use serde_json::Value;

use crate::error::PipelineError;
use crate::types::{ActionEnvelope, ParsedAction, UnknownAction};
use crate::util::truncate_chars;

const KNOWN_KINDS: &[&str] = &["calendar", "task", "email", "unknown"];

/// Validate a decoded response into an ordered action list.
///
/// The structure must carry either a `kind`/`action` field from the closed
/// set or a non-empty `actions` array; absence of both is
/// `UnrecognizedIntent`.
pub fn validate_envelope(value: Value) -> Result<ActionEnvelope, PipelineError> {
    if let Some(items) = value.get("actions").and_then(Value::as_array) {
        if !items.is_empty() {
            if value.get("kind").is_some() || value.get("action").is_some() {
                log::warn!("envelope carries both 'actions' and a top-level kind; using 'actions'");
            }
            let actions = items.iter().map(element_action).collect();
            return Ok(ActionEnvelope { actions });
        }
    }

    let action = parse_action(&value)?;
    Ok(ActionEnvelope {
        actions: vec![action],
    })
}

/// Batch elements degrade to `unknown` records instead of failing their
/// siblings — each element of an envelope is validated independently.
fn element_action(value: &Value) -> ParsedAction {
    parse_action(value).unwrap_or_else(|_| {
        ParsedAction::Unknown(UnknownAction {
            title: value
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
            description: Some(format!(
                "Unrecognized batch element: {}",
                truncate_chars(&value.to_string(), 120)
            )),
        })
    })
}

fn parse_action(value: &Value) -> Result<ParsedAction, PipelineError> {
    let kind = value
        .get("kind")
        .or_else(|| value.get("action"))
        .and_then(Value::as_str)
        .map(|k| k.trim().to_ascii_lowercase())
        .ok_or(PipelineError::UnrecognizedIntent)?;

    if !KNOWN_KINDS.contains(&kind.as_str()) {
        return Err(PipelineError::UnrecognizedIntent);
    }

    // Normalize the discriminant, then let serde build the variant.
    let mut normalized = value.clone();
    if let Value::Object(ref mut map) = normalized {
        map.remove("action");
        map.insert("kind".to_string(), Value::String(kind));
    }
    serde_json::from_value(normalized).map_err(|e| {
        log::debug!("action deserialization failed: {e}");
        PipelineError::UnrecognizedIntent
    })
}
