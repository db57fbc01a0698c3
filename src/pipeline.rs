//! End-to-end command pipeline.
//!
//! prompt → generate → recover → validate → resolve dates → dispatch.
//! Everything up through validation is absorbed by the fallback classifier,
//! so the caller always receives at least one structurally valid action
//! record; dispatch results are reported per action so a multi-action
//! envelope can partially succeed.

use crate::dates::{self, TemporalAnchor};
use crate::dispatch::{self, Collaborators};
use crate::fallback;
use crate::generate::GenerationBackend;
use crate::prompt;
use crate::recover;
use crate::types::{ActingIdentity, ActionEnvelope, CommandResponse, ParsedAction};
use crate::validate;

/// Interpret a command into at least one structurally valid action.
///
/// Never fails: a model-pipeline error degrades to the keyword classifier.
pub async fn interpret_command(
    text: &str,
    identity: &ActingIdentity,
    anchor: &TemporalAnchor,
    backend: &dyn GenerationBackend,
) -> ActionEnvelope {
    let instruction = prompt::build_interpreter_prompt(text, &identity.display_name(), anchor);

    let interpreted = match backend.generate(&instruction).await {
        Ok(raw) => recover::recover_json(&raw).and_then(validate::validate_envelope),
        Err(e) => Err(e),
    };

    let mut envelope = interpreted.unwrap_or_else(|e| {
        debug_assert!(e.is_recovered_by_fallback());
        log::warn!("interpretation failed ({e}); using keyword fallback");
        ActionEnvelope {
            actions: vec![fallback::classify(text)],
        }
    });

    for action in &mut envelope.actions {
        normalize_dates(action, anchor);
    }
    envelope
}

/// Apply the date resolver to every date-bearing field, each against the
/// same per-request anchor.
fn normalize_dates(action: &mut ParsedAction, anchor: &TemporalAnchor) {
    match action {
        ParsedAction::Calendar(event) => {
            event.date = event
                .date
                .as_deref()
                .and_then(|d| dates::resolve_date(d, anchor));
        }
        ParsedAction::Task(task) => {
            task.due_date = task
                .due_date
                .as_deref()
                .and_then(|d| dates::resolve_due_date(d, anchor))
                .map(|d| d.format("%Y-%m-%d").to_string());
        }
        ParsedAction::Email(_) | ParsedAction::Unknown(_) => {}
    }
}

/// Run one command end to end against a fresh anchor.
pub async fn handle_command(
    text: &str,
    identity: &ActingIdentity,
    backend: &dyn GenerationBackend,
    collaborators: &Collaborators<'_>,
) -> CommandResponse {
    let anchor = TemporalAnchor::now();
    run_with_anchor(text, identity, &anchor, backend, collaborators).await
}

/// Anchor-injected variant for tests and callers that already hold a
/// request anchor.
pub async fn run_with_anchor(
    text: &str,
    identity: &ActingIdentity,
    anchor: &TemporalAnchor,
    backend: &dyn GenerationBackend,
    collaborators: &Collaborators<'_>,
) -> CommandResponse {
    let envelope = interpret_command(text, identity, anchor, backend).await;
    let results = dispatch::dispatch_actions(&envelope.actions, identity, anchor, collaborators).await;

    let succeeded = results.iter().filter(|r| r.success).count();
    let success = !results.is_empty() && succeeded == results.len();
    let message = if results.len() == 1 {
        results[0].message.clone()
    } else {
        format!("{succeeded} of {} actions dispatched", results.len())
    };

    CommandResponse {
        success,
        message,
        results,
    }
}
