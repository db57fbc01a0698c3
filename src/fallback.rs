//! Keyword fallback classifier.
//!
//! Terminal error-absorbing stage: when the model pipeline cannot produce a
//! valid action, the caller still gets a structurally valid record guessed
//! from surface keywords. Calendar keywords outrank task keywords, which
//! outrank email keywords; no match yields an unknown record.

use crate::types::{CalendarAction, EmailAction, ParsedAction, TaskAction, UnknownAction};
use crate::util::truncate_chars;

const DEGRADED_NOTE: &str =
    "Degraded result: classified by keyword match because the model pipeline failed.";
const TITLE_MAX_CHARS: usize = 50;

const CALENDAR_KEYWORDS: &[&str] = &["meet", "schedule"];
const TASK_KEYWORDS: &[&str] = &["task", "todo"];
const EMAIL_KEYWORDS: &[&str] = &["email", "mail"];

/// Guess an action kind from the original command text. Never fails.
pub fn classify(text: &str) -> ParsedAction {
    let lowered = text.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));
    let title = Some(truncate_chars(text.trim(), TITLE_MAX_CHARS));
    let description = Some(DEGRADED_NOTE.to_string());

    if contains_any(CALENDAR_KEYWORDS) {
        ParsedAction::Calendar(CalendarAction {
            title,
            description,
            ..Default::default()
        })
    } else if contains_any(TASK_KEYWORDS) {
        ParsedAction::Task(TaskAction {
            title,
            description,
            ..Default::default()
        })
    } else if contains_any(EMAIL_KEYWORDS) {
        ParsedAction::Email(EmailAction {
            title,
            description,
            ..Default::default()
        })
    } else {
        ParsedAction::Unknown(UnknownAction { title, description })
    }
}
