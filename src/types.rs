//! Action records and request/response types.
//!
//! Model output decodes into the closed `ParsedAction` union at the
//! validation boundary; everything downstream matches on it exhaustively
//! instead of poking at untyped JSON.

use serde::{Deserialize, Serialize};

/// Externally verified identity of the user issuing the command.
///
/// Never populated from model output — the model is free to invent names,
/// and outgoing email must carry the real one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActingIdentity {
    pub name: Option<String>,
    pub email: String,
}

impl ActingIdentity {
    /// Display name used in outgoing email: the verified name when on file,
    /// otherwise derived from the local part of the address.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => crate::util::name_from_email(&self.email),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// ISO date (YYYY-MM-DD) after normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// 24h HH:MM. Absent means an all-day event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Diagnostics only; set by the fallback path, not by the model schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// low | medium | high. Advisory — the task collaborator does not carry
    /// it on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAction {
    /// Diagnostics only; set by the fallback path, not by the model schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The closed set of action categories, discriminated by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedAction {
    Calendar(CalendarAction),
    Task(TaskAction),
    Email(EmailAction),
    Unknown(UnknownAction),
}

impl ParsedAction {
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedAction::Calendar(_) => "calendar",
            ParsedAction::Task(_) => "task",
            ParsedAction::Email(_) => "email",
            ParsedAction::Unknown(_) => "unknown",
        }
    }
}

/// One model response, normalized to an ordered action list.
///
/// The wire form is either a single action object or `{"actions": [...]}`;
/// an envelope carrying `actions` never also carries a top-level `kind`
/// (when a model emits both anyway, the batch wins).
#[derive(Debug)]
pub struct ActionEnvelope {
    pub actions: Vec<ParsedAction>,
}

/// Per-action dispatch result. A failure here never halts the remaining
/// actions of the same envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub kind: &'static str,
    pub success: bool,
    pub message: String,
}

/// Caller-facing response for one command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<DispatchOutcome>,
}
