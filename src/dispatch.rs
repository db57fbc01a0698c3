//! Action routing.
//!
//! One collaborator per action kind, behind dyn-compatible traits so tests
//! inject fakes. Required-field checks happen here, immediately before the
//! external call: missing content is a per-action failure (the intent was
//! understood), never a trigger for the fallback classifier. A collaborator
//! failure is reported the same way and never halts the remaining actions.

use async_trait::async_trait;

use crate::dates::TemporalAnchor;
use crate::error::PipelineError;
use crate::google_api::{self, GoogleApiError};
use crate::signature;
use crate::types::{
    ActingIdentity, CalendarAction, DispatchOutcome, EmailAction, ParsedAction, TaskAction,
};

// ============================================================================
// Collaborator traits
// ============================================================================

#[async_trait]
pub trait CalendarCollaborator: Send + Sync {
    async fn create_event(&self, event: &CalendarAction) -> Result<String, GoogleApiError>;
}

#[async_trait]
pub trait TaskCollaborator: Send + Sync {
    async fn create_task(
        &self,
        task: &TaskAction,
        anchor: &TemporalAnchor,
    ) -> Result<String, GoogleApiError>;
}

#[async_trait]
pub trait MailCollaborator: Send + Sync {
    async fn send_email(
        &self,
        email: &EmailAction,
        sender: &ActingIdentity,
    ) -> Result<String, GoogleApiError>;
}

/// The three collaborators a dispatch run needs.
pub struct Collaborators<'a> {
    pub calendar: &'a dyn CalendarCollaborator,
    pub tasks: &'a dyn TaskCollaborator,
    pub mail: &'a dyn MailCollaborator,
}

/// Google-backed collaborators sharing one access token.
pub struct GoogleCollaborators {
    pub access_token: String,
}

#[async_trait]
impl CalendarCollaborator for GoogleCollaborators {
    async fn create_event(&self, event: &CalendarAction) -> Result<String, GoogleApiError> {
        google_api::calendar::insert_event(&self.access_token, event).await
    }
}

#[async_trait]
impl TaskCollaborator for GoogleCollaborators {
    async fn create_task(
        &self,
        task: &TaskAction,
        anchor: &TemporalAnchor,
    ) -> Result<String, GoogleApiError> {
        google_api::tasks::insert_task(&self.access_token, task, anchor).await
    }
}

#[async_trait]
impl MailCollaborator for GoogleCollaborators {
    async fn send_email(
        &self,
        email: &EmailAction,
        sender: &ActingIdentity,
    ) -> Result<String, GoogleApiError> {
        google_api::gmail::send_message(&self.access_token, email, sender).await
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Dispatch each action in its original order, collecting one outcome per
/// action. A failure never short-circuits the rest of the envelope.
pub async fn dispatch_actions(
    actions: &[ParsedAction],
    identity: &ActingIdentity,
    anchor: &TemporalAnchor,
    collaborators: &Collaborators<'_>,
) -> Vec<DispatchOutcome> {
    let mut outcomes = Vec::with_capacity(actions.len());
    for action in actions {
        outcomes.push(dispatch_one(action, identity, anchor, collaborators).await);
    }
    outcomes
}

async fn dispatch_one(
    action: &ParsedAction,
    identity: &ActingIdentity,
    anchor: &TemporalAnchor,
    collaborators: &Collaborators<'_>,
) -> DispatchOutcome {
    let kind = action.kind();
    match action {
        ParsedAction::Calendar(event) => match dispatch_calendar(event, collaborators).await {
            Ok(link) => ok(kind, format!("Event created: {link}")),
            Err(e) => failed(kind, e),
        },
        ParsedAction::Task(task) => match dispatch_task(task, anchor, collaborators).await {
            Ok(id) => ok(kind, format!("Task created: {id}")),
            Err(e) => failed(kind, e),
        },
        ParsedAction::Email(email) => {
            match dispatch_email(email, identity, collaborators).await {
                Ok(id) => ok(kind, format!("Email sent: {id}")),
                Err(e) => failed(kind, e),
            }
        }
        ParsedAction::Unknown(record) => {
            let detail = record
                .description
                .as_deref()
                .or(record.title.as_deref())
                .unwrap_or("no recognizable intent");
            DispatchOutcome {
                kind,
                success: false,
                message: format!("Nothing to dispatch: {detail}"),
            }
        }
    }
}

async fn dispatch_calendar(
    event: &CalendarAction,
    collaborators: &Collaborators<'_>,
) -> Result<String, PipelineError> {
    require(&event.title, "calendar", "title")?;
    require(&event.date, "calendar", "date")?;
    Ok(collaborators.calendar.create_event(event).await?)
}

async fn dispatch_task(
    task: &TaskAction,
    anchor: &TemporalAnchor,
    collaborators: &Collaborators<'_>,
) -> Result<String, PipelineError> {
    require(&task.title, "task", "title")?;
    Ok(collaborators.tasks.create_task(task, anchor).await?)
}

async fn dispatch_email(
    email: &EmailAction,
    identity: &ActingIdentity,
    collaborators: &Collaborators<'_>,
) -> Result<String, PipelineError> {
    require(&email.recipient, "email", "recipient")?;
    require(&email.subject, "email", "subject")?;
    let body = require(&email.body, "email", "body")?;

    let mut enforced = email.clone();
    enforced.body = Some(signature::enforce_signature(body, &identity.display_name()));
    Ok(collaborators.mail.send_email(&enforced, identity).await?)
}

/// Presence check for a field the collaborator hard-requires. Whitespace-only
/// values count as missing.
fn require<'a>(
    field: &'a Option<String>,
    kind: &'static str,
    name: &'static str,
) -> Result<&'a str, PipelineError> {
    match field.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PipelineError::Validation { kind, field: name }),
    }
}

fn ok(kind: &'static str, message: String) -> DispatchOutcome {
    DispatchOutcome {
        kind,
        success: true,
        message,
    }
}

fn failed(kind: &'static str, error: PipelineError) -> DispatchOutcome {
    log::warn!("{kind} dispatch failed: {error}");
    DispatchOutcome {
        kind,
        success: false,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeCollaborators {
        events: Mutex<Vec<CalendarAction>>,
        tasks: Mutex<Vec<TaskAction>>,
        emails: Mutex<Vec<EmailAction>>,
        fail_calendar: bool,
    }

    #[async_trait]
    impl CalendarCollaborator for FakeCollaborators {
        async fn create_event(&self, event: &CalendarAction) -> Result<String, GoogleApiError> {
            if self.fail_calendar {
                return Err(GoogleApiError::ApiError {
                    status: 403,
                    message: "quota exceeded".into(),
                });
            }
            self.events.lock().unwrap().push(event.clone());
            Ok("evt-1".into())
        }
    }

    #[async_trait]
    impl TaskCollaborator for FakeCollaborators {
        async fn create_task(
            &self,
            task: &TaskAction,
            _anchor: &TemporalAnchor,
        ) -> Result<String, GoogleApiError> {
            self.tasks.lock().unwrap().push(task.clone());
            Ok("task-1".into())
        }
    }

    #[async_trait]
    impl MailCollaborator for FakeCollaborators {
        async fn send_email(
            &self,
            email: &EmailAction,
            _sender: &ActingIdentity,
        ) -> Result<String, GoogleApiError> {
            self.emails.lock().unwrap().push(email.clone());
            Ok("msg-1".into())
        }
    }

    fn identity() -> ActingIdentity {
        ActingIdentity {
            name: Some("Priya Shah".into()),
            email: "priya@example.com".into(),
        }
    }

    fn anchor() -> TemporalAnchor {
        TemporalAnchor::from_date(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
    }

    fn collaborators(fake: &FakeCollaborators) -> Collaborators<'_> {
        Collaborators {
            calendar: fake,
            tasks: fake,
            mail: fake,
        }
    }

    #[tokio::test]
    async fn test_partial_failure_leaves_siblings_untouched() {
        // Valid task + email with an empty recipient: the task dispatches,
        // the email reports a validation failure.
        let fake = FakeCollaborators::default();
        let actions = vec![
            ParsedAction::Task(TaskAction {
                title: Some("Buy milk".into()),
                ..Default::default()
            }),
            ParsedAction::Email(EmailAction {
                recipient: Some("".into()),
                subject: Some("Hi".into()),
                body: Some("Hello.".into()),
                ..Default::default()
            }),
        ];

        let outcomes =
            dispatch_actions(&actions, &identity(), &anchor(), &collaborators(&fake)).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].kind, "task");
        assert!(!outcomes[1].success);
        assert!(outcomes[1].message.contains("recipient"));
        assert_eq!(fake.tasks.lock().unwrap().len(), 1);
        assert!(fake.emails.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_calendar_requires_title_and_date() {
        let fake = FakeCollaborators::default();
        let actions = vec![ParsedAction::Calendar(CalendarAction {
            title: Some("Standup".into()),
            ..Default::default()
        })];

        let outcomes =
            dispatch_actions(&actions, &identity(), &anchor(), &collaborators(&fake)).await;

        assert!(!outcomes[0].success);
        assert!(outcomes[0].message.contains("date"));
        assert!(fake.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_reported_not_retried() {
        let fake = FakeCollaborators {
            fail_calendar: true,
            ..Default::default()
        };
        let actions = vec![
            ParsedAction::Calendar(CalendarAction {
                title: Some("Standup".into()),
                date: Some("2025-06-11".into()),
                ..Default::default()
            }),
            ParsedAction::Task(TaskAction {
                title: Some("Follow up".into()),
                ..Default::default()
            }),
        ];

        let outcomes =
            dispatch_actions(&actions, &identity(), &anchor(), &collaborators(&fake)).await;

        assert!(!outcomes[0].success);
        assert!(outcomes[0].message.contains("quota exceeded"));
        // The failure did not halt the second action.
        assert!(outcomes[1].success);
    }

    #[tokio::test]
    async fn test_email_body_is_enforced_before_send() {
        let fake = FakeCollaborators::default();
        let actions = vec![ParsedAction::Email(EmailAction {
            recipient: Some("raj@example.com".into()),
            subject: Some("Sync".into()),
            body: Some("See you then.\n\nBest regards,\nAI Assistant".into()),
            ..Default::default()
        })];

        let outcomes =
            dispatch_actions(&actions, &identity(), &anchor(), &collaborators(&fake)).await;

        assert!(outcomes[0].success);
        let sent = fake.emails.lock().unwrap();
        let body = sent[0].body.as_deref().unwrap();
        assert_eq!(body, "See you then.\n\nBest regards,\nPriya Shah");
    }

    #[tokio::test]
    async fn test_unknown_action_is_not_dispatched() {
        let fake = FakeCollaborators::default();
        let actions = vec![ParsedAction::Unknown(crate::types::UnknownAction {
            title: Some("what's the weather".into()),
            description: Some("Degraded result".into()),
        })];

        let outcomes =
            dispatch_actions(&actions, &identity(), &anchor(), &collaborators(&fake)).await;

        assert!(!outcomes[0].success);
        assert!(outcomes[0].message.contains("Degraded result"));
    }
}
