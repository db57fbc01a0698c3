//! Google Tasks API v1 — task creation.
//!
//! Due dates land as end-of-day RFC 3339 timestamps. Relative terms and
//! past-year correction go through the shared resolver in `dates` — the
//! same instance the pipeline uses upstream, so a "tomorrow" handed
//! directly to this collaborator resolves identically.

use serde::{Deserialize, Serialize};

use super::{error_for_status, GoogleApiError};
use crate::dates::{self, TemporalAnchor};
use crate::types::TaskAction;

const TASKS_URL: &str = "https://tasks.googleapis.com/tasks/v1/lists/@default/tasks";

#[derive(Debug, Serialize)]
struct TaskBody {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    due: String,
    status: &'static str,
}

#[derive(Debug, Deserialize)]
struct CreatedTask {
    #[serde(default)]
    id: String,
}

/// Create a task on the default list.
///
/// `title` is a hard requirement, checked by the dispatcher. A missing or
/// unresolvable due date defaults to the end of the current day.
pub async fn insert_task(
    access_token: &str,
    task: &TaskAction,
    anchor: &TemporalAnchor,
) -> Result<String, GoogleApiError> {
    let body = build_task_body(task, anchor);

    let client = reqwest::Client::new();
    let resp = client
        .post(TASKS_URL)
        .bearer_auth(access_token)
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(error_for_status(resp).await);
    }

    let created: CreatedTask = resp.json().await?;
    Ok(created.id)
}

fn build_task_body(task: &TaskAction, anchor: &TemporalAnchor) -> TaskBody {
    let due_day = task
        .due_date
        .as_deref()
        .and_then(|raw| dates::resolve_due_date(raw, anchor))
        .unwrap_or(anchor.today);

    TaskBody {
        title: task.title.clone().unwrap_or_default(),
        notes: task.description.clone(),
        due: dates::end_of_day_rfc3339(due_day),
        status: "needsAction",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn anchor() -> TemporalAnchor {
        TemporalAnchor::from_date(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
    }

    #[test]
    fn test_absent_due_date_defaults_to_end_of_today() {
        let task = TaskAction {
            title: Some("Buy milk".into()),
            ..Default::default()
        };
        let body = build_task_body(&task, &anchor());
        assert_eq!(body.due, "2025-06-10T23:59:59Z");
        assert_eq!(body.status, "needsAction");
    }

    #[test]
    fn test_relative_term_resolves_against_anchor() {
        let task = TaskAction {
            title: Some("Send report".into()),
            due_date: Some("tomorrow".into()),
            ..Default::default()
        };
        let body = build_task_body(&task, &anchor());
        assert_eq!(body.due, "2025-06-11T23:59:59Z");
    }

    #[test]
    fn test_past_year_due_date_is_corrected() {
        let task = TaskAction {
            title: Some("Renew license".into()),
            due_date: Some("2024-01-05".into()),
            ..Default::default()
        };
        let body = build_task_body(&task, &anchor());
        assert_eq!(body.due, "2026-01-05T23:59:59Z");
    }

    #[test]
    fn test_wire_shape() {
        let task = TaskAction {
            title: Some("Buy milk".into()),
            description: Some("2% if they have it".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(build_task_body(&task, &anchor())).unwrap();
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["notes"], "2% if they have it");
        assert_eq!(json["status"], "needsAction");
        assert!(json["due"].as_str().unwrap().ends_with("T23:59:59Z"));
    }
}
