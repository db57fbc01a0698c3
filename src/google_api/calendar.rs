//! Google Calendar API v3 — event creation.

use chrono::{Duration, NaiveDate, NaiveTime, Offset};
use serde::{Deserialize, Serialize};

use super::{error_for_status, GoogleApiError};
use crate::types::CalendarAction;

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";
const DEFAULT_DURATION_MINUTES: u32 = 60;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventBody {
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: EventTime,
    end: EventTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEvent {
    #[serde(default)]
    id: String,
    #[serde(default)]
    html_link: Option<String>,
}

// ============================================================================
// Calendar API
// ============================================================================

/// Create an event on the primary calendar.
///
/// `title` and `date` are hard requirements, checked by the dispatcher
/// before this call. Without a `time` the event is all-day; with one it
/// spans `durationMinutes` (default 60) from the given local time.
/// Returns the created event link (or id) as confirmation.
pub async fn insert_event(
    access_token: &str,
    event: &CalendarAction,
) -> Result<String, GoogleApiError> {
    let body = build_event_body(event, &local_offset_string());

    let client = reqwest::Client::new();
    let resp = client
        .post(EVENTS_URL)
        .bearer_auth(access_token)
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(error_for_status(resp).await);
    }

    let created: CreatedEvent = resp.json().await?;
    Ok(created.html_link.unwrap_or(created.id))
}

fn build_event_body(event: &CalendarAction, offset: &str) -> EventBody {
    let date = event.date.as_deref().unwrap_or_default();
    let (start, end) = event_bounds(date, event.time.as_deref(), event.duration_minutes, offset);

    EventBody {
        summary: event
            .title
            .clone()
            .unwrap_or_else(|| "(No title)".to_string()),
        location: event.location.clone(),
        description: event.description.clone(),
        start,
        end,
    }
}

/// Start/end bounds for the event. A malformed time degrades to an all-day
/// event rather than failing the dispatch.
fn event_bounds(
    date: &str,
    time: Option<&str>,
    duration_minutes: Option<u32>,
    offset: &str,
) -> (EventTime, EventTime) {
    if let Some(raw_time) = time {
        let parsed_time = NaiveTime::parse_from_str(raw_time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw_time.trim(), "%H:%M:%S"));
        if let (Some(day), Ok(t)) = (NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(), parsed_time)
        {
            let start = day.and_time(t);
            let minutes = duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
            let end = start + Duration::minutes(minutes as i64);
            return (
                EventTime {
                    date: None,
                    date_time: Some(format!("{}{offset}", start.format("%Y-%m-%dT%H:%M:%S"))),
                },
                EventTime {
                    date: None,
                    date_time: Some(format!("{}{offset}", end.format("%Y-%m-%dT%H:%M:%S"))),
                },
            );
        }
        log::debug!("calendar: unparseable time {raw_time:?}; falling back to all-day event");
    }

    // All-day: Google treats the end date as exclusive.
    let next_day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| (d + Duration::days(1)).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| date.to_string());
    (
        EventTime {
            date: Some(date.to_string()),
            date_time: None,
        },
        EventTime {
            date: Some(next_day),
            date_time: None,
        },
    )
}

/// Local UTC-offset string, e.g. "-05:00".
///
/// Event times are local wall-clock; sending them with the local offset
/// keeps "5pm" meaning 5pm for the user rather than UTC midnight drift.
fn local_offset_string() -> String {
    let offset_secs = chrono::Local::now().offset().fix().local_minus_utc();
    format!(
        "{:+03}:{:02}",
        offset_secs / 3600,
        (offset_secs.unsigned_abs() % 3600) / 60
    )
}
