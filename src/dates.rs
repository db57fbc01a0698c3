//! Temporal anchoring and date normalization.
//!
//! Generation backends are observed to default to their training-cutoff
//! year, so every date-bearing field runs through `resolve_date` against a
//! per-request anchor. The task subsystem's relative-term and end-of-day
//! handling lives here too, so the correction heuristic exists exactly once.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Reference "now" for a single request.
///
/// Computed fresh per request, never cached — two requests straddling
/// midnight may observe different anchors.
#[derive(Debug, Clone, Copy)]
pub struct TemporalAnchor {
    pub today: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl TemporalAnchor {
    pub fn now() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(today: NaiveDate) -> Self {
        TemporalAnchor {
            today,
            year: today.year(),
            month: today.month(),
            day: today.day(),
        }
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today + Duration::days(1)
    }
}

/// Parse a date-like string into a calendar date.
///
/// Accepts YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, and the date part of an
/// RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(d);
        }
    }
    None
}

/// Normalize a date-bearing field against the anchor.
///
/// Years earlier than the anchor year are replaced with the anchor year; if
/// the corrected date still precedes today, the user meant the next
/// occurrence of that month/day and the year advances once more. Dates in
/// the anchor year or later pass through unmodified — explicit future years
/// are never second-guessed.
///
/// Unparseable input yields None: callers treat a dropped date as
/// "unspecified", not "today".
pub fn resolve_date(raw: &str, anchor: &TemporalAnchor) -> Option<String> {
    let parsed = parse_date(raw)?;
    Some(correct_year(parsed, anchor).format("%Y-%m-%d").to_string())
}

fn correct_year(date: NaiveDate, anchor: &TemporalAnchor) -> NaiveDate {
    if date.year() >= anchor.year {
        return date;
    }
    let this_year = with_year(date, anchor.year);
    if this_year < anchor.today {
        with_year(date, anchor.year + 1)
    } else {
        this_year
    }
}

/// Feb 29 clamps to Feb 28 when the target year is not a leap year.
fn with_year(date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day() - 1))
        .unwrap_or(date)
}

/// Due-date resolution for the task subsystem.
///
/// "today" and "tomorrow" anchor to the current request; anything else goes
/// through `resolve_date`. None means the caller should default to the end
/// of the current day.
pub fn resolve_due_date(raw: &str, anchor: &TemporalAnchor) -> Option<NaiveDate> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "today" => Some(anchor.today),
        "tomorrow" => Some(anchor.tomorrow()),
        _ => {
            let resolved = resolve_date(raw, anchor)?;
            parse_date(&resolved)
        }
    }
}

/// End-of-day timestamp in RFC 3339 form, the shape the task collaborator
/// stores due dates in.
pub fn end_of_day_rfc3339(date: NaiveDate) -> String {
    format!("{}T23:59:59Z", date.format("%Y-%m-%d"))
}
