//! Interpreter prompt construction.
//!
//! One instruction string per request: the temporal anchor with worked
//! examples, the field schema for each action kind, and the output rules.
//! Pure string building — the generation call happens elsewhere.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::dates::TemporalAnchor;

/// Build the instruction text for one command.
pub fn build_interpreter_prompt(text: &str, user_name: &str, anchor: &TemporalAnchor) -> String {
    let today = anchor.today.format("%Y-%m-%d");
    let tomorrow = anchor.tomorrow().format("%Y-%m-%d");
    let friday = next_weekday(anchor.today, Weekday::Fri).format("%Y-%m-%d");

    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are the command interpreter for {user_name}'s assistant. \
         Convert the command below into a structured action.\n\n"
    ));

    prompt.push_str(&format!(
        "TODAY'S DATE IS {today}.\n\
         Current year: {year}. Current month: {month}. Current day: {day}.\n\n\
         DATE RULES:\n\
         - Every date must use YYYY-MM-DD format.\n\
         - NEVER output a year earlier than {year}.\n\
         - \"today\" means {today}.\n\
         - \"tomorrow\" means {tomorrow}.\n\
         - Weekday references mean the next occurrence: \"on Friday\" means {friday}.\n\n",
        year = anchor.year,
        month = anchor.month,
        day = anchor.day,
    ));

    prompt.push_str(
        "Choose exactly ONE \"kind\" for the action, with these fields:\n\n\
         ```json\n\
         {\"kind\": \"calendar\", \"title\": \"...\", \"date\": \"YYYY-MM-DD\", \
         \"time\": \"HH:MM\", \"durationMinutes\": 60, \"location\": \"...\"}\n\
         {\"kind\": \"task\", \"title\": \"...\", \"dueDate\": \"YYYY-MM-DD\", \
         \"priority\": \"low|medium|high\"}\n\
         {\"kind\": \"email\", \"recipient\": \"...\", \"subject\": \"...\", \"body\": \"...\"}\n\
         ```\n\n\
         Omit any field the command does not specify. \
         If the command contains multiple independent requests, return \
         {\"actions\": [...]} where each element is one action object.\n\n",
    );

    prompt.push_str(
        "For email actions: write only the message content. Do NOT include any \
         signature, sign-off, or sender name — those are added separately.\n\n",
    );

    prompt.push_str(&format!(
        "COMMAND: {text}\n\n\
         Return ONLY the JSON object, with no commentary before or after.\n"
    ));

    prompt
}

/// Next occurrence of `target` strictly after `from`.
fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut days_ahead =
        target.num_days_from_monday() as i64 - from.weekday().num_days_from_monday() as i64;
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    from + Duration::days(days_ahead)
}
