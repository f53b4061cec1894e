//! Learning-session log rows
//!
//! A row is appended when a session starts with the end fields blank, then the
//! same row is located by position and completed when the session ends.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::schema::{session_col, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};

/// Session row as appended at start
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStart {
    pub row: usize,
    pub date: String,
    pub start_time: String,
}

/// Fields written when a session ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEnd {
    pub end_time: String,
    /// `None` when the stored start time cannot be read
    pub duration_minutes: Option<i64>,
    pub concepts_covered: String,
    pub key_insights: String,
}

pub fn start_row(user: &str, domain: &str, now: NaiveDateTime) -> Vec<String> {
    vec![
        user.to_string(),
        now.format(DATE_FORMAT).to_string(),
        now.format(TIME_FORMAT).to_string(),
        String::new(),
        String::new(),
        domain.to_string(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

/// Whole minutes between the row's start and `now`
///
/// A blank date falls back to today's date; a missing or unreadable start time
/// yields `None`.
pub fn duration_minutes(row: &[String], now: NaiveDateTime) -> Option<i64> {
    let cell = |col: usize| row.get(col - 1).map(|c| c.trim()).filter(|c| !c.is_empty());

    let start_time = cell(session_col::START_TIME)?;
    let date = cell(session_col::DATE)
        .map(str::to_string)
        .unwrap_or_else(|| now.format(DATE_FORMAT).to_string());

    let start =
        NaiveDateTime::parse_from_str(&format!("{date} {start_time}"), DATETIME_FORMAT).ok()?;
    Some((now - start).num_minutes())
}

pub fn end_fields(
    row: &[String],
    concepts_covered: &str,
    key_insights: &str,
    now: NaiveDateTime,
) -> SessionEnd {
    SessionEnd {
        end_time: now.format(TIME_FORMAT).to_string(),
        duration_minutes: duration_minutes(row, now),
        concepts_covered: concepts_covered.to_string(),
        key_insights: key_insights.to_string(),
    }
}

impl SessionEnd {
    pub fn cells(&self) -> Vec<(usize, String)> {
        vec![
            (session_col::END_TIME, self.end_time.clone()),
            (
                session_col::DURATION_MINUTES,
                self.duration_minutes
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            ),
            (session_col::CONCEPTS_COVERED, self.concepts_covered.clone()),
            (session_col::KEY_INSIGHTS, self.key_insights.clone()),
        ]
    }
}

/// Current local wall-clock time, as written into the log
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
