//! Typed concept and learner records
//!
//! Rows arrive from the store as loosely typed text. They are validated and
//! coerced here, at the boundary, so the scheduler only ever sees typed values.

use aruni_store::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ArunError, Result};
use crate::schema::DATE_FORMAT;

/// Confidence ladder for a concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }

    /// Parse a stored cell; an empty cell means the confidence was never set
    pub fn from_cell(cell: &str) -> Result<Option<Self>> {
        let cell = cell.trim();
        if cell.is_empty() {
            return Ok(None);
        }
        cell.parse().map(Some)
    }
}

impl FromStr for Confidence {
    type Err = ArunError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Low" => Ok(Confidence::Low),
            "Medium" => Ok(Confidence::Medium),
            "High" => Ok(Confidence::High),
            other => Err(ArunError::validation(format!(
                "unknown confidence '{other}' (expected Low, Medium or High)"
            ))),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of answering a review question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
}

impl FromStr for Outcome {
    type Err = ArunError;

    /// Accepts any word starting with `c` or `w`, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('c') => Ok(Outcome::Correct),
            Some('w') => Ok(Outcome::Wrong),
            _ => Err(ArunError::validation(format!(
                "review result must be 'correct' or 'wrong', got '{s}'"
            ))),
        }
    }
}

/// One learnable fact in a learner's worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub topic: String,
    pub domain: String,
    pub explanation: String,
    pub question: String,
    /// `None` only for rows whose confidence cell was left blank
    pub confidence: Option<Confidence>,
    pub created_at: String,
    pub last_reviewed: Option<String>,
    pub next_review: Option<String>,
    pub times_reviewed: u32,
}

impl ConceptRecord {
    /// Coerce a header-keyed store record
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            topic: record.text("topic").to_string(),
            domain: record.text("domain").to_string(),
            explanation: record.text("explanation").to_string(),
            question: record.text("questions").to_string(),
            confidence: Confidence::from_cell(record.text("confidence"))?,
            created_at: record.text("created_at").to_string(),
            last_reviewed: non_empty(record.text("last_reviewed")),
            next_review: review_date(record.text("next_review"))?,
            times_reviewed: parse_count(record.text("times_reviewed"))?,
        })
    }

    /// Cells in worksheet column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.topic.clone(),
            self.domain.clone(),
            self.explanation.clone(),
            self.question.clone(),
            self.confidence.map(|c| c.to_string()).unwrap_or_default(),
            self.created_at.clone(),
            self.last_reviewed.clone().unwrap_or_default(),
            self.next_review.clone().unwrap_or_default(),
            self.times_reviewed.to_string(),
        ]
    }

    pub fn confidence_label(&self) -> &'static str {
        self.confidence.map(Confidence::as_str).unwrap_or("?")
    }
}

/// One learner listed in the shared `config` worksheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub user: String,
    pub name: String,
    pub email: String,
    pub domain: String,
    pub learning_goal: String,
    pub start_date: String,
    pub custom_instructions: String,
}

impl LearnerProfile {
    pub fn from_record(record: &Record) -> Self {
        Self {
            user: record.text("user").to_string(),
            name: record.text("name").to_string(),
            email: record.text("email").to_string(),
            domain: record.text("domain").to_string(),
            learning_goal: record.text("learning_goal").to_string(),
            start_date: record.text("start_date").to_string(),
            custom_instructions: record.text("custom_instructions").to_string(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.user.clone(),
            self.name.clone(),
            self.email.clone(),
            self.domain.clone(),
            self.learning_goal.clone(),
            self.start_date.clone(),
            self.custom_instructions.clone(),
        ]
    }

    /// Display name, falling back to the username
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.user
        } else {
            &self.name
        }
    }
}

/// Normalize a username into a worksheet name: lowercase, spaces as `_`
pub fn normalize_username(raw: &str) -> Result<String> {
    let user = raw.trim().to_lowercase().replace(' ', "_");
    if user.is_empty() {
        return Err(ArunError::validation("username cannot be empty"));
    }
    Ok(user)
}

fn non_empty(cell: &str) -> Option<String> {
    let cell = cell.trim();
    (!cell.is_empty()).then(|| cell.to_string())
}

/// Coerce a `next_review` cell to zero-padded `YYYY-MM-DD`
///
/// Due selection compares these cells as text, so `2024-1-5` would sort after
/// `2024-06-01`. Anything that is not a calendar date is rejected.
pub fn review_date(cell: &str) -> Result<Option<String>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(cell, DATE_FORMAT)
        .map(|date| Some(date.format(DATE_FORMAT).to_string()))
        .map_err(|_| {
            ArunError::validation(format!("next_review '{cell}' is not a YYYY-MM-DD date"))
        })
}

fn parse_count(cell: &str) -> Result<u32> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(0);
    }
    cell.parse()
        .map_err(|_| ArunError::validation(format!("times_reviewed '{cell}' is not a count")))
}
