//! Concept import from a JSON knowledge-base export

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::error::{ArunError, Result};
use crate::schema::{DATETIME_FORMAT, DATE_FORMAT};
use crate::types::{review_date, Confidence, ConceptRecord};

/// Export document: `{"knowledge_base": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub knowledge_base: Vec<ExportedConcept>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportedConcept {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, alias = "questions")]
    pub question: String,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_reviewed: Option<String>,
    #[serde(default)]
    pub next_review: Option<String>,
    /// Exporters write this as either a number or text
    #[serde(default)]
    pub times_reviewed: Option<Value>,
}

impl ExportDocument {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read(path).map_err(|e| {
            ArunError::validation(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_slice(&contents)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ArunError::validation(format!("export is not valid JSON: {e}")))
    }

    /// Convert every entry, failing on the first invalid one
    ///
    /// `now` stands in for a missing creation time, and the day after it for a
    /// missing `next_review`, as for a concept added by hand.
    pub fn concepts(&self, now: NaiveDateTime) -> Result<Vec<ConceptRecord>> {
        self.knowledge_base
            .iter()
            .enumerate()
            .map(|(i, c)| {
                c.to_concept(now).map_err(|e| match e {
                    ArunError::Validation(msg) => {
                        ArunError::validation(format!("entry {}: {msg}", i + 1))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

impl ExportedConcept {
    pub fn to_concept(&self, now: NaiveDateTime) -> Result<ConceptRecord> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ArunError::validation("topic cannot be empty"));
        }

        let confidence = match self.confidence.as_deref() {
            Some(text) => Confidence::from_cell(text)?.unwrap_or(Confidence::Low),
            None => Confidence::Low,
        };
        let times_reviewed = count(self.times_reviewed.as_ref())?;
        let last_reviewed = present(&self.last_reviewed);
        if (times_reviewed == 0) != last_reviewed.is_none() {
            return Err(ArunError::validation(format!(
                "times_reviewed is {times_reviewed} but last_reviewed is {}",
                if last_reviewed.is_some() { "set" } else { "missing" }
            )));
        }

        let next_review = match review_date(self.next_review.as_deref().unwrap_or(""))? {
            Some(date) => date,
            None => (now.date() + Duration::days(1)).format(DATE_FORMAT).to_string(),
        };
        let created_at = present(&self.created_at)
            .unwrap_or_else(|| now.format(DATETIME_FORMAT).to_string());

        Ok(ConceptRecord {
            topic: topic.to_string(),
            domain: self.domain.clone(),
            explanation: self.explanation.clone(),
            question: self.question.clone(),
            confidence: Some(confidence),
            created_at,
            last_reviewed,
            next_review: Some(next_review),
            times_reviewed,
        })
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn count(value: Option<&Value>) -> Result<u32> {
    let invalid = || ArunError::validation("times_reviewed is not a count");
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
