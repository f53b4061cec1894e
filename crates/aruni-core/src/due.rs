//! Due selection and progress counts

use aruni_store::HEADER_ROWS;
use chrono::NaiveDate;
use serde::Serialize;

use crate::schema::DATE_FORMAT;
use crate::types::{Confidence, ConceptRecord};

/// A concept due for review together with its 1-based store row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Due<'a> {
    pub row: usize,
    pub concept: &'a ConceptRecord,
}

/// Worksheet row holding the record at `index` of the data rows
pub fn store_row(index: usize) -> usize {
    index + HEADER_ROWS + 1
}

fn is_due(concept: &ConceptRecord, today: &str) -> bool {
    concept
        .next_review
        .as_deref()
        .is_some_and(|next| next <= today)
}

/// Concepts whose `next_review` is on or before `today`, in store order
///
/// The comparison is on ISO-8601 text, matching how the store holds dates.
pub fn select_due(records: &[ConceptRecord], today: NaiveDate) -> Vec<Due<'_>> {
    let today = today.format(DATE_FORMAT).to_string();
    records
        .iter()
        .enumerate()
        .filter(|(_, concept)| is_due(concept, &today))
        .map(|(index, concept)| Due {
            row: store_row(index),
            concept,
        })
        .collect()
}

/// Concept counts for one learner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub due: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

pub fn summarize(records: &[ConceptRecord], today: NaiveDate) -> Progress {
    let today = today.format(DATE_FORMAT).to_string();
    records.iter().fold(
        Progress {
            total: records.len(),
            ..Default::default()
        },
        |mut p, concept| {
            if is_due(concept, &today) {
                p.due += 1;
            }
            match concept.confidence {
                Some(Confidence::Low) => p.low += 1,
                Some(Confidence::Medium) => p.medium += 1,
                Some(Confidence::High) => p.high += 1,
                None => {}
            }
            p
        },
    )
}
