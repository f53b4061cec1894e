//! Learner operations against a record store
//!
//! Each learner owns one worksheet named after their username. The shared
//! `config` worksheet lists learners and `sessions` logs study sessions.
//! Every operation validates its input and the rows it reads before issuing
//! any write, and multi-cell updates go through a single `set_fields` call.

use aruni_store::{Record, RecordStore, StoreError, HEADER_ROWS};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};

use crate::digest::{self, Reminder};
use crate::due::{select_due, store_row, summarize, Due, Progress};
use crate::error::{ArunError, Result};
use crate::import::ExportDocument;
use crate::scheduler::{self, Schedule};
use crate::schema::{
    concept_col, session_col, CONCEPT_HEADERS, CONFIG_HEADERS, CONFIG_SHEET, DATETIME_FORMAT,
    DATE_FORMAT, SESSIONS_SHEET, SESSION_HEADERS,
};
use crate::session::{self, SessionEnd, SessionStart};
use crate::types::{normalize_username, ConceptRecord, LearnerProfile, Outcome};

/// A learner's concepts as read at one point in time
#[derive(Debug, Clone)]
pub struct Agenda {
    pub today: NaiveDate,
    pub concepts: Vec<ConceptRecord>,
}

impl Agenda {
    pub fn due(&self) -> Vec<Due<'_>> {
        select_due(&self.concepts, self.today)
    }

    pub fn progress(&self) -> Progress {
        summarize(&self.concepts, self.today)
    }
}

/// Result of recording one review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub row: usize,
    pub topic: String,
    pub confidence: String,
    pub last_reviewed: String,
    pub next_review: String,
    pub interval_days: i64,
    pub times_reviewed: u32,
}

/// Fields for a new concept
#[derive(Debug, Clone, Default)]
pub struct NewConcept {
    pub topic: String,
    pub domain: String,
    pub explanation: String,
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearnerOverview {
    pub profile: LearnerProfile,
    /// `None` when the learner's worksheet is missing
    pub progress: Option<Progress>,
}

/// Reminders produced by one digest run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DigestRun {
    pub reminders: Vec<Reminder>,
    /// Learners without a reminder, with the reason
    pub skipped: Vec<(String, String)>,
}

pub struct Tracker<S> {
    store: S,
}

impl<S: RecordStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Create the shared worksheets that are missing; returns their names
    pub fn init_store(&mut self) -> Result<Vec<&'static str>> {
        let mut created = Vec::new();
        for (name, headers) in [
            (CONFIG_SHEET, &CONFIG_HEADERS[..]),
            (SESSIONS_SHEET, &SESSION_HEADERS[..]),
        ] {
            if !self.store.has_collection(name)? {
                self.store.create_collection(name, headers)?;
                info!(collection = name, "created worksheet");
                created.push(name);
            }
        }
        Ok(created)
    }

    /// All learners in the `config` worksheet
    pub fn learners(&self) -> Result<Vec<LearnerProfile>> {
        let records = self.store.get_records(CONFIG_SHEET)?;
        Ok(records
            .iter()
            .map(LearnerProfile::from_record)
            .filter(|p| {
                let keep = !p.user.trim().is_empty();
                if !keep {
                    warn!("skipping config row without a user");
                }
                keep
            })
            .collect())
    }

    pub fn learner(&self, user: &str) -> Result<LearnerProfile> {
        self.learners()?
            .into_iter()
            .find(|p| p.user == user)
            .ok_or_else(|| ArunError::not_found("learner", user))
    }

    /// Register a learner and create their worksheet if it does not exist
    ///
    /// Returns the stored profile and whether a worksheet was created.
    pub fn add_learner(
        &mut self,
        mut profile: LearnerProfile,
        today: NaiveDate,
    ) -> Result<(LearnerProfile, bool)> {
        profile.user = normalize_username(&profile.user)?;
        if profile.user == CONFIG_SHEET || profile.user == SESSIONS_SHEET {
            return Err(ArunError::validation(format!(
                "'{}' is reserved for a shared worksheet",
                profile.user
            )));
        }
        if self.learners()?.iter().any(|p| p.user == profile.user) {
            return Err(ArunError::validation(format!(
                "learner '{}' already exists",
                profile.user
            )));
        }
        if profile.name.trim().is_empty() {
            profile.name = title_case(&profile.user);
        }
        if profile.start_date.trim().is_empty() {
            profile.start_date = today.format(DATE_FORMAT).to_string();
        }

        let created = !self.store.has_collection(&profile.user)?;
        if created {
            self.store
                .create_collection(&profile.user, &CONCEPT_HEADERS)?;
        }
        self.store.append(CONFIG_SHEET, &profile.to_row())?;
        info!(user = %profile.user, created, "added learner");
        Ok((profile, created))
    }

    /// All concepts of a learner, in store order
    pub fn concepts(&self, user: &str) -> Result<Vec<ConceptRecord>> {
        let records = self
            .store
            .get_records(user)
            .map_err(|e| learner_error(user, e))?;
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                ConceptRecord::from_record(record).map_err(|e| at_row(store_row(i), e))
            })
            .collect()
    }

    pub fn agenda(&self, user: &str, today: NaiveDate) -> Result<Agenda> {
        Ok(Agenda {
            today,
            concepts: self.concepts(user)?,
        })
    }

    pub fn status(&self, user: &str, today: NaiveDate) -> Result<Progress> {
        Ok(self.agenda(user, today)?.progress())
    }

    /// Progress for every learner; a missing worksheet is reported, not fatal
    pub fn overview(&self, today: NaiveDate) -> Result<Vec<LearnerOverview>> {
        let mut overview = Vec::new();
        for profile in self.learners()? {
            let progress = match self.status(&profile.user, today) {
                Ok(progress) => Some(progress),
                Err(ArunError::NotFound { .. }) => {
                    warn!(user = %profile.user, "learner worksheet not found");
                    None
                }
                Err(e) => return Err(e),
            };
            overview.push(LearnerOverview { profile, progress });
        }
        Ok(overview)
    }

    /// Append a new concept; returns its row and stored fields
    pub fn add_concept(
        &mut self,
        user: &str,
        concept: &NewConcept,
        now: NaiveDateTime,
    ) -> Result<(usize, ConceptRecord)> {
        if concept.topic.trim().is_empty() {
            return Err(ArunError::validation("topic cannot be empty"));
        }
        self.require_learner_sheet(user)?;

        let record = scheduler::new_concept(
            concept.topic.trim(),
            &concept.domain,
            &concept.explanation,
            &concept.question,
            now,
        );
        let row = self.store.append(user, &record.to_row())?;
        info!(user, row, topic = %record.topic, "added concept");
        Ok((row, record))
    }

    /// Record a review outcome for the concept at `row`
    pub fn review(
        &mut self,
        user: &str,
        row: usize,
        outcome: Outcome,
        now: NaiveDateTime,
    ) -> Result<Review> {
        if row <= HEADER_ROWS {
            return Err(ArunError::validation(format!(
                "row {row} is the header; concept rows start at {}",
                HEADER_ROWS + 1
            )));
        }
        let headers = self.require_learner_sheet(user)?;
        let values = self.store.get_row(user, row)?;
        let concept = ConceptRecord::from_record(&Record::new(&headers, values))
            .map_err(|e| at_row(row, e))?;
        if concept.topic.trim().is_empty() {
            return Err(ArunError::validation(format!("row {row} holds no concept")));
        }

        let schedule: Schedule = scheduler::schedule(
            concept.times_reviewed,
            concept.confidence,
            outcome,
            now.date(),
        );
        let last_reviewed = now.format(DATETIME_FORMAT).to_string();
        let next_review = schedule.next_review_cell();

        self.store.set_fields(
            user,
            row,
            &[
                (concept_col::CONFIDENCE, schedule.confidence.to_string()),
                (concept_col::LAST_REVIEWED, last_reviewed.clone()),
                (concept_col::NEXT_REVIEW, next_review.clone()),
                (concept_col::TIMES_REVIEWED, schedule.times_reviewed.to_string()),
            ],
        )?;
        info!(
            user,
            row,
            confidence = %schedule.confidence,
            next_review = %next_review,
            "recorded review"
        );

        Ok(Review {
            row,
            topic: concept.topic,
            confidence: schedule.confidence.to_string(),
            last_reviewed,
            next_review,
            interval_days: schedule.interval_days,
            times_reviewed: schedule.times_reviewed,
        })
    }

    /// Append a session row with the end fields left blank
    pub fn start_session(
        &mut self,
        user: &str,
        domain: &str,
        now: NaiveDateTime,
    ) -> Result<SessionStart> {
        self.require_learner_sheet(user)?;
        let cells = session::start_row(user, domain, now);
        let row = self.store.append(SESSIONS_SHEET, &cells)?;
        info!(user, row, "session started");
        Ok(SessionStart {
            row,
            date: cells[session_col::DATE - 1].clone(),
            start_time: cells[session_col::START_TIME - 1].clone(),
        })
    }

    /// Complete the session row appended by [`Tracker::start_session`]
    pub fn end_session(
        &mut self,
        user: &str,
        row: usize,
        concepts_covered: &str,
        key_insights: &str,
        now: NaiveDateTime,
    ) -> Result<SessionEnd> {
        if row <= HEADER_ROWS {
            return Err(ArunError::validation(format!(
                "row {row} is the header; session rows start at {}",
                HEADER_ROWS + 1
            )));
        }
        let values = self.store.get_row(SESSIONS_SHEET, row)?;
        let owner = values
            .get(session_col::USER - 1)
            .map(String::as_str)
            .unwrap_or("");
        if owner != user {
            warn!(user, owner, row, "session row belongs to another learner");
        }

        let end = session::end_fields(&values, concepts_covered, key_insights, now);
        self.store.set_fields(SESSIONS_SHEET, row, &end.cells())?;
        info!(user, row, duration = ?end.duration_minutes, "session ended");
        Ok(end)
    }

    /// Append every concept of an export to a learner's worksheet
    pub fn import_concepts(
        &mut self,
        user: &str,
        export: &ExportDocument,
        now: NaiveDateTime,
    ) -> Result<usize> {
        self.require_learner_sheet(user)?;
        let rows: Vec<Vec<String>> = export
            .concepts(now)?
            .iter()
            .map(ConceptRecord::to_row)
            .collect();
        if rows.is_empty() {
            return Ok(0);
        }
        self.store.append_many(user, &rows)?;
        info!(user, count = rows.len(), "imported concepts");
        Ok(rows.len())
    }

    /// Compose a reminder for every learner with an email address
    ///
    /// A learner whose worksheet cannot be read is skipped so the rest still
    /// get their reminder.
    pub fn digest(&self, today: NaiveDate, only_user: Option<&str>) -> Result<DigestRun> {
        let mut run = DigestRun::default();
        let learners = self.learners()?;

        if let Some(user) = only_user {
            if !learners.iter().any(|p| p.user == user) {
                return Err(ArunError::not_found("learner", user));
            }
        }

        for profile in learners {
            if only_user.is_some_and(|u| u != profile.user) {
                continue;
            }
            if profile.email.trim().is_empty() {
                run.skipped.push((profile.user.clone(), "no email".to_string()));
                continue;
            }
            match self.agenda(&profile.user, today) {
                Ok(agenda) => {
                    let reminder = digest::compose(&profile, &agenda.due(), today);
                    run.reminders.push(reminder);
                }
                Err(e) => {
                    warn!(user = %profile.user, error = %e, "cannot read learner worksheet");
                    run.skipped.push((profile.user.clone(), e.to_string()));
                }
            }
        }
        Ok(run)
    }

    fn require_learner_sheet(&self, user: &str) -> Result<Vec<String>> {
        self.store
            .headers(user)
            .map_err(|e| learner_error(user, e))
    }
}

fn learner_error(user: &str, err: StoreError) -> ArunError {
    match err {
        StoreError::CollectionNotFound(_) | StoreError::InvalidName(_) => {
            ArunError::not_found("learner", user)
        }
        other => other.into(),
    }
}

/// Name the worksheet row in a validation message
fn at_row(row: usize, err: ArunError) -> ArunError {
    match err {
        ArunError::Validation(msg) => ArunError::validation(format!("row {row}: {msg}")),
        other => other,
    }
}

fn title_case(user: &str) -> String {
    let mut out = String::with_capacity(user.len());
    let mut boundary = true;
    for c in user.chars() {
        if boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        boundary = !c.is_alphabetic();
    }
    out
}
