//! Spaced-repetition scheduling and learner record keeping

mod config;
mod digest;
mod due;
mod error;
mod import;
pub mod scheduler;
pub mod schema;
mod session;
mod tracker;
mod types;

pub use config::{
    Config, ConfigError, EnvFile, MailSettings, KEY_PATH_KEY, STORE_ID_KEY,
};
pub use digest::Reminder;
pub use due::{select_due, summarize, Due, Progress};
pub use error::{ArunError, Result};
pub use import::{ExportDocument, ExportedConcept};
pub use scheduler::{new_concept, schedule, Schedule};
pub use session::{local_now, SessionEnd, SessionStart};
pub use tracker::{Agenda, DigestRun, LearnerOverview, NewConcept, Review, Tracker};
pub use types::{normalize_username, Confidence, ConceptRecord, LearnerProfile, Outcome};
