//! Error taxonomy for learner operations

use aruni_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ArunError {
    /// Malformed input; never retried
    #[error("invalid input: {0}")]
    Validation(String),

    /// Unknown learner or collection, carrying the missing identifier
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Remote or local store failure, fatal for the current command
    #[error("record store failed: {0}")]
    StoreIo(StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ArunError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ArunError::Validation(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ArunError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<StoreError> for ArunError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CollectionNotFound(name) => ArunError::not_found("collection", name),
            StoreError::RowOutOfRange { collection, row } => {
                ArunError::validation(format!("row {row} does not exist in '{collection}'"))
            }
            StoreError::InvalidName(name) => {
                ArunError::validation(format!("'{name}' is not a valid collection name"))
            }
            other => ArunError::StoreIo(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArunError>;
