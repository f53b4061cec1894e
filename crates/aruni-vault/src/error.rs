//! Vault error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locking or unlocking credentials
#[derive(Debug, Error)]
pub enum VaultError {
    /// Rejected input such as a short or mismatched password
    #[error("invalid input: {0}")]
    Validation(String),

    /// Wrong password or damaged ciphertext; deliberately indistinguishable
    #[error("incorrect password")]
    Authentication,

    #[error("unsupported credential file format (version {0:#04x})")]
    UnsupportedFormat(u8),

    #[error("{} not found", .0.display())]
    MissingFile(PathBuf),

    #[error("encryption failed")]
    Encryption,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VaultError {
    /// Expected failures a caller can recover from by asking again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VaultError::Validation(_) | VaultError::Authentication)
    }
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
