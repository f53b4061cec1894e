//! Password acceptance rules

use crate::error::{VaultError, VaultResult};

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 4;

pub(crate) fn check_length(password: &str) -> VaultResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(VaultError::Validation(format!(
            "password too short (minimum {MIN_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

/// Check a newly chosen password and its confirmation before locking
pub fn validate_password(password: &str, confirmation: &str) -> VaultResult<()> {
    if password != confirmation {
        return Err(VaultError::Validation("passwords do not match".to_string()));
    }
    check_length(password)
}
