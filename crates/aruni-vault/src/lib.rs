//! Credential vault: password-locked distribution of store credentials

mod bundle;
mod cipher;
mod error;
mod password;
mod vault;

pub use bundle::CredentialBundle;
pub use cipher::{derive_key, lock, unlock, DerivedKey, TOKEN_VERSION};
pub use error::{VaultError, VaultResult};
pub use password::{validate_password, MIN_PASSWORD_LEN};
pub use vault::Vault;
