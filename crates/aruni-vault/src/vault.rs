//! File-level lock and unlock of the local credential file

use aruni_store::atomic_write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::bundle::CredentialBundle;
use crate::cipher;
use crate::error::{VaultError, VaultResult};

/// Plaintext credential file and its encrypted counterpart
///
/// The plaintext file stays on the local machine; only the encrypted file is
/// meant for shared storage. Neither file is locked against concurrent
/// writers, so two processes must not lock or unlock the same pair at once.
#[derive(Debug, Clone)]
pub struct Vault {
    key_path: PathBuf,
    encrypted_path: PathBuf,
}

impl Vault {
    pub fn new(key_path: impl Into<PathBuf>, encrypted_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            encrypted_path: encrypted_path.into(),
        }
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    pub fn encrypted_path(&self) -> &Path {
        &self.encrypted_path
    }

    /// Bundle the credential file with `store_id` and write the encrypted file
    pub fn seal(&self, store_id: &str, password: &str) -> VaultResult<()> {
        let store_id = store_id.trim();
        if store_id.is_empty() {
            return Err(VaultError::Validation("store identifier is required".to_string()));
        }
        let credentials = read_existing(&self.key_path)?;

        let bundle = CredentialBundle::new(store_id, credentials);
        let token = cipher::lock(&bundle, password)?;
        atomic_write(&self.encrypted_path, &token)?;

        info!(path = %self.encrypted_path.display(), "credentials locked");
        Ok(())
    }

    /// Decrypt the encrypted file and regenerate the credential file
    ///
    /// Nothing is written unless decryption succeeds.
    pub fn open(&self, password: &str) -> VaultResult<CredentialBundle> {
        let token = read_existing(&self.encrypted_path)?;
        let bundle = cipher::unlock(&token, password)?;

        write_private(&self.key_path, &bundle.credentials)?;
        info!(path = %self.key_path.display(), "credentials unlocked");
        Ok(bundle)
    }
}

fn read_existing(path: &Path) -> VaultResult<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(VaultError::MissingFile(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Write `data` through an owner-only temp file, then rename it into place
#[cfg(unix)]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("tmp");
    // mode applies only on creation, so a leftover temp file must go first
    match std::fs::remove_file(&temp_path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    std::fs::rename(temp_path, path)
}

#[cfg(not(unix))]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    atomic_write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault(temp: &TempDir) -> Vault {
        Vault::new(
            temp.path().join(".aruni.key"),
            temp.path().join(".aruni.key.enc"),
        )
    }

    #[test]
    fn test_seal_requires_credential_file() {
        let temp = TempDir::new().unwrap();
        let err = vault(&temp).seal("sheet-1", "open sesame").unwrap_err();
        assert!(matches!(err, VaultError::MissingFile(_)));
    }

    #[test]
    fn test_seal_requires_store_id() {
        let temp = TempDir::new().unwrap();
        let vault = vault(&temp);
        std::fs::write(vault.key_path(), b"{}").unwrap();

        assert!(matches!(
            vault.seal("  ", "open sesame"),
            Err(VaultError::Validation(_))
        ));
        assert!(!vault.encrypted_path().exists());
    }

    #[test]
    fn test_open_requires_encrypted_file() {
        let temp = TempDir::new().unwrap();
        let err = vault(&temp).open("open sesame").unwrap_err();
        assert!(matches!(err, VaultError::MissingFile(ref p) if p.ends_with(".aruni.key.enc")));
    }

    #[cfg(unix)]
    #[test]
    fn test_regenerated_key_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let vault = vault(&temp);
        std::fs::write(vault.key_path(), b"{}").unwrap();
        vault.seal("sheet-1", "open sesame").unwrap();
        std::fs::remove_file(vault.key_path()).unwrap();

        vault.open("open sesame").unwrap();

        let mode = std::fs::metadata(vault.key_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_private_write_replaces_loose_temp_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".aruni.key");
        let stale = path.with_extension("tmp");
        std::fs::write(&stale, b"stale").unwrap();
        std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_private(&path, b"{\"type\":\"service_account\"}").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"{\"type\":\"service_account\"}");
        assert!(!stale.exists());
    }
}
