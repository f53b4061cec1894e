//! Path resolution for the aruni home directory

use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory
pub const HOME_ENV: &str = "ARUNI_HOME";

/// Resolves standard paths under the aruni home directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
}

impl Paths {
    /// Resolve from `ARUNI_HOME`, falling back to `~/.aruni`
    pub fn new() -> std::io::Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(home)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::at(home.join(".aruni")))
    }

    /// Use an explicit home directory
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Get `.env` path
    pub fn env_file(&self) -> PathBuf {
        self.home.join(".env")
    }

    /// Get default plaintext credential file path
    pub fn key_file(&self) -> PathBuf {
        self.home.join(".aruni.key")
    }

    /// Get default ciphertext path (the only credential artifact safe to commit)
    pub fn encrypted_key_file(&self) -> PathBuf {
        self.home.join(".aruni.key.enc")
    }

    /// Get default root directory for local workbooks
    pub fn stores_dir(&self) -> PathBuf {
        self.home.join("stores")
    }

    /// Resolve a configured path; relative values are taken from the home directory
    pub fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.home.join(path)
        }
    }
}
