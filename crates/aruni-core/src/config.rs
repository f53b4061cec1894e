//! Configuration loaded once at process start
//!
//! Values come from the `.env` file in the aruni home directory, with process
//! environment variables taking precedence. The file is parsed, never injected
//! into the process environment; callers receive an explicit [`Config`].

use aruni_store::{atomic_write, Paths};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STORE_ID_KEY: &str = "ARUNI_DB";
pub const KEY_PATH_KEY: &str = "ARUNI_KEY_PATH";
pub const ENCRYPTED_KEY_PATH_KEY: &str = "ARUNI_KEY_ENC_PATH";
pub const STORE_DIR_KEY: &str = "ARUNI_STORE_DIR";
pub const SENDER_EMAIL_KEY: &str = "SENDER_EMAIL";
pub const MAIL_PASSWORD_KEY: &str = "GMAIL_APP_PASSWORD";

const KNOWN_KEYS: [&str; 6] = [
    STORE_ID_KEY,
    KEY_PATH_KEY,
    ENCRYPTED_KEY_PATH_KEY,
    STORE_DIR_KEY,
    SENDER_EMAIL_KEY,
    MAIL_PASSWORD_KEY,
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("home directory unavailable: {0}")]
    Home(#[from] std::io::Error),
}

/// Sender settings for review reminders
#[derive(Debug, Clone, Copy)]
pub struct MailSettings<'a> {
    pub sender_email: &'a str,
    pub app_password: &'a str,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Paths,
    pub store_id: Option<String>,
    /// Plaintext credential file, regenerated locally and never shared
    pub key_path: PathBuf,
    /// Ciphertext credential file, the only artifact safe to commit
    pub encrypted_key_path: PathBuf,
    pub stores_dir: PathBuf,
    pub sender_email: Option<String>,
    pub mail_app_password: Option<String>,
}

impl Config {
    /// Load from the default home directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Paths::new()?)
    }

    /// Load `<home>/.env` overlaid by process environment variables
    pub fn load_from(paths: Paths) -> Result<Self, ConfigError> {
        let mut values = read_env_file(&paths.env_file())?;
        for key in KNOWN_KEYS {
            if let Ok(value) = std::env::var(key) {
                values.insert(key.to_string(), value);
            }
        }
        Ok(Self::from_values(paths, &values))
    }

    /// Build from already collected key/value pairs; blank values count as unset
    pub fn from_values(paths: Paths, values: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let key_path = get(KEY_PATH_KEY)
            .map(|v| paths.resolve(&v))
            .unwrap_or_else(|| paths.key_file());
        let encrypted_key_path = get(ENCRYPTED_KEY_PATH_KEY)
            .map(|v| paths.resolve(&v))
            .unwrap_or_else(|| paths.encrypted_key_file());
        let stores_dir = get(STORE_DIR_KEY)
            .map(|v| paths.resolve(&v))
            .unwrap_or_else(|| paths.stores_dir());

        Self {
            store_id: get(STORE_ID_KEY),
            key_path,
            encrypted_key_path,
            stores_dir,
            sender_email: get(SENDER_EMAIL_KEY),
            mail_app_password: get(MAIL_PASSWORD_KEY),
            paths,
        }
    }

    pub fn require_store_id(&self) -> Result<&str, ConfigError> {
        self.store_id
            .as_deref()
            .ok_or(ConfigError::Missing(STORE_ID_KEY))
    }

    pub fn mail_settings(&self) -> Result<MailSettings<'_>, ConfigError> {
        let app_password = self
            .mail_app_password
            .as_deref()
            .ok_or(ConfigError::Missing(MAIL_PASSWORD_KEY))?;
        let sender_email = self
            .sender_email
            .as_deref()
            .ok_or(ConfigError::Missing(SENDER_EMAIL_KEY))?;
        Ok(MailSettings {
            sender_email,
            app_password,
        })
    }

    pub fn env_file(&self) -> EnvFile {
        EnvFile::new(self.paths.env_file())
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let mut values = HashMap::new();
    if !path.exists() {
        return Ok(values);
    }

    let unreadable = |source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    for item in dotenvy::from_path_iter(path).map_err(unreadable)? {
        let (key, value) = item.map_err(unreadable)?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Line-preserving editor for an env-style file
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the first `KEY=` line or append one; other lines are kept as-is
    ///
    /// Values are written single-quoted so dotenvy reads them back verbatim,
    /// spaces and `$` included. A value holding `'` or a line break cannot be
    /// quoted that way and is rejected.
    pub fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        if value.contains(['\'', '\n', '\r']) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{key} value cannot contain a quote or line break"),
            ));
        }
        let existing = if self.path.exists() {
            std::fs::read_to_string(&self.path)?
        } else {
            String::new()
        };

        let prefix = format!("{key}=");
        let entry = format!("{key}='{value}'");
        let mut lines: Vec<String> = existing.lines().map(str::to_string).collect();

        match lines.iter_mut().find(|l| l.trim_start().starts_with(&prefix)) {
            Some(line) => *line = entry,
            None => lines.push(entry),
        }

        let mut contents = lines.join("\n");
        contents.push('\n');
        atomic_write(&self.path, contents.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_under_home() {
        let config = Config::from_values(Paths::at("/srv/aruni"), &HashMap::new());

        assert_eq!(config.store_id, None);
        assert_eq!(config.key_path, PathBuf::from("/srv/aruni/.aruni.key"));
        assert_eq!(
            config.encrypted_key_path,
            PathBuf::from("/srv/aruni/.aruni.key.enc")
        );
        assert_eq!(config.stores_dir, PathBuf::from("/srv/aruni/stores"));
    }

    #[test]
    fn test_relative_paths_resolve_from_home() {
        let config = Config::from_values(
            Paths::at("/srv/aruni"),
            &values(&[(KEY_PATH_KEY, "keys/service.json"), (STORE_DIR_KEY, "/data")]),
        );

        assert_eq!(config.key_path, PathBuf::from("/srv/aruni/keys/service.json"));
        assert_eq!(config.stores_dir, PathBuf::from("/data"));
    }

    #[test]
    fn test_missing_required_values() {
        let config = Config::from_values(
            Paths::at("/srv/aruni"),
            &values(&[(STORE_ID_KEY, "  "), (SENDER_EMAIL_KEY, "a@x.org")]),
        );

        assert!(matches!(
            config.require_store_id(),
            Err(ConfigError::Missing(STORE_ID_KEY))
        ));
        assert!(matches!(
            config.mail_settings(),
            Err(ConfigError::Missing(MAIL_PASSWORD_KEY))
        ));
    }

    #[test]
    #[serial]
    fn test_load_reads_env_file_and_env_overrides() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".env"),
            "# local settings\nARUNI_DB=\"sheet-123\"\nSENDER_EMAIL=bot@x.org\n",
        )
        .unwrap();

        let original = std::env::var(SENDER_EMAIL_KEY).ok();
        unsafe { std::env::set_var(SENDER_EMAIL_KEY, "override@x.org") };
        let config = Config::load_from(Paths::at(temp.path()));
        match original {
            Some(v) => unsafe { std::env::set_var(SENDER_EMAIL_KEY, v) },
            None => unsafe { std::env::remove_var(SENDER_EMAIL_KEY) },
        }

        let config = config.unwrap();
        assert_eq!(config.require_store_id().unwrap(), "sheet-123");
        assert_eq!(config.sender_email.as_deref(), Some("override@x.org"));
    }

    #[test]
    fn test_env_file_updates_in_place() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "# keep me\nARUNI_DB=old\nOTHER=1\n").unwrap();

        let env = EnvFile::new(&path);
        env.set(STORE_ID_KEY, "new").unwrap();
        env.set(KEY_PATH_KEY, "/srv/aruni/.aruni.key").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# keep me\nARUNI_DB='new'\nOTHER=1\nARUNI_KEY_PATH='/srv/aruni/.aruni.key'\n"
        );
    }

    #[test]
    fn test_env_file_created_when_missing() {
        let temp = TempDir::new().unwrap();
        let env = EnvFile::new(temp.path().join("nested").join(".env"));

        env.set(STORE_ID_KEY, "sheet-1").unwrap();

        assert_eq!(
            std::fs::read_to_string(env.path()).unwrap(),
            "ARUNI_DB='sheet-1'\n"
        );
    }

    #[test]
    #[serial]
    fn test_env_file_values_load_back_verbatim() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("John Smith").join(".aruni");
        let paths = Paths::at(&home);
        let key_path = home.join(".aruni.key").display().to_string();

        let env = EnvFile::new(paths.env_file());
        env.set(STORE_ID_KEY, "team$shared").unwrap();
        env.set(KEY_PATH_KEY, &key_path).unwrap();

        let saved = [
            (STORE_ID_KEY, std::env::var(STORE_ID_KEY).ok()),
            (KEY_PATH_KEY, std::env::var(KEY_PATH_KEY).ok()),
        ];
        for (key, _) in &saved {
            unsafe { std::env::remove_var(key) };
        }
        let config = Config::load_from(paths);
        for (key, value) in saved {
            if let Some(v) = value {
                unsafe { std::env::set_var(key, v) };
            }
        }

        let config = config.unwrap();
        assert_eq!(config.require_store_id().unwrap(), "team$shared");
        assert_eq!(config.key_path, PathBuf::from(key_path));
    }

    #[test]
    fn test_env_file_rejects_unquotable_values() {
        let temp = TempDir::new().unwrap();
        let env = EnvFile::new(temp.path().join(".env"));

        for value in ["it's", "two\nlines"] {
            let err = env.set(STORE_ID_KEY, value).unwrap_err();
            assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        }
        assert!(!env.path().exists());
    }
}
