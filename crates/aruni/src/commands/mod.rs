pub mod add;
pub mod add_user;
pub mod digest;
pub mod due;
pub mod init;
pub mod lock;
pub mod migrate;
pub mod session;
pub mod status;
pub mod unlock;
pub mod update;
pub mod version;

use std::io::BufRead;

use anyhow::Context;
use aruni_core::{Config, Tracker};
use aruni_store::Workbook;

/// Environment variable that supplies the vault password non-interactively
pub const PASSWORD_ENV: &str = "ARUNI_PASSWORD";

/// Open the workbook named by `ARUNI_DB`
pub fn open_tracker(config: &Config) -> anyhow::Result<Tracker<Workbook>> {
    let store_id = config.require_store_id()?;
    let workbook = Workbook::open(&config.stores_dir, store_id)?;
    Ok(Tracker::new(workbook))
}

/// Read `count` passwords: all equal to `ARUNI_PASSWORD` when it is set,
/// otherwise one line each from `input`
pub fn read_passwords(input: impl BufRead, count: usize) -> anyhow::Result<Vec<String>> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(vec![password; count]);
    }

    let mut lines = input.lines();
    let mut passwords = Vec::with_capacity(count);
    for _ in 0..count {
        let line = lines
            .next()
            .context("expected a password on stdin")?
            .context("cannot read password from stdin")?;
        passwords.push(line.trim_end_matches('\r').to_string());
    }
    Ok(passwords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_read_passwords_from_lines() {
        unsafe { std::env::remove_var(PASSWORD_ENV) };
        let passwords = read_passwords("open sesame\r\nopen sesame\n".as_bytes(), 2).unwrap();
        assert_eq!(passwords, vec!["open sesame", "open sesame"]);
    }

    #[test]
    #[serial]
    fn test_read_passwords_short_input() {
        unsafe { std::env::remove_var(PASSWORD_ENV) };
        let err = read_passwords("only one\n".as_bytes(), 2).unwrap_err();
        assert!(err.to_string().contains("expected a password"));
    }

    #[test]
    #[serial]
    fn test_read_passwords_from_env() {
        unsafe { std::env::set_var(PASSWORD_ENV, "from env") };
        let passwords = read_passwords("ignored\n".as_bytes(), 2).unwrap();
        unsafe { std::env::remove_var(PASSWORD_ENV) };
        assert_eq!(passwords, vec!["from env", "from env"]);
    }
}
