use std::io::BufRead;

use aruni_core::{Config, KEY_PATH_KEY, STORE_ID_KEY};
use aruni_vault::{CredentialBundle, Vault};
use tracing::warn;

use super::{read_passwords, PASSWORD_ENV};

/// Password attempts allowed when reading from stdin
pub const MAX_ATTEMPTS: usize = 3;

pub fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let vault = Vault::new(&config.key_path, &config.encrypted_key_path);
    let bundle = open_with_retries(&vault, std::io::stdin().lock())?;

    let env = config.env_file();
    env.set(STORE_ID_KEY, &bundle.store_id)?;
    env.set(KEY_PATH_KEY, &vault.key_path().display().to_string())?;

    println!("✓ Credentials written to {}", vault.key_path().display());
    println!("✓ Saved {STORE_ID_KEY} and {KEY_PATH_KEY} to {}", env.path().display());
    Ok(())
}

/// Open the vault, reading another password line after each wrong one
///
/// A password from `ARUNI_PASSWORD` gets a single attempt. When the input runs
/// out, the last vault error is returned.
pub fn open_with_retries(
    vault: &Vault,
    mut input: impl BufRead,
) -> anyhow::Result<CredentialBundle> {
    let interactive = std::env::var_os(PASSWORD_ENV).is_none();
    let mut password = read_passwords(&mut input, 1)?.remove(0);
    let mut attempt = 1;

    loop {
        match vault.open(&password) {
            Err(e) if e.is_recoverable() && interactive && attempt < MAX_ATTEMPTS => {
                warn!(attempt, "{e}, try again");
                match read_passwords(&mut input, 1) {
                    Ok(mut next) => password = next.remove(0),
                    Err(_) => return Err(e.into()),
                }
                attempt += 1;
            }
            result => return Ok(result?),
        }
    }
}
