use aruni_core::Config;
use aruni_vault::{validate_password, Vault};

use super::read_passwords;

pub fn run(store_id: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let store_id = match store_id {
        Some(id) => id,
        None => config.require_store_id()?,
    };

    let passwords = read_passwords(std::io::stdin().lock(), 2)?;
    validate_password(&passwords[0], &passwords[1])?;

    let vault = Vault::new(&config.key_path, &config.encrypted_key_path);
    vault.seal(store_id, &passwords[0])?;
    println!("✓ Locked credentials into {}", vault.encrypted_path().display());
    println!("  Share this file; keep {} private", vault.key_path().display());
    Ok(())
}
