use std::path::Path;

use aruni_core::{local_now, Config, ExportDocument};

use super::open_tracker;

pub fn run(user: &str, file: &str) -> anyhow::Result<()> {
    let export = ExportDocument::from_path(Path::new(file))?;
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;

    let count = tracker.import_concepts(user, &export, local_now())?;
    println!("✓ Imported {count} concept(s) into '{user}'");
    Ok(())
}
