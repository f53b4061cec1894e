use aruni_core::Config;

use super::open_tracker;

pub fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;

    let created = tracker.init_store()?;
    if created.is_empty() {
        println!("Workbook already initialized");
    } else {
        for name in created {
            println!("✓ Created worksheet '{name}'");
        }
    }
    Ok(())
}
