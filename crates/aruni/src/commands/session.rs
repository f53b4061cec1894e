use aruni_core::{local_now, Config};

use super::open_tracker;

pub fn start(user: &str, domain: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;

    let started = tracker.start_session(user, domain, local_now())?;
    println!(
        "SESSION_START: row={} time={} date={}",
        started.row, started.start_time, started.date
    );
    Ok(())
}

pub fn end(user: &str, row: usize, topics: &str, insights: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;

    let ended = tracker.end_session(user, row, topics, insights, local_now())?;
    let duration = ended
        .duration_minutes
        .map(|m| format!("{m} min"))
        .unwrap_or_else(|| "unknown duration".to_string());
    println!("Session complete: {duration} | topics: {}", ended.concepts_covered);
    Ok(())
}
