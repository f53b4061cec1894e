use aruni_core::{local_now, Config, Outcome, Review};

use super::open_tracker;

pub fn run(user: &str, row: usize, outcome: &str) -> anyhow::Result<()> {
    let outcome: Outcome = outcome.parse()?;
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;

    let review = tracker.review(user, row, outcome, local_now())?;
    println!("{}", render(&review));
    Ok(())
}

pub fn render(review: &Review) -> String {
    format!(
        "Updated row {}: confidence={}, next_review={} (+{}d), reviews={}",
        review.row,
        review.confidence,
        review.next_review,
        review.interval_days,
        review.times_reviewed
    )
}
