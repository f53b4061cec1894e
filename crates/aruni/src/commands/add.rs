use aruni_core::{local_now, Config, NewConcept};

use super::open_tracker;

pub fn run(
    user: &str,
    topic: &str,
    domain: &str,
    explanation: &str,
    question: &str,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;
    let concept = NewConcept {
        topic: topic.to_string(),
        domain: domain.to_string(),
        explanation: explanation.to_string(),
        question: question.to_string(),
    };

    let (row, record) = tracker.add_concept(user, &concept, local_now())?;
    println!(
        "Added: '{}' at row {row}. Next review tomorrow ({})",
        record.topic,
        record.next_review.as_deref().unwrap_or("")
    );
    Ok(())
}
