use aruni_core::{local_now, Agenda, Config};

use super::open_tracker;

pub fn run(user: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let tracker = open_tracker(&config)?;
    let agenda = tracker.agenda(user, local_now().date())?;
    print!("{}", render(&agenda));
    Ok(())
}

pub fn render(agenda: &Agenda) -> String {
    let due = agenda.due();
    let mut out = String::new();
    out.push_str(&format!("TODAY: {}\n", agenda.today.format("%Y-%m-%d")));
    out.push_str(&format!(
        "TOTAL: {} concepts | DUE: {}\n",
        agenda.concepts.len(),
        due.len()
    ));

    if due.is_empty() {
        out.push_str("Nothing due today. Great work!\n");
        return out;
    }

    out.push('\n');
    for (i, item) in due.iter().enumerate() {
        let concept = item.concept;
        let question = if concept.question.trim().is_empty() {
            "(no question)"
        } else {
            concept.question.as_str()
        };
        out.push_str(&format!(
            "  [{}] row={} [{}] {}\n",
            i + 1,
            item.row,
            concept.confidence_label(),
            concept.topic
        ));
        out.push_str(&format!("       Q: {question}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aruni_core::{Confidence, ConceptRecord};
    use chrono::NaiveDate;

    fn concept(topic: &str, next_review: &str, question: &str) -> ConceptRecord {
        ConceptRecord {
            topic: topic.to_string(),
            domain: "rust".to_string(),
            explanation: String::new(),
            question: question.to_string(),
            confidence: Some(Confidence::Low),
            created_at: "2024-01-01 09:00".to_string(),
            last_reviewed: None,
            next_review: Some(next_review.to_string()),
            times_reviewed: 0,
        }
    }

    #[test]
    fn test_render_lists_due_rows() {
        let agenda = Agenda {
            today: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            concepts: vec![
                concept("ownership", "2024-01-09", "who frees?"),
                concept("lifetimes", "2024-01-05", ""),
            ],
        };
        let out = render(&agenda);

        assert!(out.contains("TOTAL: 2 concepts | DUE: 1"));
        assert!(out.contains("[1] row=3 [Low] lifetimes"));
        assert!(out.contains("Q: (no question)"));
        assert!(!out.contains("ownership"));
    }

    #[test]
    fn test_render_nothing_due() {
        let agenda = Agenda {
            today: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            concepts: vec![],
        };
        assert!(render(&agenda).contains("Nothing due today"));
    }
}
