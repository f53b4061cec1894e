//! Plain-text review reminders

use chrono::NaiveDate;
use serde::Serialize;

use crate::due::Due;
use crate::types::LearnerProfile;

/// One reminder ready to hand to a mail relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub user: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub due_count: usize,
}

pub fn compose(profile: &LearnerProfile, due: &[Due<'_>], today: NaiveDate) -> Reminder {
    let name = profile.display_name();
    let domain = &profile.domain;
    let date = today.format("%A, %B %d, %Y");

    let (subject, body) = if due.is_empty() {
        let body = format!(
            "All caught up!\n{date}\n\n\
             {name}, no concepts are due for review today in {domain}.\n\n\
             Ideas for today:\n  \
             - Ask your assistant to teach you something new\n  \
             - Read something and discuss it\n  \
             - Ask a question you've been curious about\n"
        );
        (format!("All caught up! - {domain}"), body)
    } else {
        let mut body = format!(
            "Your Daily Review\n{date}\n\n\
             Good morning {name}! You have {} concept(s) in {domain} ready for review.\n\
             Answer from memory (no peeking!):\n\n",
            due.len()
        );
        for (i, d) in due.iter().enumerate() {
            let question: &str = if d.concept.question.is_empty() {
                "(no question set)"
            } else {
                &d.concept.question
            };
            body.push_str(&format!(
                "{}. {} [{}]\n   {}\n   Reviewed {} time(s)\n\n",
                i + 1,
                d.concept.topic,
                d.concept.confidence_label(),
                question,
                d.concept.times_reviewed
            ));
        }
        body.push_str("When you're ready, tell your assistant: \"I'm ready to review\"\n");
        (format!("{} concept(s) to review - {domain}", due.len()), body)
    };

    Reminder {
        user: profile.user.clone(),
        to: profile.email.clone(),
        subject,
        body,
        due_count: due.len(),
    }
}
