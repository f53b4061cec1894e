//! Spaced-repetition review scheduler
//!
//! A correct answer walks the interval ladder 1, 3, 7, 14 days and then stays
//! at 30 days. Confidence is promoted by review count alone (Medium from the
//! third review, High from the fifth) and any wrong answer resets it to Low
//! with a next-day retry.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::schema::{DATETIME_FORMAT, DATE_FORMAT};
use crate::types::{Confidence, ConceptRecord, Outcome};

/// Interval in days keyed by the review count after the review
const INTERVAL_LADDER: [(u32, i64); 4] = [(1, 1), (2, 3), (3, 7), (4, 14)];

/// Interval once the ladder is exhausted
pub const MATURE_INTERVAL_DAYS: i64 = 30;

/// Interval after a wrong answer
pub const RETRY_INTERVAL_DAYS: i64 = 1;

pub const MEDIUM_AFTER_REVIEWS: u32 = 3;
pub const HIGH_AFTER_REVIEWS: u32 = 5;

/// Updated review fields for a concept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub confidence: Confidence,
    pub next_review: NaiveDate,
    pub times_reviewed: u32,
    pub interval_days: i64,
}

impl Schedule {
    pub fn next_review_cell(&self) -> String {
        self.next_review.format(DATE_FORMAT).to_string()
    }
}

/// Interval after a correct answer that brings the count to `times_reviewed`
pub fn interval_days(times_reviewed: u32) -> i64 {
    INTERVAL_LADDER
        .iter()
        .find(|(count, _)| *count == times_reviewed)
        .map(|(_, days)| *days)
        .unwrap_or(MATURE_INTERVAL_DAYS)
}

/// Compute the schedule after one review
///
/// `times_before` of zero is the first review. A `prior` of `None` means the
/// confidence cell was never set and is treated as Low.
pub fn schedule(
    times_before: u32,
    prior: Option<Confidence>,
    outcome: Outcome,
    today: NaiveDate,
) -> Schedule {
    let times_reviewed = times_before.saturating_add(1);

    let (interval_days, confidence) = match outcome {
        Outcome::Wrong => (RETRY_INTERVAL_DAYS, Confidence::Low),
        Outcome::Correct => {
            let confidence = if times_reviewed >= HIGH_AFTER_REVIEWS {
                Confidence::High
            } else if times_reviewed >= MEDIUM_AFTER_REVIEWS {
                Confidence::Medium
            } else {
                prior.unwrap_or(Confidence::Low)
            };
            (interval_days(times_reviewed), confidence)
        }
    };

    Schedule {
        confidence,
        next_review: today + Duration::days(interval_days),
        times_reviewed,
        interval_days,
    }
}

/// Fields a concept starts with: Low confidence, unreviewed, due tomorrow
pub fn new_concept(
    topic: &str,
    domain: &str,
    explanation: &str,
    question: &str,
    now: NaiveDateTime,
) -> ConceptRecord {
    let tomorrow = now.date() + Duration::days(1);
    ConceptRecord {
        topic: topic.to_string(),
        domain: domain.to_string(),
        explanation: explanation.to_string(),
        question: question.to_string(),
        confidence: Some(Confidence::Low),
        created_at: now.format(DATETIME_FORMAT).to_string(),
        last_reviewed: None,
        next_review: Some(tomorrow.format(DATE_FORMAT).to_string()),
        times_reviewed: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_correct_ladder() {
        let today = day("2024-03-01");
        let expected = [(0, 1), (1, 3), (2, 7), (3, 14), (4, 30), (10, 30)];

        for (before, days) in expected {
            let s = schedule(before, Some(Confidence::Low), Outcome::Correct, today);
            assert_eq!(s.interval_days, days, "times_before={before}");
            assert_eq!(s.next_review, today + Duration::days(days));
            assert_eq!(s.times_reviewed, before + 1);
        }
    }

    #[test]
    fn test_first_correct_review_keeps_low() {
        let s = schedule(0, Some(Confidence::Low), Outcome::Correct, day("2024-01-02"));
        assert_eq!(s.times_reviewed, 1);
        assert_eq!(s.next_review_cell(), "2024-01-03");
        assert_eq!(s.confidence, Confidence::Low);
    }

    #[test]
    fn test_promotion_thresholds() {
        let today = day("2024-01-02");
        assert_eq!(schedule(1, None, Outcome::Correct, today).confidence, Confidence::Low);
        assert_eq!(
            schedule(2, Some(Confidence::Low), Outcome::Correct, today).confidence,
            Confidence::Medium
        );
        assert_eq!(
            schedule(4, Some(Confidence::Medium), Outcome::Correct, today).confidence,
            Confidence::High
        );
    }

    #[test]
    fn test_fifth_correct_review() {
        let today = day("2024-02-10");
        let s = schedule(4, Some(Confidence::Medium), Outcome::Correct, today);
        assert_eq!(s.times_reviewed, 5);
        assert_eq!(s.confidence, Confidence::High);
        assert_eq!(s.next_review, day("2024-03-11"));
    }

    #[test]
    fn test_wrong_after_high_resets() {
        let today = day("2024-02-10");
        let s = schedule(4, Some(Confidence::High), Outcome::Wrong, today);
        assert_eq!(s.times_reviewed, 5);
        assert_eq!(s.confidence, Confidence::Low);
        assert_eq!(s.next_review, day("2024-02-11"));
    }

    #[test]
    fn test_high_is_kept_below_threshold() {
        let s = schedule(0, Some(Confidence::High), Outcome::Correct, day("2024-01-01"));
        assert_eq!(s.confidence, Confidence::High);
    }

    #[test]
    fn test_new_concept_defaults() {
        let now = day("2024-01-01").and_hms_opt(9, 5, 0).unwrap();
        let concept = new_concept("Entropy", "Physics", "Disorder", "What is it?", now);

        assert_eq!(concept.confidence, Some(Confidence::Low));
        assert_eq!(concept.times_reviewed, 0);
        assert_eq!(concept.last_reviewed, None);
        assert_eq!(concept.created_at, "2024-01-01 09:05");
        assert_eq!(concept.next_review.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_calendar_days_cross_month_and_leap_day() {
        let s = schedule(3, Some(Confidence::Medium), Outcome::Correct, day("2024-02-20"));
        assert_eq!(s.next_review, day("2024-03-05"));
    }

    fn any_confidence() -> impl Strategy<Value = Option<Confidence>> {
        prop_oneof![
            Just(None),
            Just(Some(Confidence::Low)),
            Just(Some(Confidence::Medium)),
            Just(Some(Confidence::High)),
        ]
    }

    proptest! {
        #[test]
        fn prop_wrong_always_resets(before in 0u32..1000, prior in any_confidence(), offset in 0i64..3650) {
            let today = day("2020-01-01") + Duration::days(offset);
            let s = schedule(before, prior, Outcome::Wrong, today);
            prop_assert_eq!(s.confidence, Confidence::Low);
            prop_assert_eq!(s.interval_days, 1);
            prop_assert_eq!(s.next_review, today + Duration::days(1));
        }

        #[test]
        fn prop_correct_never_demotes(before in 0u32..1000, prior in any_confidence()) {
            let s = schedule(before, prior, Outcome::Correct, day("2024-01-01"));
            prop_assert!(Some(s.confidence) >= prior);
            prop_assert_eq!(s.times_reviewed, before + 1);
        }
    }
}
