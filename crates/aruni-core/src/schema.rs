//! Worksheet layouts and cell formats
//!
//! Dates are stored as zero-padded ISO-8601 text. Due selection compares
//! `next_review` cells as strings, which only orders correctly while every
//! writer keeps this exact padding.

/// Shared worksheet listing learners
pub const CONFIG_SHEET: &str = "config";

/// Shared worksheet logging learning sessions
pub const SESSIONS_SHEET: &str = "sessions";

pub const CONCEPT_HEADERS: [&str; 9] = [
    "topic",
    "domain",
    "explanation",
    "questions",
    "confidence",
    "created_at",
    "last_reviewed",
    "next_review",
    "times_reviewed",
];

pub const SESSION_HEADERS: [&str; 9] = [
    "user",
    "date",
    "start_time",
    "end_time",
    "duration_minutes",
    "domain",
    "concepts_covered",
    "key_insights",
    "open_questions",
];

pub const CONFIG_HEADERS: [&str; 7] = [
    "user",
    "name",
    "email",
    "domain",
    "learning_goal",
    "start_date",
    "custom_instructions",
];

/// 1-based concept columns written by a review
pub mod concept_col {
    pub const CONFIDENCE: usize = 5;
    pub const LAST_REVIEWED: usize = 7;
    pub const NEXT_REVIEW: usize = 8;
    pub const TIMES_REVIEWED: usize = 9;
}

/// 1-based session columns written when a session ends
pub mod session_col {
    pub const USER: usize = 1;
    pub const DATE: usize = 2;
    pub const START_TIME: usize = 3;
    pub const END_TIME: usize = 4;
    pub const DURATION_MINUTES: usize = 5;
    pub const CONCEPTS_COVERED: usize = 7;
    pub const KEY_INSIGHTS: usize = 8;
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const TIME_FORMAT: &str = "%H:%M";

#[cfg(test)]
mod tests {
    use super::*;

    fn column_of(headers: &[&str], name: &str) -> usize {
        headers.iter().position(|h| *h == name).unwrap() + 1
    }

    #[test]
    fn test_concept_columns_match_headers() {
        assert_eq!(column_of(&CONCEPT_HEADERS, "confidence"), concept_col::CONFIDENCE);
        assert_eq!(column_of(&CONCEPT_HEADERS, "last_reviewed"), concept_col::LAST_REVIEWED);
        assert_eq!(column_of(&CONCEPT_HEADERS, "next_review"), concept_col::NEXT_REVIEW);
        assert_eq!(column_of(&CONCEPT_HEADERS, "times_reviewed"), concept_col::TIMES_REVIEWED);
    }

    #[test]
    fn test_session_columns_match_headers() {
        assert_eq!(column_of(&SESSION_HEADERS, "user"), session_col::USER);
        assert_eq!(column_of(&SESSION_HEADERS, "date"), session_col::DATE);
        assert_eq!(column_of(&SESSION_HEADERS, "start_time"), session_col::START_TIME);
        assert_eq!(column_of(&SESSION_HEADERS, "end_time"), session_col::END_TIME);
        assert_eq!(
            column_of(&SESSION_HEADERS, "duration_minutes"),
            session_col::DURATION_MINUTES
        );
        assert_eq!(
            column_of(&SESSION_HEADERS, "concepts_covered"),
            session_col::CONCEPTS_COVERED
        );
        assert_eq!(column_of(&SESSION_HEADERS, "key_insights"), session_col::KEY_INSIGHTS);
    }
}
