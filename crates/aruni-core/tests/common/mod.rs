#![allow(dead_code)]

use aruni_core::{LearnerProfile, Tracker};
use aruni_store::MemoryStore;
use chrono::{NaiveDate, NaiveDateTime};

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn at(date: &str, h: u32, m: u32) -> NaiveDateTime {
    day(date).and_hms_opt(h, m, 0).unwrap()
}

pub fn profile(user: &str, email: &str) -> LearnerProfile {
    LearnerProfile {
        user: user.to_string(),
        email: email.to_string(),
        domain: "Physics".to_string(),
        ..Default::default()
    }
}

/// Tracker over an initialized store with one learner, `asha`
pub fn sample_tracker() -> Tracker<MemoryStore> {
    let mut tracker = Tracker::new(MemoryStore::new());
    tracker.init_store().unwrap();
    tracker
        .add_learner(profile("asha", "asha@example.org"), day("2024-01-01"))
        .unwrap();
    tracker
}
