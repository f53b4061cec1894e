use aruni_core::{local_now, Config, LearnerOverview, Progress};

use super::open_tracker;

pub fn run(user: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let tracker = open_tracker(&config)?;
    let today = local_now().date();

    match user {
        Some(user) => print!("{}", render_learner(user, &tracker.status(user, today)?)),
        None => print!("{}", render_overview(&tracker.overview(today)?)),
    }
    Ok(())
}

pub fn render_learner(user: &str, progress: &Progress) -> String {
    format!(
        "Learner  : {user}\n\
         Total    : {} concepts\n\
         Due today: {}\n\
         High     : {} | Medium: {} | Low: {}\n",
        progress.total, progress.due, progress.high, progress.medium, progress.low
    )
}

pub fn render_overview(overview: &[LearnerOverview]) -> String {
    if overview.is_empty() {
        return "No learners yet. Add one with `aruni add-user`.\n".to_string();
    }

    let mut out = String::new();
    for entry in overview {
        let profile = &entry.profile;
        match &entry.progress {
            Some(p) => {
                out.push_str(&format!(
                    "{:<16} {:>4} concepts {:>4} due  (H {} / M {} / L {})\n",
                    profile.user, p.total, p.due, p.high, p.medium, p.low
                ));
            }
            None => {
                out.push_str(&format!("{:<16} worksheet missing\n", profile.user));
            }
        }
    }
    out
}
