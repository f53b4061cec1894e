use aruni_core::{local_now, Config, LearnerProfile};

use super::open_tracker;

/// Learner details collected from the command line
pub struct NewLearner {
    pub user: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub domain: Option<String>,
    pub goal: Option<String>,
    pub instructions: Option<String>,
}

impl NewLearner {
    fn into_profile(self) -> LearnerProfile {
        LearnerProfile {
            user: self.user,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            learning_goal: self.goal.unwrap_or_default(),
            start_date: String::new(),
            custom_instructions: self.instructions.unwrap_or_default(),
        }
    }
}

pub fn run(learner: NewLearner) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config)?;

    let (profile, created) = tracker.add_learner(learner.into_profile(), local_now().date())?;
    println!("✓ Added learner '{}' ({})", profile.user, profile.name);
    if created {
        println!("✓ Created worksheet '{}'", profile.user);
    }
    Ok(())
}
