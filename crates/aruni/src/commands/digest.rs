use aruni_core::{local_now, Config, DigestRun};

use super::open_tracker;

pub fn run(user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let tracker = open_tracker(&config)?;

    let digest = tracker.digest(local_now().date(), user)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&digest)?);
    } else {
        print!("{}", render(&digest));
    }
    Ok(())
}

pub fn render(digest: &DigestRun) -> String {
    let mut out = String::new();
    for reminder in &digest.reminders {
        out.push_str(&format!("To: {}\n", reminder.to));
        out.push_str(&format!("Subject: {}\n", reminder.subject));
        out.push('\n');
        out.push_str(&format!("{}\n", reminder.body.trim_end()));
        out.push_str(&"-".repeat(60));
        out.push('\n');
    }
    for (user, reason) in &digest.skipped {
        out.push_str(&format!("skipped {user}: {reason}\n"));
    }
    out
}
