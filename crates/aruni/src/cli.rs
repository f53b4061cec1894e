use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aruni")]
#[command(version)]
#[command(about = "Spaced-repetition tracker for learning with an AI tutor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the concepts due for review today
    Due { user: String },

    /// Add a new concept, first review tomorrow
    Add {
        user: String,
        topic: String,
        domain: String,
        explanation: String,
        question: String,
    },

    /// Record a review outcome for a concept row
    Update {
        user: String,
        /// Worksheet row of the concept (the header is row 1)
        row: usize,
        /// correct or wrong
        outcome: String,
    },

    /// Log the start of a study session
    #[command(name = "session-start")]
    SessionStart { user: String, domain: String },

    /// Complete a session logged by session-start
    #[command(name = "session-end")]
    SessionEnd {
        user: String,
        row: usize,
        topics: String,
        insights: String,
    },

    /// Show review progress for one learner, or all of them
    Status { user: Option<String> },

    /// Create the shared config and sessions worksheets
    Init,

    /// Register a learner and create their worksheet
    #[command(name = "add-user")]
    AddUser {
        user: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Import concepts from a knowledge-base JSON export
    Migrate { user: String, file: String },

    /// Compose today's review reminders
    Digest {
        /// Only this learner
        user: Option<String>,
        /// Print reminders as JSON for a mail relay
        #[arg(long)]
        json: bool,
    },

    /// Encrypt the credential file for sharing
    Lock {
        /// Store identifier to bundle (defaults to ARUNI_DB)
        #[arg(long)]
        store_id: Option<String>,
    },

    /// Decrypt the shared credential file on this machine
    Unlock,

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["aruni", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_update() {
        let cli = Cli::try_parse_from(["aruni", "update", "asha", "4", "correct"]).unwrap();
        if let Commands::Update { user, row, outcome } = cli.command {
            assert_eq!(user, "asha");
            assert_eq!(row, 4);
            assert_eq!(outcome, "correct");
        } else {
            panic!("Expected Update command");
        }
    }

    #[test]
    fn test_cli_rejects_non_numeric_row() {
        assert!(Cli::try_parse_from(["aruni", "update", "asha", "four", "correct"]).is_err());
        assert!(Cli::try_parse_from(["aruni", "session-end", "asha", "x", "t", "i"]).is_err());
    }

    #[test]
    fn test_cli_parse_add_user_flags() {
        let cli = Cli::try_parse_from([
            "aruni",
            "add-user",
            "asha",
            "--email",
            "asha@example.org",
            "--goal",
            "read papers",
        ])
        .unwrap();
        if let Commands::AddUser {
            user, email, goal, name, ..
        } = cli.command
        {
            assert_eq!(user, "asha");
            assert_eq!(email.as_deref(), Some("asha@example.org"));
            assert_eq!(goal.as_deref(), Some("read papers"));
            assert!(name.is_none());
        } else {
            panic!("Expected AddUser command");
        }
    }

    #[test]
    fn test_cli_parse_optional_user() {
        for args in [&["aruni", "status"][..], &["aruni", "digest", "--json"]] {
            assert!(Cli::try_parse_from(args).is_ok(), "Failed to parse {:?}", args);
        }
    }

    #[test]
    fn test_cli_parse_session_commands() {
        assert!(Cli::try_parse_from(["aruni", "session-start", "asha", "rust"]).is_ok());
        assert!(Cli::try_parse_from(["aruni", "session-end", "asha", "2", "traits", "none"]).is_ok());
    }
}
