mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    // Diagnostics go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Due { user } => commands::due::run(&user),
        Commands::Add {
            user,
            topic,
            domain,
            explanation,
            question,
        } => commands::add::run(&user, &topic, &domain, &explanation, &question),
        Commands::Update { user, row, outcome } => commands::update::run(&user, row, &outcome),
        Commands::SessionStart { user, domain } => commands::session::start(&user, &domain),
        Commands::SessionEnd {
            user,
            row,
            topics,
            insights,
        } => commands::session::end(&user, row, &topics, &insights),
        Commands::Status { user } => commands::status::run(user.as_deref()),
        Commands::Init => commands::init::run(),
        Commands::AddUser {
            user,
            name,
            email,
            domain,
            goal,
            instructions,
        } => commands::add_user::run(commands::add_user::NewLearner {
            user,
            name,
            email,
            domain,
            goal,
            instructions,
        }),
        Commands::Migrate { user, file } => commands::migrate::run(&user, &file),
        Commands::Digest { user, json } => commands::digest::run(user.as_deref(), json),
        Commands::Lock { store_id } => commands::lock::run(store_id.as_deref()),
        Commands::Unlock => commands::unlock::run(),
        Commands::Version => commands::version::run(),
    }
}
