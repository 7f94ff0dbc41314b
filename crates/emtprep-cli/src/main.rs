//! emtprep CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "emtprep", version, about = "EMT study and scenario trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available scenarios
    Scenarios {
        /// Read scenarios from a local seed file instead of the store
        #[arg(long)]
        file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Work through a branching scenario
    Run {
        /// Scenario ID to run
        #[arg(long)]
        scenario: String,

        /// Read scenarios from a local seed file instead of the store
        #[arg(long)]
        file: Option<PathBuf>,

        /// Scripted choices (comma-separated option IDs); prompts if absent
        #[arg(long)]
        choices: Option<String>,

        /// Submit the final score to the leaderboard
        #[arg(long)]
        submit: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Profile file path
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Take a multiple-choice test
    Quiz {
        /// Test ID (e.g. "test1")
        #[arg(long)]
        test: String,

        /// Read questions from a local seed file instead of the store
        #[arg(long)]
        file: Option<PathBuf>,

        /// Scripted answers (comma-separated keys, e.g. "A,C,B,D,A")
        #[arg(long)]
        answers: Option<String>,

        /// Submit the final score to the leaderboard
        #[arg(long)]
        submit: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Profile file path
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Show the leaderboard for a test
    Scores {
        /// Test ID (e.g. "test1")
        #[arg(long)]
        test: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Browse clinical practice guideline sections
    Guidelines {
        /// Section ID; lists sections when absent
        #[arg(long)]
        section: Option<String>,

        /// Guideline number within the section; prints its PDF URL
        #[arg(long)]
        number: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate local scenario seed files
    Validate {
        /// Path to a scenario JSON file or directory
        #[arg(long)]
        path: PathBuf,
    },

    /// Upload local seed files to the store
    Seed {
        /// Scenario seed file
        #[arg(long)]
        scenarios: Option<PathBuf>,

        /// Question seed file
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Set the username used on the leaderboard
    Login {
        /// Username to store
        #[arg(long)]
        username: String,

        /// Profile file path
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Clear the stored username
    Logout {
        /// Profile file path
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Create starter config and example seed data
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("emtprep=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scenarios { file, config } => commands::scenarios::execute(file, config).await,
        Commands::Run {
            scenario,
            file,
            choices,
            submit,
            config,
            profile,
        } => commands::run::execute(scenario, file, choices, submit, config, profile).await,
        Commands::Quiz {
            test,
            file,
            answers,
            submit,
            config,
            profile,
        } => commands::quiz::execute(test, file, answers, submit, config, profile).await,
        Commands::Scores { test, config } => commands::scores::execute(test, config).await,
        Commands::Guidelines {
            section,
            number,
            config,
        } => commands::guidelines::execute(section, number, config),
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::Seed {
            scenarios,
            questions,
            config,
        } => commands::seed::execute(scenarios, questions, config).await,
        Commands::Login { username, profile } => commands::profile::login(username, profile),
        Commands::Logout { profile } => commands::profile::logout(profile),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
