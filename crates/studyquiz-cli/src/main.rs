//! studyquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use studyquiz_core::model::{BloomLevel, GradingStyle, Hardness};

mod commands;

#[derive(Parser)]
#[command(
    name = "studyquiz",
    version,
    about = "Turn study documents into practice quizzes"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the landing page
    Home,

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Optional display name
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Sign in and remember the access token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show your profile and uploaded documents
    Dashboard,

    /// Upload a PDF or PowerPoint document
    Upload {
        /// Path to the document
        path: PathBuf,
    },

    /// Inspect and manage uploaded documents
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },

    /// Create and inspect rulesets
    Ruleset {
        #[command(subcommand)]
        action: RulesetAction,
    },

    /// Generate a quiz from a processed document
    Generate {
        /// Document id (must be completed)
        #[arg(long)]
        file: String,

        /// Ruleset id
        #[arg(long)]
        ruleset: String,

        /// Focus questions on a topic
        #[arg(long)]
        topic: Option<String>,
    },

    /// Take a quiz interactively
    Take {
        quiz_id: String,
    },

    /// Finish a quiz and show the score
    Results {
        quiz_id: String,
    },

    /// Create a starter config file
    Init,
}

#[derive(Subcommand)]
enum FilesAction {
    /// List uploaded documents
    List,

    /// Show processing status of a document
    Status { file_id: String },

    /// Delete a document
    Delete { file_id: String },
}

#[derive(Subcommand)]
enum RulesetAction {
    /// Create a ruleset
    Create {
        /// Ruleset name
        #[arg(long, default_value = "")]
        name: String,

        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        hardness: Hardness,

        /// Number of questions (1-50)
        #[arg(long, default_value = "10")]
        questions: u32,

        /// Time limit in minutes; makes the quiz timed
        #[arg(long)]
        time_limit: Option<u32>,

        /// Grading style: end_only, immediate
        #[arg(long, default_value = "end_only")]
        grading_style: GradingStyle,

        /// Bloom levels (comma-separated, default: "remember,understand")
        #[arg(long, value_delimiter = ',')]
        bloom: Vec<BloomLevel>,
    },

    /// List your rulesets
    List,

    /// Show one ruleset
    Show { ruleset_id: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studyquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Home => commands::home::execute(),
        Commands::Signup {
            email,
            password,
            full_name,
        } => commands::auth::signup(config, email, password, full_name).await,
        Commands::Login { email, password } => {
            commands::auth::login(config, email, password).await
        }
        Commands::Logout => commands::auth::logout(config),
        Commands::Dashboard => commands::dashboard::execute(config).await,
        Commands::Upload { path } => commands::upload::execute(config, path).await,
        Commands::Files { action } => match action {
            FilesAction::List => commands::files::list(config).await,
            FilesAction::Status { file_id } => commands::files::status(config, &file_id).await,
            FilesAction::Delete { file_id } => commands::files::delete(config, &file_id).await,
        },
        Commands::Ruleset { action } => match action {
            RulesetAction::Create {
                name,
                hardness,
                questions,
                time_limit,
                grading_style,
                bloom,
            } => {
                commands::ruleset::create(
                    config,
                    commands::ruleset::CreateArgs {
                        name,
                        hardness,
                        questions,
                        time_limit,
                        grading_style,
                        bloom,
                    },
                )
                .await
            }
            RulesetAction::List => commands::ruleset::list(config).await,
            RulesetAction::Show { ruleset_id } => {
                commands::ruleset::show(config, &ruleset_id).await
            }
        },
        Commands::Generate {
            file,
            ruleset,
            topic,
        } => commands::generate::execute(config, file, ruleset, topic).await,
        Commands::Take { quiz_id } => commands::take::execute(config, quiz_id).await,
        Commands::Results { quiz_id } => commands::results::execute(config, quiz_id).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
