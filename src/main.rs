use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use classroom_repos::batch::{cancellation_channel, BatchOutcome, BatchReport};
use classroom_repos::commands::{
    handle_clone_command, handle_config_path, handle_config_set, handle_config_show,
    handle_list_assignments, handle_list_classrooms, handle_list_repos, handle_pull_command,
    handle_push_command, handle_token_delete, handle_token_set, handle_token_status,
};
use classroom_repos::settings::Settings;

const LOG_ENV: &str = "CLASSROOM_REPOS_LOG";

#[derive(Parser)]
#[command(name = "classroom")]
#[command(about = "Clone, pull and grade GitHub Classroom student repositories")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone every student repository of an assignment
    Clone {
        /// Assignment ID (see 'classroom list assignments')
        #[arg(short, long)]
        assignment: u64,
        /// Directory that receives '<assignment>-submissions'
        #[arg(short, long, default_value = ".")]
        directory: String,
    },
    /// Pull remote changes into every repository of a submissions directory
    Pull {
        directory: String,
    },
    /// Commit and push each feedback file to its repository
    Push {
        directory: String,
    },
    /// Browse classrooms, assignments and student repositories
    List {
        #[command(subcommand)]
        what: ListCommands,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Manage the GitHub token
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    Classrooms,
    Assignments { classroom_id: u64 },
    Repos { assignment_id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    Show,
    /// Print the settings file location
    Path,
    /// Set one of: filename, message, title, grade
    Set { key: String, value: String },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Store a token (prompts when omitted)
    Set { token: Option<String> },
    Delete,
    /// Report where the token is found
    Status,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit code for a finished batch
fn exit_code(report: &BatchReport) -> i32 {
    match report.outcome {
        BatchOutcome::Cancelled => 130,
        BatchOutcome::Completed | BatchOutcome::NothingToDo => 0,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (cancel_tx, cancel_rx) = cancellation_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let report = match cli.command {
        Commands::Clone {
            assignment,
            directory,
        } => {
            let settings = Settings::load()?;
            handle_clone_command(assignment, &directory, &settings, cancel_rx).await?
        }
        Commands::Pull { directory } => handle_pull_command(&directory, cancel_rx).await?,
        Commands::Push { directory } => {
            let settings = Settings::load()?;
            handle_push_command(&directory, &settings, cancel_rx).await?
        }
        Commands::List { what } => {
            let settings = Settings::load()?;
            match what {
                ListCommands::Classrooms => handle_list_classrooms(&settings).await?,
                ListCommands::Assignments { classroom_id } => {
                    handle_list_assignments(classroom_id, &settings).await?
                }
                ListCommands::Repos { assignment_id } => {
                    handle_list_repos(assignment_id, &settings).await?
                }
            }
            return Ok(());
        }
        Commands::Config { action } => {
            match action {
                ConfigCommands::Show => handle_config_show(&Settings::load()?)?,
                ConfigCommands::Path => handle_config_path()?,
                ConfigCommands::Set { key, value } => handle_config_set(&key, &value)?,
            }
            return Ok(());
        }
        Commands::Token { action } => {
            match action {
                TokenCommands::Set { token } => handle_token_set(token)?,
                TokenCommands::Delete => handle_token_delete()?,
                TokenCommands::Status => handle_token_status(&Settings::load()?)?,
            }
            return Ok(());
        }
    };

    let code = exit_code(&report);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
