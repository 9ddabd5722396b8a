use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use leaderboard_client::export::CSV_FILE_NAME;
use leaderboard_client::health::DEFAULT_POLL_INTERVAL;
use leaderboard_client::{LeaderboardClient, LeaderboardSession, DEFAULT_API_URL};

mod commands;
mod name_store;
mod prompt;

use commands::ViewOpts;
use name_store::NameStore;
use prompt::StdinConfirm;

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(about = "Submit, browse and manage leaderboard scores")]
struct Args {
    /// Base URL of the leaderboard API
    #[arg(long, env = "LEADERBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api: String,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct ViewArgs {
    /// Only show names containing this text (case-insensitive)
    #[arg(long)]
    filter: Option<String>,

    /// Sort low to high instead of high to low
    #[arg(long)]
    asc: bool,
}

impl From<ViewArgs> for ViewOpts {
    fn from(args: ViewArgs) -> Self {
        ViewOpts {
            filter: args.filter,
            ascending: args.asc,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show the top scores
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Submit a score; the name is remembered for next time
    Submit {
        /// Whole-number score from 0 to 1000000
        score: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Change the name and/or score of an entry
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        score: Option<String>,
    },
    /// Delete an entry
    Delete { id: String },
    /// Write the displayed scores as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,
        /// File to write; `-` prints to stdout
        #[arg(short, long, default_value = CSV_FILE_NAME)]
        output: PathBuf,
    },
    /// Print a plain-text summary of the top three
    Top3 {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show which database the API is using
    Health {
        /// Keep polling and print every change
        #[arg(long)]
        watch: bool,
        /// Seconds between polls when watching [default: 10]
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let session = LeaderboardSession::new(LeaderboardClient::new(args.api));
    let mut confirm = StdinConfirm {
        assume_yes: args.yes,
    };

    let result = match args.command {
        Command::List { view } => commands::list(session, view.into()).await,
        Command::Submit { score, name } => {
            commands::submit(session, NameStore::from_env(), name, score).await
        }
        Command::Edit { id, name, score } => {
            commands::edit(session, id, name, score, &mut confirm).await
        }
        Command::Delete { id } => commands::delete(session, id, &mut confirm).await,
        Command::Export { view, output } => commands::export(session, view.into(), output).await,
        Command::Top3 { view } => commands::top3(session, view.into()).await,
        Command::Health { watch, interval } => {
            let interval = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or(DEFAULT_POLL_INTERVAL);
            commands::health(session, watch, interval).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn submit_parses_name_and_score() {
        let args = Args::try_parse_from(["leaderboard", "submit", "42", "--name", "Ann"]).unwrap();
        match args.command {
            Command::Submit { score, name } => {
                assert_eq!(score, "42");
                assert_eq!(name.as_deref(), Some("Ann"));
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn export_defaults_to_csv_file() {
        let args = Args::try_parse_from(["leaderboard", "export"]).unwrap();
        match args.command {
            Command::Export { output, .. } => assert_eq!(output, PathBuf::from("leaderboard.csv")),
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn health_interval_is_optional() {
        let args = Args::try_parse_from(["leaderboard", "health", "--watch"]).unwrap();
        assert!(matches!(args.command, Command::Health { watch: true, interval: None }));
    }

    #[test]
    fn yes_is_global() {
        let args = Args::try_parse_from(["leaderboard", "delete", "abc", "--yes"]).unwrap();
        assert!(args.yes);
    }
}
