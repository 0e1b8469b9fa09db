#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tradebot_config::Config;
use tradebot_core::FilterMode;
use tracing_subscriber::EnvFilter;

mod command;
mod sink;

use command::{
    CommandStrategy, InitStrategy, LineInput, LineStrategy, ParseInput, ParseStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "tradebot")]
#[command(about = "Turn chat-log trade lines into structured records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chat-log file and emit one JSON record per trade line
    Parse {
        /// Chat-log file to read
        file: PathBuf,

        /// Calendar date of the log (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        date: Option<NaiveDate>,

        /// Which trade lines to keep: all, items_only or no_items
        #[arg(short = 'f', long)]
        filter: Option<FilterMode>,

        /// Write records to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Parse a single line and print the record
    Line {
        /// The chat-log line
        text: String,

        /// Which trade lines to keep: all, items_only or no_items
        #[arg(short = 'f', long)]
        filter: Option<FilterMode>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load();
    let log_level = config
        .as_ref()
        .map_or("info", |config| config.log_level.as_str());
    init_tracing(log_level)?;

    match cli.command {
        Commands::Parse {
            file,
            date,
            filter,
            output,
        } => {
            let input = ParseInput {
                config: config?,
                file,
                date,
                filter,
                output,
            };
            ParseStrategy.execute(input).await?;
        }
        Commands::Line { text, filter } => {
            let input = LineInput {
                config: config?,
                text,
                filter,
            };
            LineStrategy.execute(input).await?;
        }
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
