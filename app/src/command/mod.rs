//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch in `main` is fully static.

use tradebot_config::Config;
use tradebot_core::FilterMode;
use tradebot_parser::TradeParser;
use tracing::info;

mod init;
mod line;
mod parse;
mod version;

pub use init::InitStrategy;
pub use line::{LineInput, LineStrategy};
pub use parse::{ParseInput, ParseStrategy};
pub use version::VersionStrategy;

/// Build the parser for a command, letting the command-line filter win over the config.
fn build_parser(config: &Config, filter: Option<FilterMode>) -> anyhow::Result<TradeParser> {
    let filter_mode = filter.unwrap_or(config.parser.filter_mode);
    info!("Using filter mode: {filter_mode}");
    Ok(TradeParser::new(filter_mode)?)
}

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
