use serde_json::Value;
use tracing::info;
use tradebot_config::Config;
use tradebot_core::FilterMode;
use tradebot_parser::project;

use super::build_parser;

/// Input parameters for the Line command strategy.
#[derive(Debug, Clone)]
pub struct LineInput {
    pub config: Config,
    /// The chat-log line to parse
    pub text: String,
    /// Filter override
    pub filter: Option<FilterMode>,
}

/// Strategy for parsing a single line and printing its record.
#[derive(Debug, Clone, Copy)]
pub struct LineStrategy;

impl super::CommandStrategy for LineStrategy {
    type Input = LineInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let parser = build_parser(&input.config, input.filter)?;

        let Some(record) = parser.parse_line(input.text.trim()) else {
            println!(
                "No trade record: not a trade line, or excluded by filter mode {}",
                parser.filter_mode()
            );
            return Ok(());
        };

        if let Some(silver) = record.price_in_silver() {
            info!("Price is worth {silver} silver");
        }

        let projected = Value::Object(project(&record));
        if input.config.output.pretty {
            println!("{}", serde_json::to_string_pretty(&projected)?);
        } else {
            println!("{projected}");
        }
        Ok(())
    }
}
