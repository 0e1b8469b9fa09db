//! Parse a whole chat-log file.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWrite;
use tracing::{info, warn};
use tradebot_config::Config;
use tradebot_core::FilterMode;
use tradebot_parser::{BatchReport, TradeParser, ingest};

use super::build_parser;
use crate::sink::JsonLinesSink;

/// Input parameters for the Parse command strategy.
#[derive(Debug, Clone)]
pub struct ParseInput {
    pub config: Config,
    /// Chat-log file to read
    pub file: PathBuf,
    /// Calendar date the log was written on
    pub date: Option<NaiveDate>,
    /// Filter override
    pub filter: Option<FilterMode>,
    /// Output override
    pub output: Option<PathBuf>,
}

/// Strategy for executing the Parse command.
///
/// Reads the log, parses every line and writes the accepted records as
/// newline-delimited JSON to a file or stdout.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let parser = build_parser(&input.config, input.filter)?;
        let log = read_log(&input.file).await?;

        let report = match input.output.or(input.config.output.path) {
            Some(path) => {
                info!("Writing records to {}", path.display());
                let sink = JsonLinesSink::create(&path).await?;
                run(&parser, &log, input.date, sink).await?
            }
            None => run(&parser, &log, input.date, JsonLinesSink::stdout()).await?,
        };

        info!(
            "Processed {}: {} lines, {} trades, {} skipped, {} blank",
            input.file.display(),
            report.lines_read,
            report.accepted,
            report.skipped,
            report.blank_lines
        );
        Ok(())
    }
}

async fn run<W>(
    parser: &TradeParser,
    log: &str,
    date: Option<NaiveDate>,
    mut sink: JsonLinesSink<W>,
) -> anyhow::Result<BatchReport>
where
    W: AsyncWrite + Unpin + Send,
{
    let report = ingest(parser, log, date, &mut sink).await?;
    info!("Wrote {} records", sink.written());
    Ok(report)
}

/// Read a log file, replacing invalid UTF-8 instead of failing.
async fn read_log(path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(
                "{} is not valid UTF-8, replacing invalid bytes",
                path.display()
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}
