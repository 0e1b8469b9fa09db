//! Chat-log ingestion.
//!
//! Feeds a whole log through the parser and hands every accepted record to
//! a [`RecordSink`] in input order.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use tradebot_core::RecordSink;

use crate::parser::TradeParser;
use crate::projection::{project, project_on};

/// Line counts from one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Every line in the input, blank ones included.
    pub lines_read: usize,
    pub blank_lines: usize,
    /// Records handed to the sink.
    pub accepted: usize,
    /// Non-blank lines that produced no record.
    pub skipped: usize,
}

/// Parse every line of `log` and pass the projected records to `sink`.
///
/// Lines are trimmed and blank lines ignored. When `date` is given each
/// record also carries a full `datetime`.
///
/// # Errors
/// Returns an error only if the sink fails.
pub async fn ingest<S>(
    parser: &TradeParser,
    log: &str,
    date: Option<NaiveDate>,
    sink: &mut S,
) -> anyhow::Result<BatchReport>
where
    S: RecordSink + ?Sized,
{
    let mut report = BatchReport::default();
    let mut lines = Vec::new();

    for line in log.lines() {
        report.lines_read += 1;
        let line = line.trim();
        if line.is_empty() {
            report.blank_lines += 1;
        } else {
            lines.push(line);
        }
    }

    let parsed = parser.parse_batch(&lines);
    report.accepted = parsed.len();
    report.skipped = lines.len() - parsed.len();

    for (_, record) in parsed {
        let projected = match date {
            Some(date) => project_on(&record, date),
            None => project(&record),
        };
        sink.accept(projected).await?;
    }
    sink.flush().await?;

    debug!(
        "Ingested {} lines: {} accepted, {} skipped, {} blank",
        report.lines_read, report.accepted, report.skipped, report.blank_lines
    );

    Ok(report)
}
