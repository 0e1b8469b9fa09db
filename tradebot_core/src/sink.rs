//! Storage collaborator seam.
//!
//! The parser hands projected records to a sink and knows nothing about how
//! they are stored.

use async_trait::async_trait;

/// A projected trade record: field name to plain JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait RecordSink: Send {
    /// Accept one record. Records arrive in input order.
    async fn accept(&mut self, record: Record) -> anyhow::Result<()>;

    /// Flush anything buffered. Called once after the last record.
    async fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<Record>,
}

impl MemorySink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn accept(&mut self, record: Record) -> anyhow::Result<()> {
        self.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        for player in ["Alice", "Bob"] {
            let mut record = Record::new();
            record.insert("player_name".to_string(), json!(player));
            sink.accept(record).await.expect("memory sink never fails");
        }
        sink.flush().await.expect("memory sink never fails");

        let names: Vec<_> = sink
            .records()
            .iter()
            .filter_map(|r| r.get("player_name").and_then(|v| v.as_str()))
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }
}
