//! Trade line assembler.
//!
//! The only entry point of the parser. A line either matches the trade line
//! shape and passes the filter, producing a [`TradeRecord`], or produces
//! nothing. Nothing in here fails for uninteresting input.

use chrono::NaiveTime;
use rayon::prelude::*;
use std::str::FromStr;
use tracing::trace;
use tradebot_core::{FilterMode, Item, Price, TradeRecord, TradeType, resolve_server};

use crate::error::Result;
use crate::items::extract_items;
use crate::patterns::Grammar;
use crate::price::extract_price;

/// Stateless trade line parser bound to one filter mode.
///
/// Cheap to copy and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct TradeParser {
    grammar: &'static Grammar,
    filter_mode: FilterMode,
}

impl TradeParser {
    /// Create a parser with the given filter mode.
    ///
    /// # Errors
    /// Returns an error if the grammar fails to compile.
    pub fn new(filter_mode: FilterMode) -> Result<Self> {
        Ok(Self {
            grammar: Grammar::shared()?,
            filter_mode,
        })
    }

    /// Create a parser that accepts every trade line.
    pub fn accept_all() -> Result<Self> {
        Self::new(FilterMode::All)
    }

    #[must_use]
    pub const fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// Parse one chat-log line.
    ///
    /// Returns `None` for lines that are not trade lines and for trade lines
    /// excluded by the filter mode.
    #[must_use]
    pub fn parse_line(&self, line: &str) -> Option<TradeRecord> {
        let Some(caps) = self.grammar.line.captures(line) else {
            trace!(line, "not a trade line");
            return None;
        };

        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let Some(timestamp) = parse_time(field(1), field(2), field(3)) else {
            trace!(line, "trade line with impossible time of day");
            return None;
        };
        let trade_type = TradeType::from_str(field(6)).ok()?;
        let message = field(7);

        let items = self.extract_items(message);
        let price = self.extract_price(message);

        if !self.filter_mode.admits(!items.is_empty()) {
            trace!(line, filter = %self.filter_mode, "trade line filtered out");
            return None;
        }

        Some(TradeRecord {
            timestamp,
            player_name: field(4).to_string(),
            server: resolve_server(field(5)),
            trade_type,
            message: message.to_string(),
            items,
            price,
        })
    }

    /// Parse many lines in parallel.
    ///
    /// Returns accepted records tagged with their index in `lines`, in input order.
    #[must_use]
    pub fn parse_batch<S>(&self, lines: &[S]) -> Vec<(usize, TradeRecord)>
    where
        S: AsRef<str> + Sync,
    {
        lines
            .par_iter()
            .enumerate()
            .filter_map(|(index, line)| self.parse_line(line.as_ref()).map(|r| (index, r)))
            .collect()
    }

    /// Extract the item links of a message body.
    #[must_use]
    pub fn extract_items(&self, message: &str) -> Vec<Item> {
        extract_items(self.grammar, message)
    }

    /// Extract the first price token of a message body.
    #[must_use]
    pub fn extract_price(&self, message: &str) -> Option<Price> {
        extract_price(self.grammar, message)
    }
}

fn parse_time(hour: &str, minute: &str, second: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, second.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradebot_core::Currency;

    fn parser(mode: FilterMode) -> TradeParser {
        TradeParser::new(mode).unwrap_or_else(|e| panic!("{e}"))
    }

    const WITH_ITEM: &str = "[00:19:24] <Valentyan> (Cad) WTS [rare iron pickaxe QL:96.0086 DMG:0.0 WT:2.0 WoA 89 • CoC 93] 10s";
    const WITHOUT_ITEM: &str =
        "[00:19:24] <Valentyan> (Cad) WTB 100+C skiller pickaxe (grinding prospecting)";

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parses_header_fields() {
        let record = parser(FilterMode::All)
            .parse_line(WITHOUT_ITEM)
            .expect("trade line should parse");

        assert_eq!(record.timestamp, NaiveTime::from_hms_opt(0, 19, 24).expect("valid time"));
        assert_eq!(record.player_name, "Valentyan");
        assert_eq!(record.server, "Cadence");
        assert_eq!(record.trade_type, TradeType::Wtb);
        assert_eq!(record.message, "100+C skiller pickaxe (grinding prospecting)");
        assert!(record.items.is_empty());
        assert_eq!(record.price_amount(), None);
        assert_eq!(record.price_currency(), None);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parses_items_and_price() {
        let record = parser(FilterMode::All)
            .parse_line(WITH_ITEM)
            .expect("trade line should parse");

        assert_eq!(record.trade_type, TradeType::Wts);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].name, "iron pickaxe");
        assert_eq!(record.price_amount(), Some(10.0));
        assert_eq!(record.price_currency(), Some(Currency::Silver));
    }

    #[test]
    fn rejects_system_chatter() {
        for mode in FilterMode::ALL {
            assert!(
                parser(mode)
                    .parse_line("[15:23:26] <System> This is the Trade channel.")
                    .is_none()
            );
            assert!(parser(mode).parse_line("Invalid line format").is_none());
            assert!(parser(mode).parse_line("").is_none());
        }
    }

    #[test]
    fn rejects_impossible_time() {
        assert!(
            parser(FilterMode::All)
                .parse_line("[25:61:00] <Bob> (Har) WTS shovel")
                .is_none()
        );
    }

    #[test]
    fn unknown_server_passes_through() {
        let record = parser(FilterMode::All).parse_line("[12:00:00] <Bob> (Xan) PC [shovel]");
        assert_eq!(record.map(|r| r.server), Some("Xan".to_string()));
    }

    #[test]
    fn filter_modes() {
        let items_only = parser(FilterMode::ItemsOnly);
        assert!(items_only.parse_line(WITH_ITEM).is_some());
        assert!(items_only.parse_line(WITHOUT_ITEM).is_none());

        let no_items = parser(FilterMode::NoItems);
        assert!(no_items.parse_line(WITH_ITEM).is_none());
        assert!(no_items.parse_line(WITHOUT_ITEM).is_some());
    }

    #[test]
    fn batch_keeps_input_order() {
        let lines = [
            WITH_ITEM,
            "[15:23:26] <System> This is the Trade channel.",
            WITHOUT_ITEM,
        ];
        let parsed = parser(FilterMode::All).parse_batch(&lines);
        let indices: Vec<_> = parsed.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(parsed[1].1.trade_type, TradeType::Wtb);
    }
}
