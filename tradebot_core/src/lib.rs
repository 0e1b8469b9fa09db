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

pub mod server;
pub mod sink;
pub mod trade;

pub use server::{KNOWN_SERVERS, resolve_server};
pub use sink::{MemorySink, Record, RecordSink};
pub use trade::{
    Currency, FilterMode, Item, ItemAttribute, LabelError, Price, Rarity, TradeRecord, TradeType,
};
