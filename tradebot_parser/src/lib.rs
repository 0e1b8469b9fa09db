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

//! Chat-log trade line parser.
//!
//! Converts lines such as
//! `[00:19:24] <Valentyan> (Cad) WTS [rare iron pickaxe QL:96.0 WoA 89] 10s`
//! into [`TradeRecord`]s and projects them into plain maps for storage.

pub mod batch;
mod error;
mod items;
mod parser;
pub mod patterns;
mod price;
pub mod projection;

pub use batch::{BatchReport, ingest};
pub use error::{Error, Result};
pub use parser::TradeParser;
pub use projection::{project, project_on};

pub use tradebot_core::{
    Currency, FilterMode, Item, ItemAttribute, Price, Rarity, Record, TradeRecord, TradeType,
};
