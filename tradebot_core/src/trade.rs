//! Trade record types.
//!
//! A trade record is the structured form of one chat-log trade line: who
//! posted it, on which server, with what intent, and which items and price
//! the message mentions. Records are built fresh per line and never mutated
//! afterwards.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a label does not name a member of a fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {label:?}")]
pub struct LabelError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected label.
    pub label: String,
}

impl LabelError {
    fn new(kind: &'static str, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
        }
    }
}

/// The intent announced by a trade line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    /// Want to sell.
    Wts,
    /// Want to buy.
    Wtb,
    /// Want to trade.
    Wtt,
    /// Price check.
    Pc,
}

impl TradeType {
    pub const ALL: [Self; 4] = [Self::Wts, Self::Wtb, Self::Wtt, Self::Pc];

    /// Returns the chat keyword for this trade type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wts => "WTS",
            Self::Wtb => "WTB",
            Self::Wtt => "WTT",
            Self::Pc => "PC",
        }
    }
}

/// Keywords are case-sensitive: `wts` is not a trade keyword.
impl FromStr for TradeType {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WTS" => Ok(Self::Wts),
            "WTB" => Ok(Self::Wtb),
            "WTT" => Ok(Self::Wtt),
            "PC" => Ok(Self::Pc),
            _ => Err(LabelError::new("trade type", s)),
        }
    }
}

/// Quality tier of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Supreme,
    Fantastic,
}

impl Rarity {
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Supreme, Self::Fantastic];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Supreme => "supreme",
            Self::Fantastic => "fantastic",
        }
    }
}

impl FromStr for Rarity {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "rare" => Ok(Self::Rare),
            "supreme" => Ok(Self::Supreme),
            "fantastic" => Ok(Self::Fantastic),
            _ => Err(LabelError::new("rarity", s)),
        }
    }
}

/// Coin denomination of a price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Gold,
    Silver,
    Copper,
    Iron,
}

impl Currency {
    /// Maps a single-letter price suffix (`g`, `s`, `c`, `i`) to its currency.
    #[must_use]
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            'g' => Some(Self::Gold),
            's' => Some(Self::Silver),
            'c' => Some(Self::Copper),
            'i' => Some(Self::Iron),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Copper => "copper",
            Self::Iron => "iron",
        }
    }

    /// Value of one coin of this denomination expressed in silver.
    #[must_use]
    pub const fn silver_rate(&self) -> f64 {
        match self {
            Self::Gold => 100.0,
            Self::Silver => 1.0,
            Self::Copper => 0.01,
            Self::Iron => 0.0001,
        }
    }
}

impl FromStr for Currency {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(Self::Gold),
            "silver" => Ok(Self::Silver),
            "copper" => Ok(Self::Copper),
            "iron" => Ok(Self::Iron),
            _ => Err(LabelError::new("currency", s)),
        }
    }
}

/// Parser-wide policy selecting trade lines by item presence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Accept every trade line.
    #[default]
    All,
    /// Accept only lines that mention at least one item.
    ItemsOnly,
    /// Accept only lines that mention no item.
    NoItems,
}

impl FilterMode {
    pub const ALL: [Self; 3] = [Self::All, Self::ItemsOnly, Self::NoItems];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ItemsOnly => "items_only",
            Self::NoItems => "no_items",
        }
    }

    /// Whether a trade line with or without items passes this filter.
    #[must_use]
    pub const fn admits(&self, has_items: bool) -> bool {
        match self {
            Self::All => true,
            Self::ItemsOnly => has_items,
            Self::NoItems => !has_items,
        }
    }
}

impl FromStr for FilterMode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(Self::All),
            "items_only" => Ok(Self::ItemsOnly),
            "no_items" => Ok(Self::NoItems),
            _ => Err(LabelError::new("filter mode", s)),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `name value` pair from an item's attribute span, e.g. `WoA 89`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub name: String,
    /// Kept as text; values are not range-checked.
    pub value: String,
}

impl ItemAttribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An item link found inside a trade message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Trimmed, never empty.
    pub name: String,
    pub rarity: Rarity,
    pub quality_level: Option<f64>,
    pub weight: Option<f64>,
    pub damage: Option<f64>,
    /// Partial-stack marker of the form `a/b`.
    pub fragment: Option<String>,
    pub attributes: Vec<ItemAttribute>,
}

impl Item {
    /// Create a common item with no optional fields set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rarity: Rarity::default(),
            quality_level: None,
            weight: None,
            damage: None,
            fragment: None,
            attributes: Vec::new(),
        }
    }

    /// Look up the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// An amount together with its currency. A record has both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: Currency,
}

impl Price {
    #[must_use]
    pub const fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// The amount converted to silver at the fixed exchange rates.
    #[must_use]
    pub fn in_silver(&self) -> f64 {
        self.amount * self.currency.silver_rate()
    }
}

/// One accepted trade line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Time of day from the line header; the calendar date is supplied by the caller.
    pub timestamp: NaiveTime,
    pub player_name: String,
    /// Full server name, or the raw code when it is not a known server.
    pub server: String,
    pub trade_type: TradeType,
    /// Raw text after the trade keyword.
    pub message: String,
    pub items: Vec<Item>,
    pub price: Option<Price>,
}

impl TradeRecord {
    #[must_use]
    pub fn price_amount(&self) -> Option<f64> {
        self.price.map(|p| p.amount)
    }

    #[must_use]
    pub fn price_currency(&self) -> Option<Currency> {
        self.price.map(|p| p.currency)
    }

    #[must_use]
    pub fn price_in_silver(&self) -> Option<f64> {
        self.price.as_ref().map(Price::in_silver)
    }

    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Combine the time of day with a calendar date.
    #[must_use]
    pub fn at_date(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_type_labels_round_trip() {
        for trade_type in TradeType::ALL {
            assert_eq!(trade_type.as_str().parse::<TradeType>(), Ok(trade_type));
        }
    }

    #[test]
    fn trade_type_is_case_sensitive() {
        assert!("wts".parse::<TradeType>().is_err());
        assert!("Pc".parse::<TradeType>().is_err());
    }

    #[test]
    fn rarity_defaults_to_common() {
        assert_eq!(Rarity::default(), Rarity::Common);
        for rarity in Rarity::ALL {
            assert_eq!(rarity.as_str().parse::<Rarity>(), Ok(rarity));
        }
    }

    #[test]
    fn currency_tokens() {
        assert_eq!(Currency::from_token('g'), Some(Currency::Gold));
        assert_eq!(Currency::from_token('s'), Some(Currency::Silver));
        assert_eq!(Currency::from_token('c'), Some(Currency::Copper));
        assert_eq!(Currency::from_token('i'), Some(Currency::Iron));
        assert_eq!(Currency::from_token('G'), None);
        assert_eq!(Currency::from_token('x'), None);
    }

    #[test]
    fn price_converts_to_silver() {
        assert!((Price::new(2.0, Currency::Gold).in_silver() - 200.0).abs() < f64::EPSILON);
        assert!((Price::new(50.0, Currency::Copper).in_silver() - 0.5).abs() < 1e-9);
        assert!((Price::new(10.0, Currency::Silver).in_silver() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn filter_mode_admits() {
        assert!(FilterMode::All.admits(true));
        assert!(FilterMode::All.admits(false));
        assert!(FilterMode::ItemsOnly.admits(true));
        assert!(!FilterMode::ItemsOnly.admits(false));
        assert!(!FilterMode::NoItems.admits(true));
        assert!(FilterMode::NoItems.admits(false));
    }

    #[test]
    fn filter_mode_parses_cli_spellings() {
        assert_eq!("items-only".parse::<FilterMode>(), Ok(FilterMode::ItemsOnly));
        assert_eq!("NO_ITEMS".parse::<FilterMode>(), Ok(FilterMode::NoItems));
        let err = "some".parse::<FilterMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown filter mode: \"some\"");
    }

    #[test]
    fn item_attribute_lookup() {
        let mut item = Item::named("iron pickaxe");
        item.attributes.push(ItemAttribute::new("WoA", "89"));
        assert_eq!(item.attribute("WoA"), Some("89"));
        assert_eq!(item.attribute("CoC"), None);
    }

    #[test]
    fn record_combines_with_date() {
        let record = TradeRecord {
            timestamp: NaiveTime::from_hms_opt(0, 19, 24).unwrap_or_default(),
            player_name: "Valentyan".to_string(),
            server: "Cadence".to_string(),
            trade_type: TradeType::Wtb,
            message: "shovel".to_string(),
            items: Vec::new(),
            price: None,
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default();
        assert_eq!(record.at_date(date).to_string(), "2024-03-15 00:19:24");
        assert_eq!(record.price_amount(), None);
        assert_eq!(record.price_currency(), None);
        assert!(!record.has_items());
    }
}
