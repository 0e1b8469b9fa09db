//! Price extraction.

use tradebot_core::{Currency, Price};

use crate::patterns::{Grammar, try_decimal};

/// Find the first `<number><currency letter>` token in `message`.
///
/// Later price tokens are ignored. A message without one has no price.
pub(crate) fn extract_price(grammar: &Grammar, message: &str) -> Option<Price> {
    let caps = grammar.price.captures(message)?;
    let amount = try_decimal(caps.get(1)?.as_str())?;
    let token = caps.get(2)?.as_str().chars().next()?;
    let currency = Currency::from_token(token)?;
    Some(Price::new(amount, currency))
}
