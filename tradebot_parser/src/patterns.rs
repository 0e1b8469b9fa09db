//! Grammar rules for chat-log trade lines.
//!
//! Every shape the parser recognizes is a regular expression compiled once
//! per process and shared by all parser instances.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::{Error, Result};

/// `[HH:MM:SS] <Player> (Srv) KEYWORD message`, anchored at the start of the line.
pub const LINE: &str =
    r"^\[([0-9]{2}):([0-9]{2}):([0-9]{2})\] <([^>]+)> \(([^)]+)\) (WTS|WTB|WTT|PC) (.+)";

/// A bracketed item link. Nested brackets are only allowed as fragment markers.
pub const ITEM: &str = r"\[((?:\[[0-9]+/[0-9]+\]|[^\[\]])*)\]";

/// Leading rarity word of an item body.
pub const RARITY: &str = r"^(common|rare|supreme|fantastic)\s";

/// Start of the numeric fields that end an item name.
pub const FIELD_START: &str = r"\s+(?:QL|DMG|WT):";

/// Numeric fields in fixed order, followed by the free-text attribute span.
pub const FIELDS: &str =
    r"^(?:\s+QL:(\S+))?(?:\s+DMG:(\S+))?(?:\s+WT:(\S+))?(?:\s+(.*?))?\s*$";

/// Partial-stack marker inside an item name.
pub const FRAGMENT: &str = r"\[([0-9]+)/([0-9]+)\]";

/// A `word number` pair inside the attribute span.
pub const ATTRIBUTE: &str = r"(\w+)\s+([0-9]+)";

/// A number immediately followed by a currency letter.
pub const PRICE: &str = r"([0-9]+(?:\.[0-9]+)?)([gsci])";

static SHARED: OnceCell<Grammar> = OnceCell::new();

/// The compiled grammar.
#[derive(Debug)]
pub struct Grammar {
    pub(crate) line: Regex,
    pub(crate) item: Regex,
    pub(crate) rarity: Regex,
    pub(crate) field_start: Regex,
    pub(crate) fields: Regex,
    pub(crate) fragment: Regex,
    pub(crate) attribute: Regex,
    pub(crate) price: Regex,
}

impl Grammar {
    /// Compile every rule.
    ///
    /// # Errors
    /// Returns an error naming the first rule that fails to compile.
    pub fn compile() -> Result<Self> {
        Ok(Self {
            line: build("line", LINE)?,
            item: build("item", ITEM)?,
            rarity: build("rarity", RARITY)?,
            field_start: build("field start", FIELD_START)?,
            fields: build("fields", FIELDS)?,
            fragment: build("fragment", FRAGMENT)?,
            attribute: build("attribute", ATTRIBUTE)?,
            price: build("price", PRICE)?,
        })
    }

    /// The process-wide grammar, compiled on first use.
    pub fn shared() -> Result<&'static Self> {
        SHARED.get_or_try_init(Self::compile)
    }
}

fn build(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::Pattern { name, source })
}

/// Parse a non-negative decimal, or nothing.
///
/// Accepts plain digit strings with an optional fractional part. Anything
/// else, including signs, exponents and `inf`, yields `None`.
pub(crate) fn try_decimal(text: &str) -> Option<f64> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn grammar_compiles() {
        let grammar = Grammar::compile().expect("built-in patterns should compile");
        assert!(grammar.line.is_match("[00:19:24] <Valentyan> (Cad) WTB shovel"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn shared_grammar_is_compiled_once() {
        let first = Grammar::shared().expect("built-in patterns should compile");
        let second = Grammar::shared().expect("built-in patterns should compile");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn line_requires_keyword() {
        let grammar = Grammar::compile().unwrap_or_else(|e| panic!("{e}"));
        assert!(!grammar.line.is_match("[15:23:26] <System> This is the Trade channel."));
        assert!(!grammar.line.is_match("[00:19:24] <Valentyan> (Cad) wts shovel"));
        assert!(!grammar.line.is_match("x [00:19:24] <Valentyan> (Cad) WTS shovel"));
    }

    #[test]
    fn item_allows_fragment_nesting_only() {
        let grammar = Grammar::compile().unwrap_or_else(|e| panic!("{e}"));
        let bodies: Vec<_> = grammar
            .item
            .captures_iter("[iron ore [3/5]] and [a [b] c]")
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(bodies, vec!["iron ore [3/5]", "b"]);
    }

    #[test]
    fn decimals() {
        assert_eq!(try_decimal("96.0086"), Some(96.0086));
        assert_eq!(try_decimal("2"), Some(2.0));
        assert_eq!(try_decimal("2."), Some(2.0));
        assert_eq!(try_decimal("abc"), None);
        assert_eq!(try_decimal("-1"), None);
        assert_eq!(try_decimal("1e5"), None);
        assert_eq!(try_decimal("inf"), None);
        assert_eq!(try_decimal("1.2.3"), None);
        assert_eq!(try_decimal(""), None);
    }
}
