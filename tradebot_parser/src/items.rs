//! Item link extraction.
//!
//! An item link is a bracketed span such as
//! `[rare iron pickaxe QL:96.0086 DMG:0.0 WT:2.0 WoA 89 • CoC 93]`. Each span
//! is decomposed into rarity, name, fragment marker, numeric fields and
//! attribute pairs. Extraction is best effort: a field that does not parse
//! is left empty and the rest of the item is still produced.

use std::str::FromStr;

use tradebot_core::{Item, ItemAttribute, Rarity};

use crate::patterns::{Grammar, try_decimal};

/// Extract every item link in `message`, left to right.
pub(crate) fn extract_items(grammar: &Grammar, message: &str) -> Vec<Item> {
    grammar
        .item
        .captures_iter(message)
        .filter_map(|caps| caps.get(1))
        .filter_map(|body| parse_body(grammar, body.as_str()))
        .collect()
}

/// Decompose one item body. Returns `None` when no name is left.
fn parse_body(grammar: &Grammar, body: &str) -> Option<Item> {
    if let Some(word) = grammar.rarity.captures(body).and_then(|caps| caps.get(1)) {
        let rarity = Rarity::from_str(word.as_str()).unwrap_or_default();
        if let Some(item) = parse_fields(grammar, rarity, &body[word.end()..]) {
            return Some(item);
        }
        // A lone rarity word is the name of a common item.
    }
    parse_fields(grammar, Rarity::Common, body)
}

fn parse_fields(grammar: &Grammar, rarity: Rarity, rest: &str) -> Option<Item> {
    let (name_span, tail) = grammar
        .field_start
        .find(rest)
        .map_or((rest, ""), |m| (&rest[..m.start()], &rest[m.start()..]));

    let (name, fragment) = split_fragment(grammar, name_span);
    if name.is_empty() {
        return None;
    }

    let mut item = Item::named(name);
    item.rarity = rarity;
    item.fragment = fragment;

    if let Some(caps) = grammar.fields.captures(tail) {
        item.quality_level = caps.get(1).and_then(|m| try_decimal(m.as_str()));
        item.damage = caps.get(2).and_then(|m| try_decimal(m.as_str()));
        item.weight = caps.get(3).and_then(|m| try_decimal(m.as_str()));
        if let Some(span) = caps.get(4) {
            item.attributes = parse_attributes(grammar, span.as_str());
        }
    }

    Some(item)
}

/// Excise the first `[a/b]` marker from a name and return the trimmed name.
fn split_fragment(grammar: &Grammar, name: &str) -> (String, Option<String>) {
    let Some(caps) = grammar.fragment.captures(name) else {
        return (name.trim().to_string(), None);
    };
    let (Some(whole), Some(have), Some(total)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return (name.trim().to_string(), None);
    };

    let before = name[..whole.start()].trim();
    let after = name[whole.end()..].trim();
    let cleaned = match (before.is_empty(), after.is_empty()) {
        (false, false) => format!("{before} {after}"),
        (false, true) => before.to_string(),
        _ => after.to_string(),
    };

    (
        cleaned,
        Some(format!("{}/{}", have.as_str(), total.as_str())),
    )
}

/// Collect the well-formed `word number` pairs of an attribute span.
fn parse_attributes(grammar: &Grammar, span: &str) -> Vec<ItemAttribute> {
    grammar
        .attribute
        .captures_iter(span)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            let value = caps.get(2)?;
            Some(ItemAttribute::new(name.as_str(), value.as_str()))
        })
        .collect()
}
