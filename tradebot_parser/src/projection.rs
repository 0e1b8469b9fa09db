//! Record projection for storage collaborators.
//!
//! Turns a [`TradeRecord`] into a plain field map. Enumerations become their
//! labels, absent optionals become `null`, items and attributes become nested
//! arrays of maps.

use chrono::NaiveDate;
use serde_json::{Value, json};
use tradebot_core::{Item, Record, TradeRecord};

/// Time-of-day format used for the `timestamp` field.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Date-time format used for the optional `datetime` field.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Project a record into a plain field map.
#[must_use]
pub fn project(record: &TradeRecord) -> Record {
    let mut map = Record::new();
    map.insert(
        "timestamp".to_string(),
        json!(record.timestamp.format(TIME_FORMAT).to_string()),
    );
    map.insert("player_name".to_string(), json!(record.player_name));
    map.insert("server".to_string(), json!(record.server));
    map.insert("trade_type".to_string(), json!(record.trade_type.as_str()));
    map.insert("message".to_string(), json!(record.message));
    map.insert(
        "items".to_string(),
        Value::Array(record.items.iter().map(project_item).collect()),
    );
    map.insert("price_amount".to_string(), json!(record.price_amount()));
    map.insert(
        "price_currency".to_string(),
        json!(record.price_currency().map(|c| c.as_str())),
    );
    map
}

/// Project a record and attach the full date-time for a caller-supplied date.
#[must_use]
pub fn project_on(record: &TradeRecord, date: NaiveDate) -> Record {
    let mut map = project(record);
    map.insert(
        "datetime".to_string(),
        json!(record.at_date(date).format(DATETIME_FORMAT).to_string()),
    );
    map
}

fn project_item(item: &Item) -> Value {
    json!({
        "name": item.name,
        "rarity": item.rarity.as_str(),
        "quality_level": item.quality_level,
        "weight": item.weight,
        "damage": item.damage,
        "attributes": item
            .attributes
            .iter()
            .map(|attr| json!({ "name": attr.name, "value": attr.value }))
            .collect::<Vec<_>>(),
        "fragment": item.fragment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tradebot_core::{Currency, ItemAttribute, Price, Rarity, TradeType};

    fn record() -> TradeRecord {
        let mut item = Item::named("iron pickaxe");
        item.rarity = Rarity::Rare;
        item.quality_level = Some(96.0086);
        item.damage = Some(0.0);
        item.weight = Some(2.0);
        item.fragment = Some("3/5".to_string());
        item.attributes = vec![ItemAttribute::new("WoA", "89")];

        TradeRecord {
            timestamp: NaiveTime::from_hms_opt(7, 5, 9).unwrap_or_default(),
            player_name: "Valentyan".to_string(),
            server: "Cadence".to_string(),
            trade_type: TradeType::Wts,
            message: "[rare iron pickaxe [3/5] QL:96.0086 DMG:0.0 WT:2.0 WoA 89] 10s".to_string(),
            items: vec![item],
            price: Some(Price::new(10.0, Currency::Silver)),
        }
    }

    #[test]
    fn projects_every_field() {
        let map = project(&record());

        assert_eq!(map["timestamp"], json!("07:05:09"));
        assert_eq!(map["player_name"], json!("Valentyan"));
        assert_eq!(map["server"], json!("Cadence"));
        assert_eq!(map["trade_type"], json!("WTS"));
        assert_eq!(map["price_amount"], json!(10.0));
        assert_eq!(map["price_currency"], json!("silver"));
        assert!(!map.contains_key("datetime"));

        assert_eq!(
            map["items"],
            json!([{
                "name": "iron pickaxe",
                "rarity": "rare",
                "quality_level": 96.0086,
                "weight": 2.0,
                "damage": 0.0,
                "attributes": [{ "name": "WoA", "value": "89" }],
                "fragment": "3/5",
            }])
        );
    }

    #[test]
    fn absent_values_are_null() {
        let mut bare = record();
        bare.items.clear();
        bare.price = None;

        let map = project(&bare);
        assert_eq!(map["items"], json!([]));
        assert_eq!(map["price_amount"], Value::Null);
        assert_eq!(map["price_currency"], Value::Null);
    }

    #[test]
    fn date_is_attached_on_request() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default();
        let map = project_on(&record(), date);
        assert_eq!(map["datetime"], json!("2024-03-15 07:05:09"));
        assert_eq!(map["timestamp"], json!("07:05:09"));
    }
}
