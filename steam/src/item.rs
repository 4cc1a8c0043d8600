use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::Result;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use url::Url;

const DROP_MARKERS: [&str; 2] = ["Drops ingame", "Drops from the game"];

/// Numeric id needed to query an item's order book. Stored as text, the way
/// Steam embeds it in the listing page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Display, From, Deref)]
#[serde(transparent)]
pub struct ItemNameId(String);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Description {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: String,
}

/// One tradable item as listed by the market search.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub app_name: String,
    pub sell_listings: u64,
    #[serde(default)]
    pub sell_price: Option<i64>,
    pub class_id: String,
    /// Stable across runs, used as the join key
    pub market_hash_name: String,
    #[serde(default)]
    pub descriptions: Vec<Description>,
    pub url: String,
}

impl CatalogEntry {
    pub fn drops_in_game(&self) -> bool {
        self.descriptions
            .iter()
            .any(|d| DROP_MARKERS.iter().any(|marker| d.value.contains(marker)))
    }
}

/// Top of book and depth for one item at one point in time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct OrderBook {
    #[serde(default)]
    pub buy_order_count: u64,
    #[serde(default)]
    pub sell_order_count: u64,
    #[serde(default, with = "no_orders")]
    pub highest_buy_order: Option<i64>,
    #[serde(default, with = "no_orders")]
    pub lowest_sell_order: Option<i64>,
    #[serde(default)]
    pub price_prefix: String,
    #[serde(default)]
    pub price_suffix: String,
}

/// A catalog entry with everything the pipeline learned about it. This is
/// also the record persisted in the snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub item_id: ItemNameId,
    #[serde(flatten)]
    pub order_book: OrderBook,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub amount_price: f64,
    #[serde(default)]
    pub drops_in_game: bool,
    #[serde(default)]
    pub difference: i64,
    /// Trend baseline, absent until the first reconciliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<i64>,
}

impl EnrichedItem {
    pub fn new(entry: CatalogEntry, item_id: ItemNameId, order_book: OrderBook) -> Self {
        let drops_in_game = entry.drops_in_game();
        Self {
            entry,
            item_id,
            order_book,
            amount: 0,
            amount_price: 0.0,
            drops_in_game,
            difference: 0,
            old_price: None,
        }
    }

    pub fn market_hash_name(&self) -> &str {
        &self.entry.market_hash_name
    }

    pub fn highest_buy_order(&self) -> Option<i64> {
        self.order_book.highest_buy_order
    }
}

pub(crate) fn listing_url(base_url: &str, app_id: u32, market_hash_name: &str) -> Result<Url> {
    let mut url = Url::parse(&Endpoint::Listings.url(base_url))?;
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("{} cannot be a base url", Endpoint::Listings)))?
        .push(&app_id.to_string())
        .push(market_hash_name);
    Ok(url)
}

/// `-1` on disk means "no orders on that side".
mod no_orders {
    use serde::{Deserialize, Deserializer, Serializer};

    const NO_ORDERS: i64 = -1;

    pub fn serialize<S: Serializer>(price: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(price.unwrap_or(NO_ORDERS))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.filter(|price| *price > NO_ORDERS))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::endpoint::BASE_URL;

    pub(crate) fn entry(market_hash_name: &str, class_id: &str) -> CatalogEntry {
        CatalogEntry {
            name: market_hash_name.to_string(),
            app_name: "Banana".to_string(),
            sell_listings: 10,
            sell_price: Some(12),
            class_id: class_id.to_string(),
            market_hash_name: market_hash_name.to_string(),
            descriptions: vec![],
            url: format!("https://steamcommunity.com/market/listings/2923300/{market_hash_name}"),
        }
    }

    pub(crate) fn item(market_hash_name: &str, highest_buy_order: Option<i64>) -> EnrichedItem {
        EnrichedItem::new(
            entry(market_hash_name, "100"),
            ItemNameId::from("176".to_string()),
            OrderBook {
                highest_buy_order,
                ..OrderBook::default()
            },
        )
    }

    #[test]
    fn test_drops_in_game() {
        let mut banana = entry("Banana", "1");
        assert!(!banana.drops_in_game());

        banana.descriptions = vec![
            Description {
                kind: "html".into(),
                value: "Rare".into(),
            },
            Description {
                kind: "html".into(),
                value: "Drops from the game".into(),
            },
        ];
        assert!(banana.drops_in_game());
    }

    #[test]
    fn test_empty_order_side_is_minus_one_on_disk() {
        let banana = item("Banana", None);
        let json = serde_json::to_value(&banana).unwrap();

        assert_eq!(json["highest_buy_order"], -1);
        assert_eq!(json["lowest_sell_order"], -1);
        assert_eq!(json["item_id"], "176");
        assert!(json.get("old_price").is_none());

        let back: EnrichedItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.highest_buy_order(), None);
        assert_eq!(back, banana);
    }

    #[test]
    fn test_zero_price_is_a_price() {
        let banana = item("Banana", Some(0));
        let json = serde_json::to_value(&banana).unwrap();
        assert_eq!(json["highest_buy_order"], 0);
    }

    #[test]
    fn test_listing_url_is_percent_encoded() {
        let url = listing_url(BASE_URL, 2923300, "Banana/Peel Skin").unwrap();
        assert_eq!(
            url.as_str(),
            "https://steamcommunity.com/market/listings/2923300/Banana%2FPeel%20Skin"
        );
    }
}
