//! Wire formats of the Steam Community endpoints.
use crate::item::Description;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResult {
    pub name: String,
    pub app_name: String,
    pub sell_listings: u64,
    pub sell_price: Option<i64>,
    pub asset_description: AssetDescription,
}

#[derive(Deserialize, Debug)]
pub(crate) struct AssetDescription {
    pub appid: u32,
    pub classid: String,
    pub market_hash_name: String,
    #[serde(default)]
    pub descriptions: Vec<Description>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct HistogramResponse {
    pub buy_order_count: Option<Loose>,
    pub sell_order_count: Option<Loose>,
    pub highest_buy_order: Option<Loose>,
    pub lowest_sell_order: Option<Loose>,
    #[serde(default)]
    pub price_prefix: String,
    #[serde(default)]
    pub price_suffix: String,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct InventoryResponse {
    pub assets: Option<Vec<Asset>>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct Asset {
    pub assetid: String,
    pub classid: String,
    pub amount: Loose,
}

/// Steam sends the same field as a number or as a (sometimes locale formatted) string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub(crate) enum Loose {
    Number(i64),
    Text(String),
}

impl Loose {
    /// Keeps only the ASCII digits, so `"1,234"` and `"1 234"` both read as 1234.
    /// A value without any digit counts as zero.
    pub fn digits(&self) -> u64 {
        match self {
            Loose::Number(n) => (*n).max(0) as u64,
            Loose::Text(s) => {
                let digits: String = s.chars().filter(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }

    /// A minor-unit price, `None` when the field is empty or not a number.
    pub fn price(&self) -> Option<i64> {
        match self {
            Loose::Number(n) => Some(*n),
            Loose::Text(s) => s.trim().parse().ok(),
        }
        .filter(|price| *price >= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_digits() {
        assert_eq!(Loose::Text("1,234".into()).digits(), 1234);
        assert_eq!(Loose::Text("12.345.678".into()).digits(), 12345678);
        assert_eq!(Loose::Text("".into()).digits(), 0);
        assert_eq!(Loose::Number(42).digits(), 42);
    }

    #[test]
    fn test_loose_price() {
        assert_eq!(Loose::Text("1523".into()).price(), Some(1523));
        assert_eq!(Loose::Text("".into()).price(), None);
        assert_eq!(Loose::Number(0).price(), Some(0));
        assert_eq!(Loose::Number(-1).price(), None);
    }

    #[test]
    fn test_histogram_with_locale_counts() {
        let json = r#"{
            "success": 1,
            "sell_order_count": "1,204",
            "buy_order_count": 0,
            "highest_buy_order": "37",
            "lowest_sell_order": null,
            "price_prefix": "",
            "price_suffix": "€"
        }"#;

        let histogram: HistogramResponse = serde_json::from_str(json).unwrap();

        assert_eq!(histogram.sell_order_count.map(|c| c.digits()), Some(1204));
        assert_eq!(histogram.buy_order_count.map(|c| c.digits()), Some(0));
        assert_eq!(histogram.highest_buy_order.and_then(|p| p.price()), Some(37));
        assert!(histogram.lowest_sell_order.is_none());
        assert_eq!(histogram.price_suffix, "€");
    }

    #[test]
    fn test_inventory_without_assets() {
        let inventory: InventoryResponse =
            serde_json::from_str(r#"{"assets": null, "total_inventory_count": 0}"#).unwrap();
        assert!(inventory.assets.is_none());
    }
}
