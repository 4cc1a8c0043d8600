use crate::endpoint::BASE_URL;
use crate::error::Error;
use crate::item::{listing_url, CatalogEntry, OrderBook};
use crate::schema::{HistogramResponse, SearchResult};

impl TryFrom<SearchResult> for CatalogEntry {
    type Error = Error;

    fn try_from(result: SearchResult) -> Result<Self, Self::Error> {
        let description = result.asset_description;
        let url = listing_url(BASE_URL, description.appid, &description.market_hash_name)?;

        Ok(Self {
            name: result.name,
            app_name: result.app_name,
            sell_listings: result.sell_listings,
            sell_price: result.sell_price,
            class_id: description.classid,
            market_hash_name: description.market_hash_name,
            descriptions: description.descriptions,
            url: url.to_string(),
        })
    }
}

impl From<HistogramResponse> for OrderBook {
    fn from(histogram: HistogramResponse) -> Self {
        Self {
            buy_order_count: histogram.buy_order_count.map_or(0, |c| c.digits()),
            sell_order_count: histogram.sell_order_count.map_or(0, |c| c.digits()),
            highest_buy_order: histogram.highest_buy_order.and_then(|p| p.price()),
            lowest_sell_order: histogram.lowest_sell_order.and_then(|p| p.price()),
            price_prefix: histogram.price_prefix,
            price_suffix: histogram.price_suffix,
        }
    }
}
