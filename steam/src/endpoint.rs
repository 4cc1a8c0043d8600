use strum_macros::{Display, EnumString};

pub(crate) const BASE_URL: &str = "https://steamcommunity.com";

/// Enum for all Steam Community endpoints the tracker talks to
#[derive(EnumString, Display, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint {
    #[strum(serialize = "/market/search/render/")]
    SearchRender,
    #[strum(serialize = "/market/listings")]
    Listings,
    #[strum(serialize = "/market/itemordershistogram")]
    OrdersHistogram,
    #[strum(serialize = "/inventory")]
    Inventory,
}

impl Endpoint {
    pub(crate) fn url(self, base_url: &str) -> String {
        format!("{base_url}{self}")
    }
}
