use crate::endpoint::{Endpoint, BASE_URL};
use crate::error::Error;
use crate::item::{listing_url, CatalogEntry, ItemNameId, OrderBook};
use crate::retry::{Attempt, RetryPolicy};
use crate::schema::{Asset, HistogramResponse, InventoryResponse, SearchResponse};
use crate::Result;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

type Query<'a> = [(&'a str, String)];

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryPolicy,
    base_url: String,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl HttpClient {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the client at another host, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn check(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::Response(response.status(), response.text().await?))
        }
    }

    /// Single attempt, every non-success status is an error.
    async fn get(&self, endpoint: Endpoint, url: &str, query: &Query<'_>) -> Result<Response> {
        log::debug!("GET {endpoint} {url}");
        let response = self.client.get(url).query(query).send().await?;
        Self::check(response).await
    }

    /// Like [`Self::get`], but `429 Too Many Requests` is retried according to the retry policy.
    async fn get_retrying(
        &self,
        endpoint: Endpoint,
        url: &str,
        query: &Query<'_>,
    ) -> Result<Response> {
        let client = &self.client;

        self.retry
            .run(endpoint, move || async move {
                log::debug!("GET {endpoint} {url}");
                let response = client.get(url).query(query).send().await?;

                if response.status() == StatusCode::TOO_MANY_REQUESTS {
                    return Ok(Attempt::RateLimited);
                }

                Self::check(response).await.map(Attempt::Done)
            })
            .await
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn fetch_search_page(
        &self,
        app_id: u32,
        currency: u32,
        start: usize,
        count: usize,
    ) -> Result<Vec<CatalogEntry>> {
        let query = [
            ("appid", app_id.to_string()),
            ("currency", currency.to_string()),
            ("start", start.to_string()),
            ("count", count.to_string()),
            ("sort_column", "price".to_string()),
            ("sort_dir", "asc".to_string()),
            ("norender", "1".to_string()),
        ];

        let url = Endpoint::SearchRender.url(&self.base_url);
        let response = self.get(Endpoint::SearchRender, &url, &query).await?;

        Self::json::<SearchResponse>(response)
            .await?
            .results
            .into_iter()
            .map(CatalogEntry::try_from)
            .collect()
    }

    /// Returns the HTML of an item's listing page.
    pub async fn fetch_listing_page(&self, app_id: u32, market_hash_name: &str) -> Result<String> {
        let url = listing_url(&self.base_url, app_id, market_hash_name)?;
        let response = self
            .get_retrying(Endpoint::Listings, url.as_str(), &[])
            .await?;
        Ok(response.text().await?)
    }

    pub async fn fetch_order_book(
        &self,
        item_id: &ItemNameId,
        currency: u32,
        language: &str,
    ) -> Result<OrderBook> {
        let query = [
            ("language", language.to_string()),
            ("currency", currency.to_string()),
            ("item_nameid", item_id.to_string()),
            ("norender", "1".to_string()),
        ];

        let response = self
            .get_retrying(
                Endpoint::OrdersHistogram,
                &Endpoint::OrdersHistogram.url(&self.base_url),
                &query,
            )
            .await?;

        Ok(Self::json::<HistogramResponse>(response).await?.into())
    }

    pub(crate) async fn fetch_inventory_page(
        &self,
        steam_id: &str,
        app_id: u32,
        count: usize,
        start_assetid: Option<&str>,
    ) -> Result<Vec<Asset>> {
        let url = format!(
            "{}/{steam_id}/{app_id}/2",
            Endpoint::Inventory.url(&self.base_url)
        );

        let mut query = vec![("count", count.to_string())];
        if let Some(cursor) = start_assetid {
            query.push(("start_assetid", cursor.to_string()));
        }

        let response = self.get(Endpoint::Inventory, &url, &query).await?;

        Ok(Self::json::<InventoryResponse>(response)
            .await?
            .assets
            .unwrap_or_default())
    }
}
