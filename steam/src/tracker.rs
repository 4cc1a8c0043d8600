use crate::catalog::fetch_catalog;
use crate::inventory::{apply_inventory, fetch_inventory_totals};
use crate::item::{CatalogEntry, EnrichedItem, ItemNameId, OrderBook};
use crate::order_book::{currency_suffix, fetch_order_books};
use crate::resolver::resolve_item_ids;
use crate::store::SnapshotStore;
use crate::trend::reconcile;
use crate::{Config, HttpClient, Result};

/// Result of one tracking run, ready to be rendered.
#[derive(Debug, Clone)]
pub struct Report {
    pub items: Vec<EnrichedItem>,
    pub currency_suffix: String,
    /// Set when inventory valuation ran
    pub holder: Option<String>,
}

impl Report {
    /// Value of the holder's inventory in major currency units.
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(|item| item.amount_price).sum()
    }
}

/// Runs the whole pipeline for one configured catalog.
pub struct Tracker {
    config: Config,
    http: HttpClient,
    store: SnapshotStore,
}

impl Tracker {
    pub fn new(config: Config) -> Self {
        let http = HttpClient::new(config.retry);
        Self::with_client(config, http)
    }

    pub fn with_client(config: Config, http: HttpClient) -> Self {
        Self {
            store: SnapshotStore::new(&config.data_dir, config.app_id),
            http,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches today's prices, reconciles them with the previous snapshot and
    /// replaces that snapshot. Nothing is written to the snapshot when a step fails.
    pub async fn run(&self) -> Result<Report> {
        let config = &self.config;
        log::info!("Tracking app {} in currency {}", config.app_id, config.currency);

        let previous = self.store.load_snapshot().await;

        let catalog = fetch_catalog(&self.http, config.app_id, config.currency).await?;

        log::info!("Requesting item ids");
        let ids = resolve_item_ids(
            &self.http,
            &self.store,
            config.app_id,
            config.throttle,
            &catalog,
        )
        .await?;

        log::info!("Requesting prices");
        let books = fetch_order_books(&self.http, &ids, config.currency, &config.language).await?;
        let currency_suffix = currency_suffix(&books).unwrap_or_default().to_string();

        let mut items = enrich(catalog, ids, books);

        if let Some(steam_id) = &config.steam_id {
            log::info!("Requesting inventory");
            let totals = fetch_inventory_totals(&self.http, steam_id, config.app_id).await?;
            apply_inventory(&mut items, &totals);
        }

        reconcile(&mut items, &previous);
        self.store.save_snapshot(&items).await?;

        Ok(Report {
            items,
            currency_suffix,
            holder: config.steam_id.clone(),
        })
    }
}

fn enrich(
    catalog: Vec<CatalogEntry>,
    ids: Vec<ItemNameId>,
    books: Vec<OrderBook>,
) -> Vec<EnrichedItem> {
    catalog
        .into_iter()
        .zip(ids)
        .zip(books)
        .map(|((entry, id), book)| EnrichedItem::new(entry, id, book))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::tests::{entry, item};
    use crate::http::tests::{stub_client, StubServer};
    use crate::item::Description;
    use crate::Error;
    use std::time::Duration;

    const SEARCH_PAGE: &str = r#"{
        "success": true,
        "results": [{
            "name": "Golden Banana",
            "sell_listings": 12,
            "sell_price": 30,
            "app_name": "Banana",
            "asset_description": {
                "appid": 2923300,
                "classid": "7125381929",
                "market_hash_name": "Golden Banana",
                "descriptions": []
            }
        }]
    }"#;
    const LISTING_PAGE: &str = "<script>Market_LoadOrderSpread( 176155436 );</script>";
    const HISTOGRAM: &str = r#"{"success":1,"buy_order_count":"3","sell_order_count":"1,204","highest_buy_order":"125","lowest_sell_order":"140","price_suffix":"€"}"#;

    async fn market(inventory: (u16, &str)) -> StubServer {
        StubServer::start(vec![
            ("/market/search/render/", vec![(200, SEARCH_PAGE.to_string())]),
            ("/market/listings/", vec![(200, LISTING_PAGE.to_string())]),
            ("/market/itemordershistogram", vec![(200, HISTOGRAM.to_string())]),
            ("/inventory/", vec![(inventory.0, inventory.1.to_string())]),
        ])
        .await
    }

    fn tracker(server: &StubServer, data_dir: &std::path::Path) -> Tracker {
        let mut config = Config::new(2923300)
            .with_data_dir(data_dir)
            .with_steam_id("76561198000000000");
        config.throttle = Duration::ZERO;
        Tracker::with_client(config, stub_client(server))
    }

    #[tokio::test]
    async fn test_run_reconciles_and_saves_snapshot() {
        let server = market((
            200,
            r#"{"assets":[{"assetid":"1","classid":"7125381929","amount":"2"},{"assetid":"2","classid":"7125381929","amount":"1"}]}"#,
        ))
        .await;
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(&server, dir.path());

        let mut yesterday = item("Golden Banana", Some(110));
        yesterday.old_price = Some(100);
        tracker.store.save_snapshot(&[yesterday]).await.unwrap();

        let report = tracker.run().await.unwrap();

        assert_eq!(report.currency_suffix, "€");
        assert_eq!(report.items.len(), 1);
        let golden = &report.items[0];
        assert_eq!(*golden.item_id, "176155436");
        assert_eq!(golden.order_book.sell_order_count, 1204);
        assert_eq!(golden.difference, 25);
        assert_eq!(golden.old_price, Some(110));
        assert_eq!((golden.amount, golden.amount_price), (3, 3.75));
        assert_eq!(tracker.store.load_snapshot().await, report.items);
    }

    #[tokio::test]
    async fn test_failed_run_keeps_previous_snapshot() {
        let server = market((500, "inventory unavailable")).await;
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker(&server, dir.path());

        let mut yesterday = item("Golden Banana", Some(110));
        yesterday.old_price = Some(100);
        tracker.store.save_snapshot(&[yesterday]).await.unwrap();
        let before = std::fs::read_to_string(tracker.store.snapshot_path()).unwrap();

        let result = tracker.run().await;

        assert!(matches!(result, Err(Error::Response(status, _)) if status.as_u16() == 500));
        assert_eq!(
            std::fs::read_to_string(tracker.store.snapshot_path()).unwrap(),
            before
        );
        assert_eq!(server.count("/inventory/"), 1);

        let cache = tracker.store.load_id_cache().await;
        assert_eq!(
            cache.get("Golden Banana"),
            Some(&ItemNameId::from("176155436".to_string()))
        );
    }

    #[test]
    fn test_enrich_keeps_catalog_order() {
        let mut dropping = entry("Banana", "1");
        dropping.descriptions = vec![Description {
            kind: "html".into(),
            value: "Drops ingame".into(),
        }];
        let catalog = vec![dropping, entry("Golden Banana", "2")];
        let ids = vec![
            ItemNameId::from("10".to_string()),
            ItemNameId::from("20".to_string()),
        ];
        let books = vec![
            OrderBook {
                highest_buy_order: Some(5),
                ..OrderBook::default()
            },
            OrderBook::default(),
        ];

        let items = enrich(catalog, ids, books);

        assert_eq!(items[0].market_hash_name(), "Banana");
        assert_eq!(*items[0].item_id, "10");
        assert_eq!(items[0].highest_buy_order(), Some(5));
        assert!(items[0].drops_in_game);
        assert_eq!(items[1].market_hash_name(), "Golden Banana");
        assert_eq!(items[1].highest_buy_order(), None);
        assert!(!items[1].drops_in_game);
    }

    #[test]
    fn test_total_value() {
        let mut owned = item("Banana", Some(250));
        owned.amount = 2;
        owned.amount_price = 5.0;
        let mut other = item("Golden Banana", Some(100));
        other.amount = 1;
        other.amount_price = 1.0;

        let report = Report {
            items: vec![owned, other, item("Rotten Banana", None)],
            currency_suffix: "€".into(),
            holder: Some("76561198000000000".into()),
        };

        assert_eq!(report.total_value(), 6.0);
    }

    #[test]
    fn test_tracker_uses_config_paths() {
        let config = Config::new(2923300).with_data_dir("/tmp/tracker");
        let tracker = Tracker::new(config);

        assert_eq!(
            tracker.store.snapshot_path(),
            std::path::Path::new("/tmp/tracker/data/2923300.json")
        );
        assert_eq!(
            tracker.store.id_cache_path(),
            std::path::Path::new("/tmp/tracker/items/2923300.json")
        );
    }
}
