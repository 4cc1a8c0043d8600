use crate::error::Error;
use crate::item::{CatalogEntry, ItemNameId};
use crate::store::{IdCache, SnapshotStore};
use crate::{HttpClient, Result};
use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::time::sleep;

static ORDER_SPREAD_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Market_LoadOrderSpread\s*\(\s*(\d+)\s*\)\s*;").expect("valid regex")
});

/// Pulls the item name id out of the `Market_LoadOrderSpread( 123 );` call in a listing page.
pub fn extract_item_name_id(html: &str) -> Option<ItemNameId> {
    ORDER_SPREAD_CALL
        .captures(html)
        .map(|captures| ItemNameId::from(captures[1].to_string()))
}

/// Resolves the item name id of every entry, in catalog order.
///
/// Cached names cost nothing. Every other name costs one listing page request
/// followed by `throttle`, and is written to the cache right away so an
/// aborted run keeps what it already resolved.
pub async fn resolve_item_ids(
    http: &HttpClient,
    store: &SnapshotStore,
    app_id: u32,
    throttle: Duration,
    entries: &[CatalogEntry],
) -> Result<Vec<ItemNameId>> {
    let mut cache = store.load_id_cache().await;

    resolve_with(entries, &mut cache, store, throttle, move |name| async move {
        let html = http.fetch_listing_page(app_id, &name).await?;
        extract_item_name_id(&html).ok_or(Error::ItemNameIdNotFound(name))
    })
    .await
}

pub(crate) async fn resolve_with<L, F>(
    entries: &[CatalogEntry],
    cache: &mut IdCache,
    store: &SnapshotStore,
    throttle: Duration,
    mut lookup: L,
) -> Result<Vec<ItemNameId>>
where
    L: FnMut(String) -> F,
    F: Future<Output = Result<ItemNameId>>,
{
    let misses = entries
        .iter()
        .filter(|e| !cache.contains_key(&e.market_hash_name))
        .count();
    if misses > 0 {
        match minimum_duration(throttle, misses) {
            Some(total) => log::info!(
                "Resolving {misses} uncached item ids, this takes at least {total:?}"
            ),
            None => log::info!("Resolving {misses} uncached item ids, {throttle:?} apart"),
        }
    }

    let mut ids = Vec::with_capacity(entries.len());

    for entry in entries {
        let name = &entry.market_hash_name;

        if let Some(id) = cache.get(name) {
            ids.push(id.clone());
            continue;
        }

        let id = lookup(name.clone()).await?;
        log::debug!("Resolved {name} to {id}");

        cache.insert(name.clone(), id.clone());
        store.save_id_cache(cache).await?;
        ids.push(id);

        sleep(throttle).await;
    }

    Ok(ids)
}

fn minimum_duration(throttle: Duration, misses: usize) -> Option<Duration> {
    u32::try_from(misses)
        .ok()
        .and_then(|misses| throttle.checked_mul(misses))
}
