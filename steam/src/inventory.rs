use crate::item::EnrichedItem;
use crate::schema::Asset;
use crate::{HttpClient, Result};
use std::collections::HashMap;
use std::future::Future;

pub const INVENTORY_PAGE_SIZE: usize = 5000;

/// Class id to the number of owned units of that class.
pub type InventoryTotals = HashMap<String, u64>;

/// Walks the inventory with the last asset id of each full page as the next cursor,
/// summing amounts per class id. Stacks of one class may show up many times.
pub(crate) async fn collect_totals<R, F>(page_size: usize, mut request: R) -> Result<InventoryTotals>
where
    R: FnMut(Option<String>) -> F,
    F: Future<Output = Result<Vec<Asset>>>,
{
    let mut totals = InventoryTotals::new();
    let mut cursor = None;

    loop {
        let page = request(cursor.take()).await?;

        for asset in &page {
            *totals.entry(asset.classid.clone()).or_insert(0) += asset.amount.digits();
        }

        if page.len() < page_size {
            break;
        }
        cursor = page.last().map(|asset| asset.assetid.clone());
    }

    Ok(totals)
}

pub async fn fetch_inventory_totals(
    http: &HttpClient,
    steam_id: &str,
    app_id: u32,
) -> Result<InventoryTotals> {
    let totals = collect_totals(INVENTORY_PAGE_SIZE, move |cursor| async move {
        http.fetch_inventory_page(steam_id, app_id, INVENTORY_PAGE_SIZE, cursor.as_deref())
            .await
    })
    .await?;

    log::info!(
        "Inventory of {steam_id} holds {} units across {} classes",
        totals.values().sum::<u64>(),
        totals.len()
    );
    Ok(totals)
}

/// Values owned units at the highest buy order. Items without a match or without
/// buy orders are worth nothing.
pub fn apply_inventory(items: &mut [EnrichedItem], totals: &InventoryTotals) {
    for item in items {
        item.amount = 0;
        item.amount_price = 0.0;

        if let (Some(&amount), Some(price)) =
            (totals.get(&item.entry.class_id), item.highest_buy_order())
        {
            item.amount = amount;
            item.amount_price = amount as f64 * price as f64 / 100.0;
        }
    }
}
