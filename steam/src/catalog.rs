use crate::item::CatalogEntry;
use crate::{HttpClient, Result};
use std::future::Future;

pub const PAGE_SIZE: usize = 100;

/// Requests pages at increasing offsets until one comes back short.
/// A final page that is exactly full costs one extra (empty) request.
pub(crate) async fn paginate<T, R, F>(page_size: usize, mut request: R) -> Result<Vec<T>>
where
    R: FnMut(usize) -> F,
    F: Future<Output = Result<Vec<T>>>,
{
    let mut start = 0;
    let mut all = Vec::new();

    loop {
        let page = request(start).await?;
        let len = page.len();
        all.extend(page);

        if len < page_size {
            break;
        }
        start += page_size;
    }

    Ok(all)
}

/// Fetches the whole market catalog of an app, cheapest first.
pub async fn fetch_catalog(
    http: &HttpClient,
    app_id: u32,
    currency: u32,
) -> Result<Vec<CatalogEntry>> {
    let catalog = paginate(PAGE_SIZE, move |start| {
        log::debug!("Requesting catalog page at offset {start}");
        http.fetch_search_page(app_id, currency, start, PAGE_SIZE)
    })
    .await?;

    log::info!("Found {} items for app {app_id}", catalog.len());
    Ok(catalog)
}
