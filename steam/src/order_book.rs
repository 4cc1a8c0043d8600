use crate::item::{ItemNameId, OrderBook};
use crate::{HttpClient, Result};

/// Fetches one order book per id, one request at a time, in the given order.
pub async fn fetch_order_books(
    http: &HttpClient,
    ids: &[ItemNameId],
    currency: u32,
    language: &str,
) -> Result<Vec<OrderBook>> {
    let mut books = Vec::with_capacity(ids.len());

    for (i, id) in ids.iter().enumerate() {
        let book = http.fetch_order_book(id, currency, language).await?;
        log::debug!(
            "[{}/{}] {id}: buy {:?} ({}), sell {:?} ({})",
            i + 1,
            ids.len(),
            book.highest_buy_order,
            book.buy_order_count,
            book.lowest_sell_order,
            book.sell_order_count
        );
        books.push(book);
    }

    Ok(books)
}

/// Currency suffix to print prices with, taken from the most recent order book that has one.
pub fn currency_suffix(books: &[OrderBook]) -> Option<&str> {
    books
        .iter()
        .rev()
        .map(|book| book.price_suffix.as_str())
        .find(|suffix| !suffix.is_empty())
}
