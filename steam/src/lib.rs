//! Tracks Steam Community Market prices for the catalog of one app.
//!
//! A run lists the catalog, resolves each item's order book id (cached on disk),
//! reads the order books, optionally values a holder's inventory, and compares
//! the highest buy orders with the previous run's snapshot to report a trend.
pub mod catalog;
mod config;
mod conversion;
mod endpoint;
mod error;
mod http;
pub mod inventory;
mod item;
pub mod order_book;
pub mod resolver;
mod retry;
mod schema;
pub mod store;
mod tracker;
pub mod trend;

pub use config::Config;
pub use endpoint::Endpoint;
pub use error::Error;
pub use http::HttpClient;
pub use item::{CatalogEntry, Description, EnrichedItem, ItemNameId, OrderBook};
pub use retry::RetryPolicy;
pub use store::SnapshotStore;
pub use tracker::{Report, Tracker};

pub type Result<T> = std::result::Result<T, Error>;
