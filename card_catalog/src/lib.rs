//! Card Catalog - client-side sync layer
//!
//! Owns the in-memory copy of the remote card catalog and the per-card price
//! cache, routes every mutation through the catalog service and publishes
//! state changes to whoever renders them.

pub mod api;
pub mod cache;
pub mod config;
pub mod credential;
pub mod error;
pub mod models;
pub mod notifications;
pub mod service;

// Re-export commonly used items
pub use api::CatalogClient;
pub use cache::{CardCacheStore, Observable, PriceCacheStore, Subscription};
pub use config::ClientConfig;
pub use credential::CredentialHolder;
pub use error::{CatalogError, Result};
pub use models::{CardRecord, PriceSnapshot, VendorQuote};
pub use notifications::{Notification, NotificationKey, NotificationLevel, NotificationQueue};
pub use service::{CatalogService, CONNECT_FAILED_MESSAGE};
