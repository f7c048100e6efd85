//! Reactive in-memory caches for catalog entries and price snapshots

pub mod card_cache;
pub mod price_cache;
pub mod store;

pub use card_cache::CardCacheStore;
pub use price_cache::PriceCacheStore;
pub use store::{Observable, Subscription};
