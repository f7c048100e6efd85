use crate::cache::store::{Observable, Subscription};
use crate::models::PriceSnapshot;
use std::collections::HashMap;
use std::sync::Arc;

/// Most recent price snapshot per card unique key.
///
/// Each upsert produces a new map that differs from the previous one in
/// exactly one key.
#[derive(Default)]
pub struct PriceCacheStore {
    prices: Observable<HashMap<String, PriceSnapshot>>,
}

impl PriceCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Arc<HashMap<String, PriceSnapshot>> {
        self.prices.get()
    }

    /// Insert or overwrite the snapshot for one key, leaving all others untouched
    pub fn upsert(&self, unique_key: &str, snapshot: PriceSnapshot) {
        log::debug!("Caching price snapshot for {}", unique_key);
        self.prices.update(|prev| {
            let mut next = prev.clone();
            next.insert(unique_key.to_string(), snapshot);
            next
        });
    }

    pub fn get(&self, unique_key: &str) -> Option<PriceSnapshot> {
        self.current().get(unique_key).cloned()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&HashMap<String, PriceSnapshot>) + Send + Sync + 'static,
    {
        self.prices.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.prices.unsubscribe(subscription)
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}
