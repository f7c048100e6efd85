use crate::cache::store::{Observable, Subscription};
use crate::models::CardRecord;
use std::sync::Arc;

/// In-memory copy of the full catalog.
///
/// Only ever replaced wholesale with the list the service returned;
/// there is no insert or patch.
#[derive(Default)]
pub struct CardCacheStore {
    cards: Observable<Vec<CardRecord>>,
}

impl CardCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current list snapshot
    pub fn current(&self) -> Arc<Vec<CardRecord>> {
        self.cards.get()
    }

    /// Swap in a complete list and notify subscribers
    pub fn replace_all(&self, cards: Vec<CardRecord>) {
        log::debug!("Replacing card cache with {} entries", cards.len());
        self.cards.set(cards);
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Vec<CardRecord>) + Send + Sync + 'static,
    {
        self.cards.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.cards.unsubscribe(subscription)
    }

    /// Cards whose id, display name or unique key contains `term`,
    /// ignoring case. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<CardRecord> {
        let term = term.trim().to_lowercase();
        self.current()
            .iter()
            .filter(|card| term.is_empty() || card.matches(&term))
            .cloned()
            .collect()
    }

    /// Look up a card by its unique key
    pub fn find_by_unique_key(&self, unique_key: &str) -> Option<CardRecord> {
        self.current()
            .iter()
            .find(|card| card.unique_key == unique_key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}

#[cfg(test)]
#[path = "card_cache_tests.rs"]
mod tests;
