//! The explicitly constructed service object handed to UI code.
//!
//! Bundles the credential, the remote client, both caches and the
//! notification queue, and wires the client's handlers to the caches.

use std::sync::Arc;
use std::time::Duration;

use crate::api::CatalogClient;
use crate::cache::{CardCacheStore, PriceCacheStore};
use crate::config::{ClientConfig, DEFAULT_NOTIFICATION_TTL};
use crate::credential::CredentialHolder;
use crate::error::Result;
use crate::models::CardRecord;
use crate::notifications::NotificationQueue;

/// What the UI shows when the first catalog read after setting a credential fails
pub const CONNECT_FAILED_MESSAGE: &str = "Either server cannot be reached, or API key is incorrect";

pub struct CatalogService {
    credential: Arc<CredentialHolder>,
    client: CatalogClient,
    cards: Arc<CardCacheStore>,
    prices: Arc<PriceCacheStore>,
    notifications: Arc<NotificationQueue>,
}

impl CatalogService {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_notification_ttl(config, DEFAULT_NOTIFICATION_TTL)
    }

    pub fn with_notification_ttl(config: ClientConfig, ttl: Duration) -> Self {
        let credential = Arc::new(CredentialHolder::default());
        let cards = Arc::new(CardCacheStore::new());
        let prices = Arc::new(PriceCacheStore::new());

        let mut client = CatalogClient::new(config, Arc::clone(&credential));

        let card_sink = Arc::clone(&cards);
        client.set_list_handler(move |list| card_sink.replace_all(list));

        let price_sink = Arc::clone(&prices);
        client.set_price_handler(move |key, snapshot| price_sink.upsert(key, snapshot));

        Self {
            credential,
            client,
            cards,
            prices,
            notifications: Arc::new(NotificationQueue::new(ttl)),
        }
    }

    pub fn set_credential(&self, value: impl Into<String>) {
        self.credential.set_credential(value);
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_configured()
    }

    /// Sets the credential and loads the catalog with it. On failure the cache
    /// is left as it was; show [`CONNECT_FAILED_MESSAGE`] to the user.
    pub async fn connect(&self, credential: impl Into<String>) -> Result<()> {
        self.set_credential(credential);
        self.client.list_all().await
    }

    pub async fn list_all(&self) -> Result<()> {
        self.client.list_all().await
    }

    pub async fn create(&self, record: &CardRecord) -> Result<()> {
        self.client.create(record).await
    }

    pub async fn edit(&self, record: &CardRecord) -> Result<()> {
        self.client.edit(record).await
    }

    pub async fn delete_one(&self, record: &CardRecord) -> Result<()> {
        self.client.delete_one(record).await
    }

    pub async fn check_price(&self, record: &CardRecord) -> Result<()> {
        self.client.check_price(record).await
    }

    pub async fn fetch_one(&self, id: i64) -> Result<Option<CardRecord>> {
        self.client.fetch_one(id).await
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn cards(&self) -> &Arc<CardCacheStore> {
        &self.cards
    }

    pub fn prices(&self) -> &Arc<PriceCacheStore> {
        &self.prices
    }

    pub fn notifications(&self) -> &Arc<NotificationQueue> {
        &self.notifications
    }
}
