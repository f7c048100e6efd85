//! Catalog reads and mutations.

use log::{debug, info, warn};

use crate::error::Result;
use crate::models::{CardRecord, NewCardBody};

use super::{rejection, CatalogClient};

impl CatalogClient {
    /// Reads the full catalog and hands it to the list handler.
    ///
    /// Without a list handler this returns immediately, no request is sent.
    pub async fn list_all(&self) -> Result<()> {
        let Some(handler) = self.on_list_changed.as_ref() else {
            debug!("No list handler registered, skipping catalog read");
            return Ok(());
        };

        let url = self.config.cards_url();
        info!("Fetching catalog from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.credential.bearer())
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.text().await?;
        let cards: Vec<CardRecord> = serde_json::from_str(&body)?;

        info!("Fetched {} cards", cards.len());
        handler(cards);
        Ok(())
    }

    /// Adds a card. The record's id is ignored; the service assigns one.
    /// On success the catalog is re-read.
    pub async fn create(&self, record: &CardRecord) -> Result<()> {
        record.validate_fields()?;

        let url = self.config.cards_url();
        info!("Creating card {} ({})", record.unique_key, record.display_name);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.credential.bearer())
            .header("User-Agent", &self.config.user_agent)
            .json(&NewCardBody::from(record))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Create failed for {}", record.unique_key);
            return Err(rejection(response).await);
        }

        self.list_all().await
    }

    /// Replaces the entry addressed by `record.id` with the given fields,
    /// then re-reads the catalog.
    pub async fn edit(&self, record: &CardRecord) -> Result<()> {
        let id = record.require_id()?;
        record.validate_fields()?;

        let url = self.config.card_url(id);
        info!("Editing card {} ({})", id, record.unique_key);

        let response = self
            .client
            .put(&url)
            .header("Authorization", self.credential.bearer())
            .header("User-Agent", &self.config.user_agent)
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Edit failed for card {}", id);
            return Err(rejection(response).await);
        }

        self.list_all().await
    }

    /// Removes the entry addressed by `record.id`, then re-reads the catalog.
    pub async fn delete_one(&self, record: &CardRecord) -> Result<()> {
        let id = record.require_id()?;

        let url = self.config.card_url(id);
        info!("Deleting card {} ({})", id, record.unique_key);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.credential.bearer())
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Delete failed for card {}", id);
            return Err(rejection(response).await);
        }

        self.list_all().await
    }

    /// Reads a single entry without touching the cache. `None` if the service
    /// does not know the id.
    pub async fn fetch_one(&self, id: i64) -> Result<Option<CardRecord>> {
        let url = self.config.card_url(id);
        debug!("Fetching card {} from {}", id, url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.credential.bearer())
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("Card {} not found", id);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}
