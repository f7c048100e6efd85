//! Price checks against the external quote function.

use log::{debug, info};
use serde_json::json;

use crate::error::Result;
use crate::models::{CardRecord, PriceResponse};

use super::{rejection, CatalogClient};

impl CatalogClient {
    /// Requests a price snapshot for `record.unique_key` and hands it to the
    /// price handler. The quote function needs no credential.
    ///
    /// When several checks for the same key are in flight, a response is applied
    /// only if no later-dispatched check has been applied yet, so a slow old
    /// answer never overwrites a newer one. If the newest check fails, the
    /// newest successful one still lands.
    /// Without a price handler this returns immediately, no request is sent.
    pub async fn check_price(&self, record: &CardRecord) -> Result<()> {
        let Some(handler) = self.on_price_changed.as_ref() else {
            debug!("No price handler registered, skipping price check");
            return Ok(());
        };

        let key = record.unique_key.as_str();
        let generation = self.begin_price_request(key);
        info!("Checking price for {} (request {})", key, generation);

        let response = self
            .client
            .post(&self.config.price_url)
            .header("User-Agent", &self.config.user_agent)
            .json(&json!({ "cardUniqueId": key }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.text().await?;
        let snapshot = serde_json::from_str::<PriceResponse>(&body)?.into_snapshot()?;

        if !self.apply_price_response(key, generation, || handler(key, snapshot)) {
            debug!("Dropping stale price response for {} (request {})", key, generation);
        }
        Ok(())
    }

    fn begin_price_request(&self, key: &str) -> u64 {
        let mut generations = self
            .price_generations
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let entry = generations.entry(key.to_string()).or_default();
        entry.dispatched += 1;
        entry.dispatched
    }

    /// Runs `apply` if `generation` is newer than the last applied response for
    /// `key`. Held under the lock so two responses cannot apply out of order.
    fn apply_price_response<F>(&self, key: &str, generation: u64, apply: F) -> bool
    where
        F: FnOnce(),
    {
        let mut generations = self
            .price_generations
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let entry = generations.entry(key.to_string()).or_default();
        if generation <= entry.applied {
            return false;
        }
        entry.applied = generation;
        info!("Applying price for {} (request {})", key, generation);
        apply();
        true
    }
}
