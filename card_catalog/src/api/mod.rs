//! Remote client for the catalog service and the price-quote function.
//!
//! Every mutation is followed by a full re-read of the catalog; results reach
//! the rest of the application only through the registered handlers.

mod catalog;
mod price;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::config::ClientConfig;
use crate::credential::CredentialHolder;
use crate::error::CatalogError;
use crate::models::{CardRecord, PriceSnapshot, ServiceErrorBody};

/// Receives the complete catalog after every successful read
pub type ListChangedHandler = Box<dyn Fn(Vec<CardRecord>) + Send + Sync>;

/// Receives `(unique_key, snapshot)` after every successful price check
pub type PriceChangedHandler = Box<dyn Fn(&str, PriceSnapshot) + Send + Sync>;

/// Client for the five remote operations (list, create, edit, delete, price check).
pub struct CatalogClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
    pub(crate) credential: Arc<CredentialHolder>,
    on_list_changed: Option<ListChangedHandler>,
    on_price_changed: Option<PriceChangedHandler>,
    price_generations: Mutex<HashMap<String, PriceGeneration>>,
}

/// Price request counters for one unique key
#[derive(Debug, Default)]
struct PriceGeneration {
    /// Last request sent
    dispatched: u64,
    /// Last request whose response reached the handler
    applied: u64,
}

impl CatalogClient {
    /// Creates a client without handlers. Reads and price checks are no-ops
    /// until one is registered.
    pub fn new(config: ClientConfig, credential: Arc<CredentialHolder>) -> Self {
        log::info!("Creating catalog client for {}", config.catalog_base_url);
        Self {
            client: Client::new(),
            config,
            credential,
            on_list_changed: None,
            on_price_changed: None,
            price_generations: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credential(&self) -> &Arc<CredentialHolder> {
        &self.credential
    }

    pub fn set_list_handler<F>(&mut self, handler: F)
    where
        F: Fn(Vec<CardRecord>) + Send + Sync + 'static,
    {
        self.on_list_changed = Some(Box::new(handler));
    }

    pub fn set_price_handler<F>(&mut self, handler: F)
    where
        F: Fn(&str, PriceSnapshot) + Send + Sync + 'static,
    {
        self.on_price_changed = Some(Box::new(handler));
    }

    pub fn has_list_handler(&self) -> bool {
        self.on_list_changed.is_some()
    }

    pub fn has_price_handler(&self) -> bool {
        self.on_price_changed.is_some()
    }
}

/// Builds a rejection error from a non-success response, preferring the
/// message the service put in its JSON body.
pub(crate) async fn rejection(response: reqwest::Response) -> CatalogError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceErrorBody>(&body)
        .ok()
        .and_then(ServiceErrorBody::into_message)
        .unwrap_or(body);

    log::error!("Request rejected with status {}: {}", status, message);
    CatalogError::HttpStatus { status, message }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
