//! Unit tests for the catalog client.


use std::sync::Arc;

use crate::api::CatalogClient;
use crate::cache::{CardCacheStore, PriceCacheStore};
use crate::config::ClientConfig;
use crate::credential::CredentialHolder;

/// Client pointed at a mock server, wired to fresh stores.
pub(super) fn wired_client(
    mock_uri: &str,
    token: &str,
) -> (CatalogClient, Arc<CardCacheStore>, Arc<PriceCacheStore>) {
    let credential = Arc::new(CredentialHolder::new(token));
    let mut client = CatalogClient::new(ClientConfig::for_base_url(mock_uri), credential);

    let cards = Arc::new(CardCacheStore::new());
    let prices = Arc::new(PriceCacheStore::new());

    let card_sink = Arc::clone(&cards);
    client.set_list_handler(move |list| card_sink.replace_all(list));
    let price_sink = Arc::clone(&prices);
    client.set_price_handler(move |key, snapshot| price_sink.upsert(key, snapshot));

    (client, cards, prices)
}

pub(super) fn card_json(id: i64, key: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "uniqueId": key,
        "pokemon": name,
        "imageUrl": format!("https://images.example.com/{key}.png")
    })
}
