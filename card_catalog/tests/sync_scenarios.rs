//! End-to-end scenarios against a stubbed catalog and price service.

use std::sync::{Arc, Mutex};

use card_catalog::{
    CardRecord, CatalogError, CatalogService, ClientConfig, VendorQuote, CONNECT_FAILED_MESSAGE,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(mock_server: &MockServer) -> CatalogService {
    CatalogService::new(ClientConfig::for_base_url(&mock_server.uri()))
}

fn record_json(id: i64, key: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "uniqueId": key,
        "pokemon": name,
        "imageUrl": format!("https://images.example.com/{key}.png")
    })
}

#[tokio::test]
async fn list_then_create_tracks_service_order() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);
    service.set_credential("api-key");

    Mock::given(method("GET"))
        .and(path("/api/card"))
        .and(header("Authorization", "Bearer api-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([record_json(1, "swsh4-23", "Charmander")])),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    service.list_all().await.unwrap();
    assert_eq!(
        *service.cards().current(),
        vec![CardRecord::new(
            "swsh4-23",
            "Charmander",
            "https://images.example.com/swsh4-23.png"
        )
        .with_id(1)]
    );

    Mock::given(method("POST"))
        .and(path("/api/card"))
        .and(body_json(serde_json::json!({
            "uniqueId": "swsh4-24",
            "pokemon": "Charmelon",
            "imageUrl": "https://images.example.com/swsh4-24.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json(2, "swsh4-24", "Charmelon")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            record_json(1, "swsh4-23", "Charmander"),
            record_json(2, "swsh4-24", "Charmelon")
        ])))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    service
        .create(&CardRecord::new(
            "swsh4-24",
            "Charmelon",
            "https://images.example.com/swsh4-24.png",
        ))
        .await
        .unwrap();

    let keys: Vec<String> = service
        .cards()
        .current()
        .iter()
        .map(|c| c.unique_key.clone())
        .collect();
    assert_eq!(keys, vec!["swsh4-23", "swsh4-24"]);
}

#[tokio::test]
async fn store_after_mutation_equals_fresh_read() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);
    service.set_credential("api-key");

    let catalog = serde_json::json!([record_json(7, "base1-4", "Charizard")]);
    Mock::given(method("GET"))
        .and(path("/api/card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/card/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .mount(&mock_server)
        .await;

    let doomed = CardRecord::new("base1-1", "Alakazam", "https://img").with_id(3);
    service.delete_one(&doomed).await.unwrap();
    let after_delete = service.cards().current();

    service.list_all().await.unwrap();
    assert_eq!(after_delete, service.cards().current());
}

#[tokio::test]
async fn price_check_lands_in_price_cache() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/GetPrice"))
        .and(body_json(serde_json::json!({ "cardUniqueId": "swsh4-23" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "TCGPlayer": { "market": 10, "high": 20, "mid": 15, "low": 5 } },
            "updatedAt": "2024-01-01"
        })))
        .mount(&mock_server)
        .await;

    let card = CardRecord::new("swsh4-23", "Charmander", "https://img").with_id(1);
    service.check_price(&card).await.unwrap();

    let snapshot = service.prices().get("swsh4-23").unwrap();
    assert_eq!(snapshot.retrieved_at, "2024-01-01");
    assert_eq!(
        snapshot.quotes.get("TCGPlayer"),
        Some(&VendorQuote { market: 10.0, high: 20.0, mid: 15.0, low: 5.0 })
    );
    assert!(service.cards().is_empty());
}

#[tokio::test]
async fn rejected_create_is_reported_by_ui_and_cache_stays() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);
    service.set_credential("api-key");

    Mock::given(method("POST"))
        .and(path("/api/card"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    let before = service.cards().current();
    let result = service
        .create(&CardRecord::new("swsh4-99", "Missingno", "https://img"))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CatalogError::HttpStatus { .. }));
    service.notifications().push_error(format!("Failed to save card: {err}"));

    assert_eq!(before, service.cards().current());
    assert_eq!(service.notifications().len(), 1);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "no refresh after a rejected create");
}

#[tokio::test]
async fn connect_with_bad_key_leaves_cache_empty() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/card"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let result = service.connect("wrong").await;

    assert!(result.is_err());
    assert!(service.is_configured());
    assert!(service.cards().is_empty());
    assert!(!CONNECT_FAILED_MESSAGE.is_empty());
}

#[tokio::test]
async fn subscribers_see_each_refresh_synchronously() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/card"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([record_json(1, "swsh4-23", "Charmander")])),
        )
        .mount(&mock_server)
        .await;

    let rendered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rendered);
    service
        .cards()
        .subscribe(move |cards| sink.lock().unwrap().push(cards.len()));

    service.connect("api-key").await.unwrap();

    assert_eq!(*rendered.lock().unwrap(), vec![1]);
}
