//! Firebase REST store against a local HTTP server

use serde_json::json;
use sos_core::{
    CollectionPath, LocationFix, RecordKey, RecordStoreEffects, SosError, SosRecord,
};
use sos_effects::FirebaseRecordStore;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store(server: &MockServer, token: Option<&str>) -> FirebaseRecordStore {
    FirebaseRecordStore::new(
        server.uri(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn unknown_record(key: &RecordKey) -> SosRecord {
    SosRecord::from_fix(&LocationFix::Unknown).with_key(key.clone())
}

#[tokio::test]
async fn write_puts_the_record_json_with_auth() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/SOSMessages/-Na.json"))
        .and(query_param("auth", "s3cret"))
        .and(body_json(json!({
            "Message": "SOS",
            "Latitude": "Unknown",
            "Longitude": "Unknown",
            "key": "-Na",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let key = RecordKey::new("-Na").unwrap();
    store(&server, Some("s3cret"))
        .write_record(&CollectionPath::default(), &key, &unknown_record(&key))
        .await
        .unwrap();
}

#[tokio::test]
async fn rejected_write_is_a_write_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/SOSMessages/-Na.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&server)
        .await;

    let key = RecordKey::new("-Na").unwrap();
    let result = store(&server, None)
        .write_record(&CollectionPath::default(), &key, &unknown_record(&key))
        .await;

    match result {
        Err(SosError::WriteFailed { message }) => {
            assert!(message.contains("503"), "{message}");
            assert!(message.contains("busy"), "{message}");
        }
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn null_collection_lists_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/SOSMessages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&server)
        .await;

    let records = store(&server, None)
        .list_records(&CollectionPath::default())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn snapshot_is_sorted_and_malformed_entries_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drills/SOSMessages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "-Nc": {"Message": "SOS", "Latitude": "1.5", "Longitude": "2.5", "key": ""},
            "-Na": {"Message": "SOS", "Latitude": "Unknown", "Longitude": "Unknown"},
            "-Nb": {"unexpected": true},
        })))
        .mount(&server)
        .await;

    let collection = CollectionPath::new("drills/SOSMessages").unwrap();
    let records = store(&server, None).list_records(&collection).await.unwrap();

    let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["-Na", "-Nc"]);
    assert_eq!(
        records[1].record.key.as_ref().map(RecordKey::as_str),
        Some("-Nc")
    );
    assert_eq!(records[1].record.parsed_coordinates(), Some((1.5, 2.5)));
}

#[tokio::test]
async fn refused_read_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/SOSMessages.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Permission denied"})))
        .mount(&server)
        .await;

    let result = store(&server, Some("expired"))
        .list_records(&CollectionPath::default())
        .await;
    assert!(matches!(result, Err(SosError::Network { .. })));
}
