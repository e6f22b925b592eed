//! HTTP event source against a wiremock server: request construction,
//! paging, filtering and error mapping.

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use supplyrecon_core::{LocationId, Requirement, Subdivision, TypeId};
use supplyrecon_infra::{EventSource, HttpEventSource, Reconciler, SourceConfig, SourceError};

const CORP: i64 = 98_000_001;
const FACILITY: i64 = 1_030_000_000_000;

fn source(server: &MockServer) -> HttpEventSource {
    let config = SourceConfig::new(server.uri(), CORP)
        .with_facility(LocationId::new(FACILITY))
        .with_access_token("test-token");
    HttpEventSource::new(&config).expect("client build")
}

fn log_json(flag: &str, action: &str, quantity: i64, location: i64, at: &str) -> serde_json::Value {
    json!({
        "logged_at": at,
        "character_id": 2112625428i64,
        "location_id": location,
        "location_flag": flag,
        "action": action,
        "type_id": 34,
        "quantity": quantity
    })
}

#[tokio::test]
async fn movement_log_follows_pages_and_filters() {
    let server = MockServer::start().await;
    let logs_path = format!("/corporations/{CORP}/containers/logs/");

    Mock::given(method("GET"))
        .and(path(logs_path.as_str()))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Pages", "2")
                .set_body_json(json!([
                    log_json("CorpSAG2", "add", 200, FACILITY, "2024-03-01T12:00:00Z"),
                    log_json("CorpSAG2", "add", 999, FACILITY + 1, "2024-03-01T12:00:00Z"),
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(logs_path.as_str()))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Pages", "2")
                .set_body_json(json!([
                    log_json("CorpSAG2", "add", 150, FACILITY, "2024-03-01T13:00:00Z"),
                    log_json("CorpSAG2", "remove", 50, FACILITY, "2024-02-01T13:00:00Z"),
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let since = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let logs = source(&server)
        .fetch_movement_log(LocationId::new(FACILITY), Some(since))
        .await
        .expect("fetch");

    let quantities: Vec<i64> = logs.iter().map(|e| e.quantity).collect();
    assert_eq!(quantities, vec![200, 150]);
}

#[tokio::test]
async fn asset_snapshot_is_scoped_to_the_facility() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/corporations/{CORP}/assets/").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"item_id": 1, "type_id": 34, "location_id": FACILITY, "location_flag": "CorpSAG2",
             "quantity": 300, "is_singleton": false},
            {"item_id": 2, "type_id": 34, "location_id": FACILITY, "location_flag": "CorpDeliveries",
             "quantity": 20, "is_singleton": false},
            {"item_id": 3, "type_id": 34, "location_id": 60003760, "location_flag": "Hangar",
             "quantity": 5000, "is_singleton": false}
        ])))
        .mount(&server)
        .await;

    let assets = source(&server)
        .fetch_asset_snapshot(LocationId::new(FACILITY))
        .await
        .expect("fetch");
    assert_eq!(assets.len(), 2);
}

#[tokio::test]
async fn http_errors_are_reported_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/corporations/{CORP}/assets/").as_str()))
        .respond_with(ResponseTemplate::new(403).set_body_string("token is not valid"))
        .mount(&server)
        .await;

    let err = source(&server)
        .fetch_asset_snapshot(LocationId::new(FACILITY))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SourceError::Http {
            status: 403,
            body: "token is not valid".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_bodies_are_parse_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/corporations/{CORP}/containers/logs/").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            log_json("CorpSAG2", "teleport", 1, FACILITY, "2024-03-01T12:00:00Z")
        ])))
        .mount(&server)
        .await;

    let err = source(&server)
        .fetch_movement_log(LocationId::new(FACILITY), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
}

#[tokio::test]
async fn type_names_are_resolved_best_effort() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/universe/names/"))
        .and(body_json(json!([34, 35])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 34, "name": "Tritanium", "category": "inventory_type"},
            {"id": 35, "name": "Some Station", "category": "station"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ids = BTreeSet::from([TypeId::new(34), TypeId::new(35)]);
    let names = source(&server).resolve_type_names(&ids).await.expect("names");
    assert_eq!(names.len(), 1);
    assert_eq!(names[&TypeId::new(34)], "Tritanium");
}

#[tokio::test]
async fn reconciler_over_http_degrades_when_server_is_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(source(&server), Some(LocationId::new(FACILITY)));
    let requirement = Requirement::outstanding(TypeId::new(34), 500).unwrap();
    let result = reconciler
        .reconcile(Subdivision::new(2).unwrap(), &[requirement], None)
        .await;

    assert!(result.deliveries.is_empty());
    assert!(!result.source.is_available());
}
