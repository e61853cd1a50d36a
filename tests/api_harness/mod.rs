//! Shared HTTP test suite for record store backends
//!
//! The `relatorio_api_tests!` macro generates tests that drive a
//! `RelatorioStore` through the full REST layer:
//! JSON → HTTP request → handler → store → HTTP response → JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod api_harness;
//! relatorio_api_tests!(InMemoryRelatorioStore::new());
//! ```

#![allow(dead_code)]

use axum_test::TestServer;
use relatorios::prelude::*;
use serde_json::{Value, json};

/// Build a test server around a store, legacy aliases included
pub fn test_server(store: impl RelatorioStore + 'static) -> TestServer {
    let router = ServerBuilder::new()
        .with_store(store)
        .build()
        .expect("router should build");
    TestServer::new(router).unwrap()
}

/// The order used throughout the walkthrough scenario
pub fn bolo() -> Value {
    json!({
        "name": "Bolo",
        "value": 50,
        "isPaid": false,
        "order_number": "1001",
        "tel": "11999999999",
        "address": "Rua A"
    })
}

/// An order with a distinct name and number
pub fn pedido(name: &str, order_number: &str) -> Value {
    json!({
        "name": name,
        "value": 20,
        "isPaid": false,
        "order_number": order_number,
        "tel": "31988887777",
        "address": "Rua das Flores, 10"
    })
}

/// Generate the REST test suite for a store backend.
///
/// `$store_factory` must produce an `impl RelatorioStore + 'static`; it is
/// evaluated inside an async context, so it may `.await`.
///
/// # Generated Tests
///
/// - the create → pay → list → delete walkthrough
/// - list ordering and id monotonicity
/// - validation gating on create and update
/// - not-found and delete finality
/// - legacy route aliases
#[macro_export]
macro_rules! relatorio_api_tests {
    ($store_factory:expr) => {
        mod relatorio_api_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                api_harness::test_server(store)
            }

            async fn list(server: &TestServer) -> Vec<Value> {
                let response = server.get("/relatorios").await;
                response.assert_status_ok();
                response.json::<Vec<Value>>()
            }

            // ==============================================================
            // Walkthrough
            // ==============================================================

            #[tokio::test]
            async fn test_order_lifecycle() {
                let server = make_server().await;
                assert!(list(&server).await.is_empty());

                let created = server.post("/relatorios").json(&api_harness::bolo()).await;
                created.assert_status(StatusCode::CREATED);
                assert_eq!(
                    created.json::<Value>(),
                    json!({
                        "id": 1,
                        "name": "Bolo",
                        "isPaid": false,
                        "value": 50,
                        "order_number": "1001",
                        "tel": "11999999999",
                        "address": "Rua A"
                    })
                );

                let paid = server
                    .put("/relatorios/1")
                    .json(&json!({ "isPaid": true }))
                    .await;
                paid.assert_status_ok();
                assert_eq!(paid.json::<Value>(), json!({ "success": true }));

                let all = list(&server).await;
                assert_eq!(all.len(), 1);
                assert_eq!(all[0]["isPaid"], json!(true));

                let deleted = server.delete("/relatorios/1").await;
                deleted.assert_status_ok();
                assert_eq!(deleted.json::<Value>(), json!({ "changes": 1 }));

                assert!(list(&server).await.is_empty());
            }

            // ==============================================================
            // List
            // ==============================================================

            #[tokio::test]
            async fn test_ids_strictly_increase_in_creation_order() {
                let server = make_server().await;

                let mut ids = Vec::new();
                for (name, number) in [("Bolo", "1"), ("Torta", "2"), ("Pudim", "3")] {
                    let response = server
                        .post("/relatorios")
                        .json(&api_harness::pedido(name, number))
                        .await;
                    ids.push(response.json::<Value>()["id"].as_i64().unwrap());
                }
                assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids: {:?}", ids);

                let listed: Vec<i64> = list(&server)
                    .await
                    .iter()
                    .map(|r| r["id"].as_i64().unwrap())
                    .collect();
                assert_eq!(listed, ids);
            }

            #[tokio::test]
            async fn test_is_paid_always_listed_as_boolean() {
                let server = make_server().await;

                for flag in [json!(1), json!(0), json!("sim"), json!(false)] {
                    let mut payload = api_harness::bolo();
                    payload["isPaid"] = flag;
                    server
                        .post("/relatorios")
                        .json(&payload)
                        .await
                        .assert_status(StatusCode::CREATED);
                }

                let flags: Vec<Value> = list(&server)
                    .await
                    .iter()
                    .map(|r| r["isPaid"].clone())
                    .collect();
                assert_eq!(
                    flags,
                    vec![json!(true), json!(false), json!(true), json!(false)]
                );
            }

            #[tokio::test]
            async fn test_duplicate_payloads_create_distinct_rows() {
                let server = make_server().await;

                let a = server.post("/relatorios").json(&api_harness::bolo()).await;
                let b = server.post("/relatorios").json(&api_harness::bolo()).await;

                assert_ne!(a.json::<Value>()["id"], b.json::<Value>()["id"]);
                assert_eq!(list(&server).await.len(), 2);
            }

            // ==============================================================
            // Create validation
            // ==============================================================

            #[tokio::test]
            async fn test_create_without_name_is_rejected() {
                let server = make_server().await;
                let before = list(&server).await.len();

                let response = server
                    .post("/relatorios")
                    .json(&json!({
                        "isPaid": true,
                        "value": 10,
                        "order_number": "1002",
                        "tel": "11988887777",
                        "address": "Rua B"
                    }))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["error"],
                    "Missing name or isPaid or order_number or tel or address"
                );
                assert_eq!(list(&server).await.len(), before);
            }

            #[tokio::test]
            async fn test_create_requires_order_metadata() {
                let server = make_server().await;

                for field in ["order_number", "tel", "address"] {
                    let mut payload = api_harness::bolo();
                    payload.as_object_mut().unwrap().remove(field);
                    server
                        .post("/relatorios")
                        .json(&payload)
                        .await
                        .assert_status(StatusCode::BAD_REQUEST);
                }
                assert!(list(&server).await.is_empty());
            }

            #[tokio::test]
            async fn test_create_without_is_paid_is_rejected() {
                let server = make_server().await;
                let mut payload = api_harness::bolo();
                payload.as_object_mut().unwrap().remove("isPaid");

                let response = server.post("/relatorios").json(&payload).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "MISSING_FIELDS");
                assert!(list(&server).await.is_empty());
            }

            #[tokio::test]
            async fn test_create_with_null_is_paid_stores_unpaid() {
                let server = make_server().await;
                let mut payload = api_harness::bolo();
                payload["isPaid"] = Value::Null;

                let response = server.post("/relatorios").json(&payload).await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(response.json::<Value>()["isPaid"], json!(false));
                assert_eq!(list(&server).await[0]["isPaid"], json!(false));
            }

            #[tokio::test]
            async fn test_create_without_value_echoes_null() {
                let server = make_server().await;
                let mut payload = api_harness::bolo();
                payload.as_object_mut().unwrap().remove("value");

                let response = server.post("/relatorios").json(&payload).await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(response.json::<Value>()["value"], Value::Null);
            }

            #[tokio::test]
            async fn test_create_with_non_json_body_is_rejected() {
                let server = make_server().await;

                let response = server.post("/relatorios").text("name=Bolo").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_BODY");
            }

            // ==============================================================
            // Set paid status
            // ==============================================================

            #[tokio::test]
            async fn test_update_changes_only_target_row() {
                let server = make_server().await;
                server.post("/relatorios").json(&api_harness::pedido("Bolo", "1")).await;
                server.post("/relatorios").json(&api_harness::pedido("Torta", "2")).await;
                let before = list(&server).await;

                server
                    .put("/relatorios/2")
                    .json(&json!({ "isPaid": true }))
                    .await
                    .assert_status_ok();

                let after = list(&server).await;
                assert_eq!(after[0], before[0]);

                let mut expected = before[1].clone();
                expected["isPaid"] = json!(true);
                assert_eq!(after[1], expected);
            }

            #[tokio::test]
            async fn test_update_to_current_value_succeeds() {
                let server = make_server().await;
                server.post("/relatorios").json(&api_harness::bolo()).await;

                let response = server
                    .put("/relatorios/1")
                    .json(&json!({ "isPaid": false }))
                    .await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>(), json!({ "success": true }));
            }

            #[tokio::test]
            async fn test_update_requires_boolean() {
                let server = make_server().await;
                server.post("/relatorios").json(&api_harness::bolo()).await;

                for body in [json!({}), json!({ "isPaid": 1 }), json!({ "isPaid": "true" })] {
                    let response = server.put("/relatorios/1").json(&body).await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    assert_eq!(response.json::<Value>()["error"], "Missing isPaid status");
                }
                assert_eq!(list(&server).await[0]["isPaid"], json!(false));
            }

            #[tokio::test]
            async fn test_update_unknown_id_is_not_found() {
                let server = make_server().await;

                let response = server
                    .put("/relatorios/404")
                    .json(&json!({ "isPaid": true }))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Relatório not found");
            }

            #[tokio::test]
            async fn test_update_with_non_numeric_id_is_rejected() {
                let server = make_server().await;

                let response = server
                    .put("/relatorios/abc")
                    .json(&json!({ "isPaid": true }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_ID");
            }

            #[tokio::test]
            async fn test_update_with_padded_id_is_rejected() {
                let server = make_server().await;
                server.post("/relatorios").json(&api_harness::bolo()).await;

                let response = server
                    .put("/relatorios/%201")
                    .json(&json!({ "isPaid": true }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_ID");
                assert_eq!(list(&server).await[0]["isPaid"], json!(false));
            }

            // ==============================================================
            // Delete
            // ==============================================================

            #[tokio::test]
            async fn test_delete_is_final() {
                let server = make_server().await;
                server.post("/relatorios").json(&api_harness::pedido("Bolo", "1")).await;
                server.post("/relatorios").json(&api_harness::pedido("Torta", "2")).await;

                let first = server.delete("/relatorios/1").await;
                assert_eq!(first.json::<Value>(), json!({ "changes": 1 }));

                let remaining: Vec<i64> = list(&server)
                    .await
                    .iter()
                    .map(|r| r["id"].as_i64().unwrap())
                    .collect();
                assert_eq!(remaining, vec![2]);

                let again = server.delete("/relatorios/1").await;
                again.assert_status_ok();
                assert_eq!(again.json::<Value>(), json!({ "changes": 0 }));
            }

            #[tokio::test]
            async fn test_ids_not_reused_after_delete() {
                let server = make_server().await;
                server.post("/relatorios").json(&api_harness::bolo()).await;
                server.delete("/relatorios/1").await;

                let response = server.post("/relatorios").json(&api_harness::bolo()).await;
                assert_eq!(response.json::<Value>()["id"], json!(2));
            }

            // ==============================================================
            // Legacy aliases
            // ==============================================================

            #[tokio::test]
            async fn test_legacy_routes_share_the_store() {
                let server = make_server().await;

                server
                    .post("/api/relatorios/post")
                    .json(&api_harness::bolo())
                    .await
                    .assert_status(StatusCode::CREATED);
                server
                    .put("/api/relatorios/put/1")
                    .json(&json!({ "isPaid": true }))
                    .await
                    .assert_status_ok();

                let legacy = server.get("/api/relatorios/get").await;
                assert_eq!(legacy.json::<Vec<Value>>(), list(&server).await);

                let deleted = server.delete("/api/relatorios/delete/1").await;
                assert_eq!(deleted.json::<Value>(), json!({ "changes": 1 }));
            }

            // ==============================================================
            // Health
            // ==============================================================

            #[tokio::test]
            async fn test_health_and_readiness() {
                let server = make_server().await;

                let health = server.get("/health").await;
                health.assert_status_ok();
                assert_eq!(health.json::<Value>()["service"], "relatorios");

                server.get("/ready").await.assert_status_ok();
            }
        }
    };
}
