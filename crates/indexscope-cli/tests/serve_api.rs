//! Unit tests for serve mode API handlers.
//!
//! These tests drive the router against a static catalog backend,
//! without starting a full HTTP server or a database.

#![cfg(feature = "serve")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use indexscope_cli::server::{build_router, AppState, MetadataBackend, ServerConfig};
use indexscope_core::{IndexColumn, IndexMeta, IndexMethod, SchemaCatalog, TableIndexes};
use serde_json::Value;
use tower::ServiceExt;

fn sample_catalog() -> SchemaCatalog {
    SchemaCatalog {
        schema: "shop".to_string(),
        tables: vec![
            TableIndexes {
                name: "orders".to_string(),
                indexes: vec![
                    IndexMeta {
                        name: "PRIMARY".to_string(),
                        method: IndexMethod::Btree,
                        unique: true,
                        cardinality: 1000,
                        size_mb: 2.5,
                        columns: vec![IndexColumn {
                            name: "id".to_string(),
                            ordinal: 1,
                        }],
                    },
                    IndexMeta {
                        name: "idx_customer".to_string(),
                        method: IndexMethod::Btree,
                        unique: false,
                        cardinality: 40,
                        size_mb: 0.8,
                        columns: vec![IndexColumn {
                            name: "customer_id".to_string(),
                            ordinal: 1,
                        }],
                    },
                ],
            },
            TableIndexes {
                name: "logs".to_string(),
                indexes: vec![],
            },
        ],
    }
}

fn test_state() -> Arc<AppState> {
    let config = ServerConfig {
        database_url: None,
        seed: 42,
        port: 3000,
        open_browser: false,
    };
    Arc::new(AppState::new(
        config,
        MetadataBackend::Static(sample_catalog()),
    ))
}

async fn get_json(path: &str) -> (StatusCode, Value) {
    let app = build_router(test_state(), 3000);
    let response = app
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_returns_ok_status() {
    let (status, json) = get_json("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn schemas_lists_static_catalog() {
    let (status, json) = get_json("/api/schemas").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["schemas"], serde_json::json!(["shop"]));
}

#[tokio::test]
async fn tables_lists_catalog_tables() {
    let (status, json) = get_json("/api/tables/shop").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["schema"], "shop");
    assert_eq!(json["tables"], serde_json::json!(["orders", "logs"]));
}

#[tokio::test]
async fn tables_unknown_schema_is_not_found() {
    let (status, _) = get_json("/api/tables/elsewhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn graph_renders_selected_table() {
    let (status, json) = get_json("/api/graph/shop/orders").await;

    assert_eq!(status, StatusCode::OK);
    // 1 table + 2 indexes + 2 columns
    assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(json["graph"]["edges"].as_array().unwrap().len(), 4);
    assert_eq!(
        json["figure"]["nodes"].as_array().unwrap().len(),
        json["graph"]["nodes"].as_array().unwrap().len()
    );
    assert!(json["figure"]["placeholder"].is_null());
    assert_eq!(json["issues"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn graph_for_indexless_table_has_placeholder() {
    let (status, json) = get_json("/api/graph/shop/logs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["figure"]["placeholder"].is_string());
    let codes: Vec<&str> = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"NO_INDEXES"));
}

#[tokio::test]
async fn graph_unknown_table_is_not_found() {
    let (status, _) = get_json("/api/graph/shop/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn graph_unknown_schema_is_not_found() {
    let (status, _) = get_json("/api/graph/elsewhere/orders").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn graph_seed_is_deterministic() {
    let (_, a) = get_json("/api/graph/shop/orders?seed=7").await;
    let (_, b) = get_json("/api/graph/shop/orders?seed=7").await;
    assert_eq!(a["figure"]["nodes"], b["figure"]["nodes"]);
}

#[tokio::test]
async fn config_reports_static_source() {
    let (status, json) = get_json("/api/config").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "static");
    assert_eq!(json["seed"], 42);
}

#[tokio::test]
async fn index_page_is_served_as_fallback() {
    let app = build_router(test_state(), 3000);
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("IndexScope"));
}
