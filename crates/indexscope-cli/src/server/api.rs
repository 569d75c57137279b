//! REST API handlers for serve mode.
//!
//! Selection changes in the web UI map to one request each; every graph
//! request runs the full introspect → build → layout → figure pipeline.

use std::error::Error;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use indexscope_core::{render, BuildError, RenderOptions};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Build the API router with all endpoints.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/schemas", get(schemas))
        .route("/tables/{schema}", get(tables))
        .route("/graph/{schema}/{table}", get(graph))
        .route("/config", get(config))
}

// === Request/Response types ===

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct SchemasResponse {
    schemas: Vec<String>,
}

#[derive(Serialize)]
struct TablesResponse {
    schema: String,
    tables: Vec<String>,
}

#[derive(Deserialize)]
struct GraphQuery {
    seed: Option<u64>,
}

#[derive(Serialize)]
struct ConfigResponse {
    source: &'static str,
    seed: u64,
}

/// Map a backend failure to an HTTP response: unknown schema/table is a
/// 404, everything else (connection, query) is a bad gateway.
fn backend_error(err: Box<dyn Error + Send + Sync>) -> (StatusCode, String) {
    if err.downcast_ref::<BuildError>().is_some() {
        (StatusCode::NOT_FOUND, err.to_string())
    } else {
        (StatusCode::BAD_GATEWAY, err.to_string())
    }
}

// === Handlers ===

/// GET /api/health - Health check with version
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/schemas - List schemas the backend can serve
async fn schemas(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let schemas = state.backend.list_schemas().await.map_err(backend_error)?;
    Ok(Json(SchemasResponse { schemas }))
}

/// GET /api/tables/{schema} - List tables of a schema
async fn tables(
    State(state): State<Arc<AppState>>,
    Path(schema): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let tables = state
        .backend
        .list_tables(&schema)
        .await
        .map_err(backend_error)?;
    Ok(Json(TablesResponse { schema, tables }))
}

/// GET /api/graph/{schema}/{table} - Run the render pipeline
async fn graph(
    State(state): State<Arc<AppState>>,
    Path((schema, table)): Path<(String, String)>,
    Query(query): Query<GraphQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let catalog = state.backend.catalog(&schema).await.map_err(backend_error)?;

    let options = RenderOptions::with_seed(query.seed.unwrap_or(state.config.seed));
    let result = render(&catalog, &table, &options)
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))?;

    Ok(Json(result))
}

/// GET /api/config - Get server configuration
async fn config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ConfigResponse {
        source: state.backend.describe(),
        seed: state.config.seed,
    })
}
