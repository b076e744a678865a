//! Operator-facing HTTP surface: health probe and table overview. This is
//! not the game transport; it exists so deployments can be monitored.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use table_service::LobbyService;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TablesResponse {
    pub table_count: usize,
    pub tables: Vec<TableSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub table_id: String,
    pub phase: String,
    pub hand_no: u64,
    pub seated: usize,
}

pub fn build_router(lobby: Arc<LobbyService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tables", get(tables))
        .with_state(lobby)
}

async fn health() -> Json<HealthResponse> {
    info!(route = "/health", "ops http request");
    Json(HealthResponse {
        ok: true,
        service: "holdem-server",
    })
}

async fn tables(State(lobby): State<Arc<LobbyService>>) -> Json<TablesResponse> {
    info!(route = "/tables", "ops http request");
    let views = lobby.tables().await;
    let tables: Vec<TableSummary> = views
        .iter()
        .map(|view| TableSummary {
            table_id: view.table_id.to_string(),
            phase: format!("{:?}", view.phase).to_lowercase(),
            hand_no: view.hand_no,
            seated: view.seats.iter().flatten().count(),
        })
        .collect();
    Json(TablesResponse {
        table_count: tables.len(),
        tables,
    })
}
