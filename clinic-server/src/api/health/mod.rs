//! Health Check API

use axum::{Json, Router, routing::get};
use serde::Serialize;
use shared::ApiResponse;

use crate::core::ServerState;

#[derive(Serialize)]
struct HealthInfo {
    status: &'static str,
    version: &'static str,
}

/// Health router
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<ApiResponse<HealthInfo>> {
    Json(ApiResponse::ok(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
