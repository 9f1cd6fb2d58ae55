//! Payment API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/visit/{visit_id}", get(handler::list_by_visit))
        .route("/{id}", get(handler::get_by_id))
}
