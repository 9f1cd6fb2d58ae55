//! Visit API Module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Visit router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/visits", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Today's walk-in queue
        .route("/queue", get(handler::queue))
        // Completed visits with latest diagnosis/service joined in
        .route("/completed", get(handler::completed))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
}
