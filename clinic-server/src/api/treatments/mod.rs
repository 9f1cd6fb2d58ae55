//! Treatment API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Treatment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/treatments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/visit/{visit_id}", get(handler::list_by_visit))
}
