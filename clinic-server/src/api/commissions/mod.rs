//! Commission API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Commission router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/commissions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::report))
}
