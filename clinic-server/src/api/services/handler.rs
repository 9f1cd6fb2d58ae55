//! Service Catalog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{CatalogService, CatalogServiceCreate, CatalogServiceUpdate};
use crate::db::repository::ServiceRepository;
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// List catalog services (active only by default)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<CatalogService>>>> {
    let repo = ServiceRepository::new(state.db.clone());
    let services = if query.include_inactive {
        repo.find_all_with_inactive().await?
    } else {
        repo.find_all().await?
    };
    Ok(ok(services))
}

/// Get service by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CatalogService>>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {} not found", id)))?;
    Ok(ok(service))
}

/// Create a catalog entry
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CatalogServiceCreate>,
) -> AppResult<Json<ApiResponse<CatalogService>>> {
    payload.validate()?;

    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.create(payload).await?;
    Ok(ok(service))
}

/// Update a catalog entry
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CatalogServiceUpdate>,
) -> AppResult<Json<ApiResponse<CatalogService>>> {
    payload.validate()?;

    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.update(&id, payload).await?;
    Ok(ok(service))
}
