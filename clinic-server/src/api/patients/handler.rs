//! Patient API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, Page, PageQuery};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Patient, PatientCreate, PatientUpdate};
use crate::db::repository::PatientRepository;
use crate::utils::{AppError, AppResult, ok};

/// Free-text filter (`?search=ani`)
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// List patients (paginated, searchable by name/number/phone)
pub async fn list(
    State(state): State<ServerState>,
    Query(pq): Query<PageQuery>,
    Query(filter): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Page<Patient>>>> {
    let (page, limit) = pq.normalize();
    let repo = PatientRepository::new(state.db.clone());
    let (patients, total) = repo.find_page(filter.search.as_deref(), page, limit).await?;
    Ok(ok(Page::new(patients, total, page, limit)))
}

/// Get patient by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Patient>>> {
    let repo = PatientRepository::new(state.db.clone());
    let patient = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Patient {} not found", id)))?;
    Ok(ok(patient))
}

/// Register a new patient (walk-in registration without a visit)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PatientCreate>,
) -> AppResult<Json<ApiResponse<Patient>>> {
    payload.validate()?;

    let patient_number = state.sequence.next_patient_number().await?;
    let repo = PatientRepository::new(state.db.clone());
    let patient = repo.create(patient_number, payload).await?;
    Ok(ok(patient))
}

/// Update patient contact/medical metadata
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PatientUpdate>,
) -> AppResult<Json<ApiResponse<Patient>>> {
    payload.validate()?;

    let repo = PatientRepository::new(state.db.clone());
    let patient = repo.update(&id, payload).await?;
    Ok(ok(patient))
}
