//! Treatment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::{Treatment, TreatmentCreate};
use crate::db::repository::TreatmentRepository;
use crate::services::TreatmentService;
use crate::utils::{AppResult, ok};

/// Record a treatment (inserts the commission in the same transaction)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TreatmentCreate>,
) -> AppResult<Json<ApiResponse<Treatment>>> {
    let service = TreatmentService::new(state.db.clone(), state.config.timezone);
    let treatment = service.create(payload).await?;
    Ok(ok(treatment))
}

/// All treatments of a visit, oldest first
pub async fn list_by_visit(
    State(state): State<ServerState>,
    Path(visit_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Treatment>>>> {
    let repo = TreatmentRepository::new(state.db.clone());
    let treatments = repo.find_by_visit(&visit_id).await?;
    Ok(ok(treatments))
}
