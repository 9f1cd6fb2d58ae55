//! Visit API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, Page, PageQuery};

use crate::core::ServerState;
use crate::db::models::{CompletedVisit, Visit, VisitCreate, VisitStatus, VisitStatusUpdate};
use crate::db::repository::VisitRepository;
use crate::services::VisitService;
use crate::utils::{AppError, AppResult, ok};

fn visit_service(state: &ServerState) -> VisitService {
    VisitService::new(state.db.clone(), state.sequence.clone(), state.config.timezone)
}

/// Status/search filter for the visit list
#[derive(Debug, Deserialize)]
pub struct ListFilter {
    pub status: Option<VisitStatus>,
    pub search: Option<String>,
}

/// Free-text filter for queue/completed views
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// List visits (paginated, filterable by status and free-text search)
pub async fn list(
    State(state): State<ServerState>,
    Query(pq): Query<PageQuery>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Json<ApiResponse<Page<Visit>>>> {
    let (page, limit) = pq.normalize();
    let repo = VisitRepository::new(state.db.clone());
    let (visits, total) = repo
        .find_page(filter.status, filter.search.as_deref(), page, limit)
        .await?;
    Ok(ok(Page::new(visits, total, page, limit)))
}

/// Create a visit (registers the patient if needed)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VisitCreate>,
) -> AppResult<Json<ApiResponse<Visit>>> {
    let visit = visit_service(&state).create_visit(payload).await?;
    Ok(ok(visit))
}

/// Today's queue: WAITING / IN_PROGRESS visits ordered by queue number
pub async fn queue(
    State(state): State<ServerState>,
    Query(filter): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Visit>>>> {
    let visits = visit_service(&state).queue(filter.search.as_deref()).await?;
    Ok(ok(visits))
}

/// Completed visits with the latest treatment's diagnosis and service name
pub async fn completed(
    State(state): State<ServerState>,
    Query(pq): Query<PageQuery>,
    Query(filter): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Page<CompletedVisit>>>> {
    let (page, limit) = pq.normalize();
    let repo = VisitRepository::new(state.db.clone());
    let (visits, total) = repo
        .find_completed_page(filter.search.as_deref(), page, limit)
        .await?;
    Ok(ok(Page::new(visits, total, page, limit)))
}

/// Get visit by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Visit>>> {
    let repo = VisitRepository::new(state.db.clone());
    let visit = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Visit {} not found", id)))?;
    Ok(ok(visit))
}

/// Transition visit status (illegal jumps are rejected with 422)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<VisitStatusUpdate>,
) -> AppResult<Json<ApiResponse<Visit>>> {
    let visit = visit_service(&state).update_status(&id, payload.status).await?;
    Ok(ok(visit))
}
