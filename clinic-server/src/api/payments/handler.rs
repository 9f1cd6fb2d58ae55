//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, Page, PageQuery};

use crate::core::ServerState;
use crate::db::models::{Payment, PaymentCreate};
use crate::db::repository::PaymentRepository;
use crate::services::PaymentService;
use crate::utils::{AppError, AppResult, ok};

/// Free-text filter over payment number, visit number and patient name
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// List payments (paginated, searchable)
pub async fn list(
    State(state): State<ServerState>,
    Query(pq): Query<PageQuery>,
    Query(filter): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Page<Payment>>>> {
    let (page, limit) = pq.normalize();
    let repo = PaymentRepository::new(state.db.clone());
    let (payments, total) = repo.find_page(filter.search.as_deref(), page, limit).await?;
    Ok(ok(Page::new(payments, total, page, limit)))
}

/// Record a payment against a visit
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let service = PaymentService::new(state.db.clone(), state.sequence.clone());
    let payment = service.create(payload).await?;
    Ok(ok(payment))
}

/// All payments of a visit, newest first
pub async fn list_by_visit(
    State(state): State<ServerState>,
    Path(visit_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Payment>>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.find_by_visit(&visit_id).await?;
    Ok(ok(payments))
}

/// Get payment by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment {} not found", id)))?;
    Ok(ok(payment))
}
