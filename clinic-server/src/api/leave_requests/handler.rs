//! Leave Request API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, Page, PageQuery};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{LeaveRequest, LeaveRequestCreate, LeaveStatus, LeaveStatusUpdate};
use crate::db::repository::leave_request::NewLeaveRequest;
use crate::db::repository::{LeaveRequestRepository, UserRepository};
use crate::utils::{AppError, AppResult, ok, time};

/// Status/requester filter
#[derive(Debug, Deserialize)]
pub struct ListFilter {
    pub status: Option<LeaveStatus>,
    /// Requesting staff member ("user:xxx")
    pub requester: Option<String>,
}

/// List leave requests (paginated, filterable)
pub async fn list(
    State(state): State<ServerState>,
    Query(pq): Query<PageQuery>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Json<ApiResponse<Page<LeaveRequest>>>> {
    let (page, limit) = pq.normalize();
    let repo = LeaveRequestRepository::new(state.db.clone());
    let (requests, total) = repo
        .find_page(filter.status, filter.requester.as_deref(), page, limit)
        .await?;
    Ok(ok(Page::new(requests, total, page, limit)))
}

/// Get leave request by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    let repo = LeaveRequestRepository::new(state.db.clone());
    let request = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Leave request {} not found", id)))?;
    Ok(ok(request))
}

/// File a leave request (status starts at PENDING)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LeaveRequestCreate>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    payload.validate()?;

    let start = time::parse_date(&payload.start_date)?;
    let end = time::parse_date(&payload.end_date)?;
    if end < start {
        return Err(AppError::validation(format!(
            "end_date {} is before start_date {}",
            payload.end_date, payload.start_date
        )));
    }

    let users = UserRepository::new(state.db.clone());
    let requester = users
        .find_by_id(&payload.requester)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", payload.requester)))?;
    let requester_id = requester
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id"))?;

    let repo = LeaveRequestRepository::new(state.db.clone());
    let request = repo
        .create(NewLeaveRequest {
            requester: requester_id,
            requester_name: requester.display_name.clone(),
            leave_type: payload.leave_type,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
        })
        .await?;
    Ok(ok(request))
}

/// Decide a leave request (only PENDING requests can be decided)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LeaveStatusUpdate>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    let repo = LeaveRequestRepository::new(state.db.clone());
    let request = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Leave request {} not found", id)))?;

    if !request.status.can_transition_to(payload.status) {
        return Err(AppError::business_rule(format!(
            "Leave request is already {:?}",
            request.status
        )));
    }

    let users = UserRepository::new(state.db.clone());
    let approver = users
        .find_by_id(&payload.approver)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", payload.approver)))?;
    let approver_id = approver
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id"))?;

    let request = repo
        .update_status(&id, payload.status, approver_id, approver.display_name.clone())
        .await?;
    Ok(ok(request))
}
