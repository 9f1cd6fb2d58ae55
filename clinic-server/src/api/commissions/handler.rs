//! Commission API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Datelike;
use serde::Deserialize;
use shared::ApiResponse;

use crate::billing;
use crate::core::ServerState;
use crate::db::models::CommissionReport;
use crate::db::repository::CommissionRepository;
use crate::utils::{AppError, AppResult, ok};

/// Period/staff filter; month and year default to the current period
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Staff record id ("user:xxx")
    pub staff: Option<String>,
}

/// Monthly commission report, optionally per staff member
pub async fn report(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<CommissionReport>>> {
    let now = chrono::Utc::now().with_timezone(&state.config.timezone);
    let month = query.month.unwrap_or_else(|| now.month());
    let year = query.year.unwrap_or_else(|| now.year());

    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!("Invalid month: {}", month)));
    }

    let repo = CommissionRepository::new(state.db.clone());
    let items = repo.find_by_period(query.staff.as_deref(), month, year).await?;
    let total_amount = billing::sum_amounts(items.iter().map(|c| c.amount));

    Ok(ok(CommissionReport {
        items,
        total_amount,
    }))
}
