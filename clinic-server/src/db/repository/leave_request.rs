//! Leave Request Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{LeaveRequest, LeaveStatus, LeaveType};

/// Fields assembled by the handler before insertion
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub requester: RecordId,
    pub requester_name: String,
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

#[derive(Clone)]
pub struct LeaveRequestRepository {
    base: BaseRepository,
}

impl LeaveRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new request with status PENDING
    pub async fn create(&self, data: NewLeaveRequest) -> RepoResult<LeaveRequest> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE leave_request SET
                    requester = $requester,
                    requester_name = $requester_name,
                    leave_type = $leave_type,
                    start_date = $start_date,
                    end_date = $end_date,
                    reason = $reason,
                    status = 'PENDING',
                    approver = NONE,
                    approver_name = NONE,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("requester", data.requester))
            .bind(("requester_name", data.requester_name))
            .bind(("leave_type", data.leave_type))
            .bind(("start_date", data.start_date))
            .bind(("end_date", data.end_date))
            .bind(("reason", data.reason))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let created: Option<LeaveRequest> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create leave request".to_string()))
    }

    /// Find request by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<LeaveRequest>> {
        let thing = parse_record_id(id)?;
        let request: Option<LeaveRequest> = self.base.db().select(thing).await?;
        Ok(request)
    }

    /// Paginated listing, filterable by status and requester
    pub async fn find_page(
        &self,
        status: Option<LeaveStatus>,
        requester_id: Option<&str>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<LeaveRequest>, u64)> {
        let requester = match requester_id {
            Some(id) => Some(parse_record_id(id)?),
            None => None,
        };

        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = $status");
        }
        if requester.is_some() {
            conditions.push("requester = $requester");
        }
        let filter = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let start = (page.max(1) - 1) * limit;
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM leave_request {filter} ORDER BY created_at DESC LIMIT $limit START $start"
            ))
            .query(format!("SELECT count() FROM leave_request {filter} GROUP ALL"))
            .bind(("status", status))
            .bind(("requester", requester))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let requests: Vec<LeaveRequest> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((requests, total))
    }

    /// Record a decision (legality is checked by the handler)
    pub async fn update_status(
        &self,
        id: &str,
        status: LeaveStatus,
        approver: RecordId,
        approver_name: String,
    ) -> RepoResult<LeaveRequest> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    status = $status,
                    approver = $approver,
                    approver_name = $approver_name
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("approver", approver))
            .bind(("approver_name", approver_name))
            .await?;

        result
            .take::<Option<LeaveRequest>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Leave request {} not found", id)))
    }
}
