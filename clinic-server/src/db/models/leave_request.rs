//! Leave Request Model (staff leave, independent of the clinical flow)

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Only PENDING requests can be decided; decisions are final.
    pub fn can_transition_to(self, next: LeaveStatus) -> bool {
        matches!(
            (self, next),
            (LeaveStatus::Pending, LeaveStatus::Approved) | (LeaveStatus::Pending, LeaveStatus::Rejected)
        )
    }
}

/// Staff leave record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub requester: RecordId,
    pub requester_name: String,
    pub leave_type: LeaveType,
    /// First day of leave (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of leave, inclusive (YYYY-MM-DD)
    pub end_date: String,
    pub reason: String,
    pub status: LeaveStatus,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub approver: Option<RecordId>,
    pub approver_name: Option<String>,
    pub created_at: i64,
}

/// Create leave request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LeaveRequestCreate {
    /// Requesting staff member ("user:xxx")
    pub requester: String,
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    #[validate(length(min = 1, max = 1024))]
    pub reason: String,
}

/// Decide a leave request
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveStatusUpdate {
    pub status: LeaveStatus,
    /// Deciding staff member ("user:xxx")
    pub approver: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_can_be_decided() {
        use LeaveStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Approved.can_transition_to(Pending));
    }
}
