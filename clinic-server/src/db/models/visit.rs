//! Visit Model
//!
//! 一次就诊从挂号 (WAITING) 到完成 (COMPLETED) 的全程记录。
//! 状态机是封闭的：非法跳转在 `can_transition_to` 处被拒绝。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::patient::Gender;
use super::serde_helpers;

/// Visit status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitStatus {
    Waiting,
    InProgress,
    Completed,
    Cancelled,
}

impl VisitStatus {
    /// Closed transition table:
    ///
    /// ```text
    /// WAITING ──▶ IN_PROGRESS ──▶ COMPLETED
    ///    │             │
    ///    └──▶ CANCELLED ◀┘
    /// ```
    ///
    /// COMPLETED and CANCELLED are terminal.
    pub fn can_transition_to(self, next: VisitStatus) -> bool {
        use VisitStatus::*;
        matches!(
            (self, next),
            (Waiting, InProgress) | (Waiting, Cancelled) | (InProgress, Completed) | (InProgress, Cancelled)
        )
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VisitStatus::Waiting => "WAITING",
            VisitStatus::InProgress => "IN_PROGRESS",
            VisitStatus::Completed => "COMPLETED",
            VisitStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Vitals captured at check-in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub blood_pressure: Option<String>,
    pub pulse: Option<i32>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
}

/// One clinic encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Human-readable number, e.g. "V-20250115-0007"
    pub visit_number: String,
    /// Per-day walk-in ordinal, starts at 1 each day
    pub queue_number: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub patient: RecordId,
    pub patient_number: String,
    pub patient_name: String,
    /// Staff member (nurse/doctor) who created the visit
    #[serde(with = "serde_helpers::record_id")]
    pub attendant: RecordId,
    pub attendant_name: String,
    pub status: VisitStatus,
    pub chief_complaint: Option<String>,
    pub vitals: Option<Vitals>,
    /// Sum of treatment subtotals, accumulated inside the treatment transaction
    pub total_cost: f64,
    /// Check-in timestamp (Unix millis)
    pub visit_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Patient reference embedded in visit creation
///
/// Resolution order: explicit `id` → phone match → create new.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VisitPatient {
    /// Existing patient record id ("patient:xxx")
    pub id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub allergy_notes: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Create visit payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VisitCreate {
    #[validate(nested)]
    pub patient: VisitPatient,
    /// Staff member creating the visit ("user:xxx")
    pub attendant: String,
    #[validate(length(max = 1024))]
    pub chief_complaint: Option<String>,
    pub vitals: Option<Vitals>,
}

/// Status update payload
#[derive(Debug, Clone, Deserialize)]
pub struct VisitStatusUpdate {
    pub status: VisitStatus,
}

/// Completed-visit row for the history list: visit fields plus the most
/// recent treatment's diagnosis and service name.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedVisit {
    #[serde(flatten)]
    pub visit: Visit,
    pub diagnosis: Option<String>,
    pub service_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions() {
        use VisitStatus::*;
        assert!(Waiting.can_transition_to(InProgress));
        assert!(Waiting.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_reject_everything() {
        use VisitStatus::*;
        for next in [Waiting, InProgress, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn no_skipping_ahead() {
        use VisitStatus::*;
        assert!(!Waiting.can_transition_to(Completed));
        assert!(!Waiting.can_transition_to(Waiting));
        assert!(!InProgress.can_transition_to(Waiting));
    }

    // The dashboard matches on these literal strings; keep them stable.
    #[test]
    fn status_uses_the_wire_format() {
        assert_eq!(serde_json::to_string(&VisitStatus::Waiting).unwrap(), "\"WAITING\"");
        assert_eq!(serde_json::to_string(&VisitStatus::InProgress).unwrap(), "\"IN_PROGRESS\"");
        assert_eq!(serde_json::to_string(&VisitStatus::Completed).unwrap(), "\"COMPLETED\"");
        assert_eq!(serde_json::to_string(&VisitStatus::Cancelled).unwrap(), "\"CANCELLED\"");
    }
}
