//! Commission Model
//!
//! 每条治疗记录派生一条抽成，与治疗在同一事务内写入。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Derived payout record for the staff member who performed a treatment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commission {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub treatment: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub staff: RecordId,
    pub staff_name: String,
    /// Visit number the treatment belongs to (for display)
    pub visit_number: String,
    /// subtotal * rate / 100
    pub amount: f64,
    /// Commission rate copied from the service at creation time
    pub rate: f64,
    /// Calendar month (1-12) in the business timezone
    pub month: u32,
    pub year: i32,
    pub created_at: i64,
}

/// Commission report: matching rows plus their summed amount
#[derive(Debug, Serialize)]
pub struct CommissionReport {
    pub items: Vec<Commission>,
    pub total_amount: f64,
}
