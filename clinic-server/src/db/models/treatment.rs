//! Treatment Model
//!
//! 治疗记录是只追加的账本：创建后不可修改，
//! visit.total_cost 的累加因此不会漂移。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// One billable procedure applied during a visit (immutable once created)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub visit: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub service: RecordId,
    /// Catalog name copied at creation time
    pub service_name: String,
    /// Staff member who performed the procedure
    #[serde(with = "serde_helpers::record_id")]
    pub performer: RecordId,
    pub performer_name: String,
    /// FDI tooth notation, e.g. "36"
    pub tooth_number: Option<String>,
    pub diagnosis: Option<String>,
    pub quantity: i32,
    /// Copied from the service's base price at creation time
    pub unit_price: f64,
    pub discount: f64,
    /// unit_price * quantity - discount
    pub subtotal: f64,
    pub created_at: i64,
}

/// Create treatment payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TreatmentCreate {
    /// Visit record id ("visit:xxx")
    pub visit: String,
    /// Service record id ("service:xxx")
    pub service: String,
    /// Performing staff member ("user:xxx")
    pub performer: String,
    #[validate(length(max = 8))]
    pub tooth_number: Option<String>,
    #[validate(length(max = 1024))]
    pub diagnosis: Option<String>,
    #[validate(range(min = 1, max = 99))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub discount: f64,
}
