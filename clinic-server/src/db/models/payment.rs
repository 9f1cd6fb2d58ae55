//! Payment Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Card,
    Qris,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Partial,
    Refunded,
}

/// One payment event against a visit
///
/// A visit may carry multiple payments; their sum is not reconciled
/// against the visit total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Human-readable number, e.g. "PAY-202501-0004"
    pub payment_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub visit: RecordId,
    pub visit_number: String,
    pub patient_name: String,
    pub method: PaymentMethod,
    /// Amount billed
    pub amount: f64,
    /// Amount tendered by the patient
    pub paid_amount: f64,
    /// max(paid_amount - amount, 0)
    pub change_amount: f64,
    /// PAID iff paid_amount >= amount, else PARTIAL
    pub status: PaymentStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentCreate {
    /// Visit record id ("visit:xxx")
    pub visit: String,
    pub method: PaymentMethod,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(range(min = 0.0))]
    pub paid_amount: f64,
    #[validate(length(max = 128))]
    pub reference: Option<String>,
    #[validate(length(max = 1024))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The dashboard matches on these literal strings; keep them stable.
    #[test]
    fn enums_use_the_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"CASH\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Transfer).unwrap(), "\"TRANSFER\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"CARD\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Qris).unwrap(), "\"QRIS\"");

        assert_eq!(serde_json::to_string(&PaymentStatus::Pending).unwrap(), "\"PENDING\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"PAID\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::Partial).unwrap(), "\"PARTIAL\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::Refunded).unwrap(), "\"REFUNDED\"");
    }
}
