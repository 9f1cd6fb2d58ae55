//! Patient Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

/// Patient identity record
///
/// Created on first visit; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Human-readable number, e.g. "P-000042"
    pub patient_number: String,
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    pub phone: String,
    pub address: Option<String>,
    /// Known allergies, free text
    pub allergy_notes: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: i64,
}

/// Create patient payload (used standalone and embedded in visit creation)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatientCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    #[validate(length(min = 6, max = 20))]
    pub phone: String,
    pub address: Option<String>,
    pub allergy_notes: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Update patient payload (contact/medical metadata only; number is immutable)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatientUpdate {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub allergy_notes: Option<String>,
    pub emergency_contact: Option<String>,
}
