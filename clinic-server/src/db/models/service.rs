//! Service Model (treatment catalog)

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Catalog entry: a billable procedure the clinic offers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogService {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: Option<String>,
    pub base_price: f64,
    /// Percentage of the treatment subtotal paid to the performer
    pub commission_rate: f64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create service payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CatalogServiceCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub commission_rate: f64,
}

/// Update service payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CatalogServiceUpdate {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub base_price: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub commission_rate: Option<f64>,
    pub is_active: Option<bool>,
}
