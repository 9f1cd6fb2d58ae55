//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Staff
pub mod user;
pub mod leave_request;

// Clinical flow
pub mod patient;
pub mod visit;
pub mod treatment;

// Catalog
pub mod service;

// Finance
pub mod commission;
pub mod payment;

// Sequences
pub mod counter;

// Re-exports
pub use commission::CommissionRepository;
pub use counter::CounterRepository;
pub use leave_request::LeaveRequestRepository;
pub use patient::PatientRepository;
pub use payment::PaymentRepository;
pub use service::ServiceRepository;
pub use treatment::TreatmentRepository;
pub use user::UserRepository;
pub use visit::VisitRepository;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "visit:abc".parse()?;
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse a "table:id" string into a RecordId
pub fn parse_record_id(id: &str) -> RepoResult<surrealdb::RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

/// `SELECT count() ... GROUP ALL` result row
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}
