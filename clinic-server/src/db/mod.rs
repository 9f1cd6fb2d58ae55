//! Database Module
//!
//! Handles the embedded SurrealDB instance and schema definition

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path` and apply schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("clinic")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready (SurrealDB embedded, path={})", db_path);

        Ok(Self { db })
    }
}

/// Define tables and indexes
///
/// 人类可读编号字段带 UNIQUE 索引：计数器保证不会撞号，
/// 索引保证即使撞了也写不进去。
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS patient SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS patient_number_idx ON patient FIELDS patient_number UNIQUE;
        DEFINE INDEX IF NOT EXISTS patient_phone_idx ON patient FIELDS phone;

        DEFINE TABLE IF NOT EXISTS visit SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS visit_number_idx ON visit FIELDS visit_number UNIQUE;
        DEFINE INDEX IF NOT EXISTS visit_date_idx ON visit FIELDS visit_date;

        DEFINE TABLE IF NOT EXISTS treatment SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS treatment_visit_idx ON treatment FIELDS visit;

        DEFINE TABLE IF NOT EXISTS service SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS commission SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS commission_period_idx ON commission FIELDS year, month;

        DEFINE TABLE IF NOT EXISTS payment SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS payment_number_idx ON payment FIELDS payment_number UNIQUE;
        DEFINE INDEX IF NOT EXISTS payment_visit_idx ON payment FIELDS visit;

        DEFINE TABLE IF NOT EXISTS leave_request SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS user_username_idx ON user FIELDS username UNIQUE;

        DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
