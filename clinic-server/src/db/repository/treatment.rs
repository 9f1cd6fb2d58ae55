//! Treatment Repository
//!
//! 治疗写入是一个三步事务：插入治疗、累加就诊总额、插入抽成。
//! 三步在同一个 BEGIN/COMMIT 里，部分失败会整体回滚。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Treatment;

/// Fields assembled by the treatment service before insertion
///
/// All amounts are pre-computed (billing module); the repository only writes.
#[derive(Debug, Clone)]
pub struct NewTreatment {
    pub visit: RecordId,
    pub visit_number: String,
    pub service: RecordId,
    pub service_name: String,
    pub performer: RecordId,
    pub performer_name: String,
    pub tooth_number: Option<String>,
    pub diagnosis: Option<String>,
    pub quantity: i32,
    pub unit_price: f64,
    pub discount: f64,
    pub subtotal: f64,
    pub commission_amount: f64,
    pub commission_rate: f64,
    pub month: u32,
    pub year: i32,
}

#[derive(Clone)]
pub struct TreatmentRepository {
    base: BaseRepository,
}

impl TreatmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert the treatment, bump the visit total and insert the derived
    /// commission — atomically
    pub async fn create_with_commission(&self, data: NewTreatment) -> RepoResult<Treatment> {
        let now = shared::util::now_millis();

        // The final RETURN carries the created treatment; everything else
        // returns NONE. Taken by position from the end of the response.
        let mut result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;

                LET $t = (CREATE ONLY treatment SET
                    visit = $visit,
                    service = $service,
                    service_name = $service_name,
                    performer = $performer,
                    performer_name = $performer_name,
                    tooth_number = $tooth_number,
                    diagnosis = $diagnosis,
                    quantity = $quantity,
                    unit_price = $unit_price,
                    discount = $discount,
                    subtotal = $subtotal,
                    created_at = $now);

                UPDATE $visit SET
                    total_cost += $subtotal,
                    updated_at = $now
                RETURN NONE;

                CREATE commission SET
                    treatment = $t.id,
                    staff = $performer,
                    staff_name = $performer_name,
                    visit_number = $visit_number,
                    amount = $commission_amount,
                    rate = $commission_rate,
                    month = $month,
                    year = $year,
                    created_at = $now
                RETURN NONE;

                RETURN $t;

                COMMIT TRANSACTION;
                "#,
            )
            .bind(("visit", data.visit))
            .bind(("visit_number", data.visit_number))
            .bind(("service", data.service))
            .bind(("service_name", data.service_name))
            .bind(("performer", data.performer))
            .bind(("performer_name", data.performer_name))
            .bind(("tooth_number", data.tooth_number))
            .bind(("diagnosis", data.diagnosis))
            .bind(("quantity", data.quantity))
            .bind(("unit_price", data.unit_price))
            .bind(("discount", data.discount))
            .bind(("subtotal", data.subtotal))
            .bind(("commission_amount", data.commission_amount))
            .bind(("commission_rate", data.commission_rate))
            .bind(("month", data.month))
            .bind(("year", data.year))
            .bind(("now", now))
            .await?;

        let last = result.num_statements().saturating_sub(1);
        let created: Option<Treatment> = result.take(last)?;
        created.ok_or_else(|| RepoError::Database("Failed to create treatment".to_string()))
    }

    /// All treatments of a visit, oldest first
    pub async fn find_by_visit(&self, visit_id: &str) -> RepoResult<Vec<Treatment>> {
        let thing = parse_record_id(visit_id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM treatment WHERE visit = $visit ORDER BY created_at ASC")
            .bind(("visit", thing))
            .await?;

        let treatments: Vec<Treatment> = result.take(0)?;
        Ok(treatments)
    }
}
