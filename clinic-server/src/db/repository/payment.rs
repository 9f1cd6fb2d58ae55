//! Payment Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Payment, PaymentMethod, PaymentStatus};

/// Fields assembled by the payment service before insertion
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payment_number: String,
    pub visit: RecordId,
    pub visit_number: String,
    pub patient_name: String,
    pub method: PaymentMethod,
    pub amount: f64,
    pub paid_amount: f64,
    pub change_amount: f64,
    pub status: PaymentStatus,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a payment record
    pub async fn create(&self, data: NewPayment) -> RepoResult<Payment> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE payment SET
                    payment_number = $payment_number,
                    visit = $visit,
                    visit_number = $visit_number,
                    patient_name = $patient_name,
                    method = $method,
                    amount = $amount,
                    paid_amount = $paid_amount,
                    change_amount = $change_amount,
                    status = $status,
                    reference = $reference,
                    notes = $notes,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("payment_number", data.payment_number))
            .bind(("visit", data.visit))
            .bind(("visit_number", data.visit_number))
            .bind(("patient_name", data.patient_name))
            .bind(("method", data.method))
            .bind(("amount", data.amount))
            .bind(("paid_amount", data.paid_amount))
            .bind(("change_amount", data.change_amount))
            .bind(("status", data.status))
            .bind(("reference", data.reference))
            .bind(("notes", data.notes))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let created: Option<Payment> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Find payment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        let thing = parse_record_id(id)?;
        let payment: Option<Payment> = self.base.db().select(thing).await?;
        Ok(payment)
    }

    /// Paginated listing with free-text search over payment number,
    /// visit number and patient name
    pub async fn find_page(
        &self,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Payment>, u64)> {
        let q = search.unwrap_or("").trim().to_lowercase();
        let filter = if q.is_empty() {
            ""
        } else {
            r#"WHERE string::lowercase(payment_number) CONTAINS $q
                OR string::lowercase(visit_number) CONTAINS $q
                OR string::lowercase(patient_name) CONTAINS $q"#
        };

        let start = (page.max(1) - 1) * limit;
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM payment {filter} ORDER BY created_at DESC LIMIT $limit START $start"
            ))
            .query(format!("SELECT count() FROM payment {filter} GROUP ALL"))
            .bind(("q", q))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let payments: Vec<Payment> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((payments, total))
    }

    /// All payments of a visit, newest first
    pub async fn find_by_visit(&self, visit_id: &str) -> RepoResult<Vec<Payment>> {
        let thing = parse_record_id(visit_id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE visit = $visit ORDER BY created_at DESC")
            .bind(("visit", thing))
            .await?;

        let payments: Vec<Payment> = result.take(0)?;
        Ok(payments)
    }
}
