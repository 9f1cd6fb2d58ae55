//! Payment Service
//!
//! 收款：生成月度付款号，推导找零和状态（PAID / PARTIAL）。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

use crate::billing;
use crate::db::models::{Payment, PaymentCreate};
use crate::db::repository::payment::NewPayment;
use crate::db::repository::{PaymentRepository, VisitRepository};
use crate::sequence::SequenceService;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    visits: VisitRepository,
    sequence: SequenceService,
}

impl PaymentService {
    pub fn new(db: Surreal<Db>, sequence: SequenceService) -> Self {
        Self {
            payments: PaymentRepository::new(db.clone()),
            visits: VisitRepository::new(db),
            sequence,
        }
    }

    /// Record a payment against a visit
    ///
    /// A visit may carry multiple payments; their sum is not reconciled
    /// against the visit total.
    pub async fn create(&self, data: PaymentCreate) -> AppResult<Payment> {
        data.validate()?;
        billing::validate_payment(data.amount, data.paid_amount)?;

        let visit = self
            .visits
            .find_by_id(&data.visit)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Visit {} not found", data.visit)))?;
        let visit_id = visit
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Visit record has no id"))?;

        let payment_number = self.sequence.next_payment_number().await?;
        let change_amount = billing::change_amount(data.amount, data.paid_amount);
        let status = billing::payment_status(data.amount, data.paid_amount);

        let payment = self
            .payments
            .create(NewPayment {
                payment_number,
                visit: visit_id,
                visit_number: visit.visit_number.clone(),
                patient_name: visit.patient_name.clone(),
                method: data.method,
                amount: data.amount,
                paid_amount: data.paid_amount,
                change_amount,
                status,
                reference: data.reference,
                notes: data.notes,
            })
            .await?;

        tracing::info!(
            payment_number = %payment.payment_number,
            visit_number = %payment.visit_number,
            status = ?payment.status,
            "Payment recorded"
        );

        Ok(payment)
    }
}
