//! Treatment Service
//!
//! 校验 → 计算金额 → 事务写入（治疗 + 就诊总额 + 抽成）。

use chrono::Datelike;
use chrono_tz::Tz;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

use crate::billing;
use crate::db::models::{Treatment, TreatmentCreate};
use crate::db::repository::treatment::NewTreatment;
use crate::db::repository::{ServiceRepository, TreatmentRepository, UserRepository, VisitRepository};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct TreatmentService {
    treatments: TreatmentRepository,
    visits: VisitRepository,
    catalog: ServiceRepository,
    users: UserRepository,
    tz: Tz,
}

impl TreatmentService {
    pub fn new(db: Surreal<Db>, tz: Tz) -> Self {
        Self {
            treatments: TreatmentRepository::new(db.clone()),
            visits: VisitRepository::new(db.clone()),
            catalog: ServiceRepository::new(db.clone()),
            users: UserRepository::new(db),
            tz,
        }
    }

    /// Record a treatment against a visit
    ///
    /// The unit price is copied from the catalog at creation time; the
    /// commission is derived from the service's rate and tagged with the
    /// current month/year in the business timezone.
    pub async fn create(&self, data: TreatmentCreate) -> AppResult<Treatment> {
        data.validate()?;

        let visit = self
            .visits
            .find_by_id(&data.visit)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Visit {} not found", data.visit)))?;
        let visit_id = visit
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Visit record has no id"))?;

        let service = self
            .catalog
            .find_by_id(&data.service)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Service {} not found", data.service)))?;
        let service_id = service
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Service record has no id"))?;

        let performer = self
            .users
            .find_by_id(&data.performer)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.performer)))?;
        let performer_id = performer
            .id
            .clone()
            .ok_or_else(|| AppError::internal("User record has no id"))?;

        billing::validate_charge(service.base_price, data.quantity, data.discount)?;

        let subtotal = billing::line_subtotal(service.base_price, data.quantity, data.discount);
        let commission = billing::commission_amount(subtotal, service.commission_rate);

        let now = chrono::Utc::now().with_timezone(&self.tz);

        let treatment = self
            .treatments
            .create_with_commission(NewTreatment {
                visit: visit_id,
                visit_number: visit.visit_number.clone(),
                service: service_id,
                service_name: service.name.clone(),
                performer: performer_id,
                performer_name: performer.display_name.clone(),
                tooth_number: data.tooth_number,
                diagnosis: data.diagnosis,
                quantity: data.quantity,
                unit_price: service.base_price,
                discount: data.discount,
                subtotal,
                commission_amount: commission,
                commission_rate: service.commission_rate,
                month: now.month(),
                year: now.year(),
            })
            .await?;

        tracing::info!(
            visit_number = %visit.visit_number,
            service = %service.name,
            subtotal = subtotal,
            "Treatment recorded"
        );

        Ok(treatment)
    }
}
