//! Visit Service
//!
//! 挂号流程：解析（或建档）病人 → 生成就诊号/队列号 → 插入就诊记录。
//! 状态流转走封闭状态机，非法跳转返回 422。

use chrono_tz::Tz;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

use crate::db::models::{Patient, PatientCreate, Visit, VisitCreate, VisitStatus};
use crate::db::repository::{PatientRepository, UserRepository, VisitRepository};
use crate::db::repository::visit::NewVisit;
use crate::sequence::SequenceService;
use crate::utils::{AppError, AppResult, time};

#[derive(Clone)]
pub struct VisitService {
    visits: VisitRepository,
    patients: PatientRepository,
    users: UserRepository,
    sequence: SequenceService,
    tz: Tz,
}

impl VisitService {
    pub fn new(db: Surreal<Db>, sequence: SequenceService, tz: Tz) -> Self {
        Self {
            visits: VisitRepository::new(db.clone()),
            patients: PatientRepository::new(db.clone()),
            users: UserRepository::new(db),
            sequence,
            tz,
        }
    }

    /// Create a visit, resolving or registering the patient first
    ///
    /// Patient resolution order:
    /// 1. explicit `patient.id` — not-found error if it does not resolve
    /// 2. `patient.phone` matching an existing patient — reused, no new row
    /// 3. otherwise a new patient is registered with a fresh patient number
    pub async fn create_visit(&self, data: VisitCreate) -> AppResult<Visit> {
        data.validate()?;

        let attendant = self
            .users
            .find_by_id(&data.attendant)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.attendant)))?;
        let attendant_id = attendant
            .id
            .clone()
            .ok_or_else(|| AppError::internal("User record has no id"))?;

        let patient = self.resolve_patient(&data).await?;
        let patient_id = patient
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Patient record has no id"))?;

        let visit_number = self.sequence.next_visit_number().await?;
        let queue_number = self.sequence.next_queue_number().await?;

        let visit = self
            .visits
            .create(NewVisit {
                visit_number,
                queue_number,
                patient: patient_id,
                patient_number: patient.patient_number.clone(),
                patient_name: patient.name.clone(),
                attendant: attendant_id,
                attendant_name: attendant.display_name.clone(),
                chief_complaint: data.chief_complaint,
                vitals: data.vitals,
            })
            .await?;

        tracing::info!(
            visit_number = %visit.visit_number,
            queue_number = visit.queue_number,
            patient_number = %visit.patient_number,
            "Visit created"
        );

        Ok(visit)
    }

    async fn resolve_patient(&self, data: &VisitCreate) -> AppResult<Patient> {
        // 1. Explicit id
        if let Some(ref id) = data.patient.id {
            return self
                .patients
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Patient {} not found", id)));
        }

        // 2. Phone match
        if let Some(ref phone) = data.patient.phone
            && let Some(existing) = self.patients.find_by_phone(phone).await?
        {
            return Ok(existing);
        }

        // 3. Register a new patient
        let name = data
            .patient
            .name
            .clone()
            .ok_or_else(|| AppError::validation("Patient name is required for registration"))?;
        let phone = data
            .patient
            .phone
            .clone()
            .ok_or_else(|| AppError::validation("Patient phone is required for registration"))?;

        let patient_number = self.sequence.next_patient_number().await?;
        let patient = self
            .patients
            .create(
                patient_number,
                PatientCreate {
                    name,
                    birth_date: data.patient.birth_date.clone(),
                    gender: data.patient.gender,
                    phone,
                    address: data.patient.address.clone(),
                    allergy_notes: data.patient.allergy_notes.clone(),
                    emergency_contact: data.patient.emergency_contact.clone(),
                },
            )
            .await?;

        tracing::info!(patient_number = %patient.patient_number, "Patient registered");
        Ok(patient)
    }

    /// Today's queue (WAITING / IN_PROGRESS, ordered by queue number)
    pub async fn queue(&self, search: Option<&str>) -> AppResult<Vec<Visit>> {
        let today = time::today_in(self.tz);
        let start = time::day_start_millis(today, self.tz);
        let end = time::day_end_millis(today, self.tz);
        Ok(self.visits.find_queue(start, end, search).await?)
    }

    /// Transition a visit's status, rejecting illegal jumps
    pub async fn update_status(&self, id: &str, next: VisitStatus) -> AppResult<Visit> {
        let visit = self
            .visits
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Visit {} not found", id)))?;

        if !visit.status.can_transition_to(next) {
            return Err(AppError::business_rule(format!(
                "Illegal status transition {} -> {}",
                visit.status, next
            )));
        }

        Ok(self.visits.update_status(id, next).await?)
    }
}
