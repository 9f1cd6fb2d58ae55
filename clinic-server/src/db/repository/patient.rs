//! Patient Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Patient, PatientCreate, PatientUpdate};

#[derive(Clone)]
pub struct PatientRepository {
    base: BaseRepository,
}

impl PatientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find patient by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Patient>> {
        let thing = parse_record_id(id)?;
        let patient: Option<Patient> = self.base.db().select(thing).await?;
        Ok(patient)
    }

    /// Find patient by exact phone number (first match)
    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Patient>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM patient WHERE phone = $phone LIMIT 1")
            .bind(("phone", phone.to_string()))
            .await?;
        let patients: Vec<Patient> = result.take(0)?;
        Ok(patients.into_iter().next())
    }

    /// Paginated listing with free-text search over name, number and phone
    pub async fn find_page(
        &self,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Patient>, u64)> {
        let q = search.unwrap_or("").trim().to_lowercase();
        let filter = if q.is_empty() {
            ""
        } else {
            r#"WHERE string::lowercase(name) CONTAINS $q
                OR string::lowercase(patient_number) CONTAINS $q
                OR string::lowercase(phone) CONTAINS $q"#
        };

        let start = (page.max(1) - 1) * limit;
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM patient {filter} ORDER BY created_at DESC LIMIT $limit START $start"
            ))
            .query(format!("SELECT count() FROM patient {filter} GROUP ALL"))
            .bind(("q", q))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let patients: Vec<Patient> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((patients, total))
    }

    /// Create a new patient with a pre-generated patient number
    pub async fn create(&self, patient_number: String, data: PatientCreate) -> RepoResult<Patient> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE patient SET
                    patient_number = $patient_number,
                    name = $name,
                    birth_date = $birth_date,
                    gender = $gender,
                    phone = $phone,
                    address = $address,
                    allergy_notes = $allergy_notes,
                    emergency_contact = $emergency_contact,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("patient_number", patient_number))
            .bind(("name", data.name))
            .bind(("birth_date", data.birth_date))
            .bind(("gender", data.gender))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("allergy_notes", data.allergy_notes))
            .bind(("emergency_contact", data.emergency_contact))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let created: Option<Patient> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create patient".to_string()))
    }

    /// Update contact/medical metadata (patient number is immutable)
    pub async fn update(&self, id: &str, data: PatientUpdate) -> RepoResult<Patient> {
        let thing = parse_record_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Patient {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    birth_date = $birth_date OR birth_date,
                    gender = $gender OR gender,
                    phone = $phone OR phone,
                    address = $address OR address,
                    allergy_notes = $allergy_notes OR allergy_notes,
                    emergency_contact = $emergency_contact OR emergency_contact
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("birth_date", data.birth_date))
            .bind(("gender", data.gender))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("allergy_notes", data.allergy_notes))
            .bind(("emergency_contact", data.emergency_contact))
            .await?;

        result
            .take::<Option<Patient>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Patient {} not found", id)))
    }
}
