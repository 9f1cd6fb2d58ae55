//! Visit Repository

use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{CompletedVisit, Visit, VisitStatus, Vitals};

/// Fields assembled by the visit service before insertion
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub visit_number: String,
    pub queue_number: i64,
    pub patient: RecordId,
    pub patient_number: String,
    pub patient_name: String,
    pub attendant: RecordId,
    pub attendant_name: String,
    pub chief_complaint: Option<String>,
    pub vitals: Option<Vitals>,
}

/// Display fields of the latest treatment, joined onto completed visits
#[derive(Debug, Deserialize)]
struct LastTreatment {
    #[serde(with = "crate::db::models::serde_helpers::record_id")]
    visit: RecordId,
    diagnosis: Option<String>,
    service_name: Option<String>,
}

#[derive(Clone)]
pub struct VisitRepository {
    base: BaseRepository,
}

impl VisitRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new visit with status WAITING and zero total cost
    pub async fn create(&self, data: NewVisit) -> RepoResult<Visit> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE visit SET
                    visit_number = $visit_number,
                    queue_number = $queue_number,
                    patient = $patient,
                    patient_number = $patient_number,
                    patient_name = $patient_name,
                    attendant = $attendant,
                    attendant_name = $attendant_name,
                    status = 'WAITING',
                    chief_complaint = $chief_complaint,
                    vitals = $vitals,
                    total_cost = 0.0,
                    visit_date = $now,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("visit_number", data.visit_number))
            .bind(("queue_number", data.queue_number))
            .bind(("patient", data.patient))
            .bind(("patient_number", data.patient_number))
            .bind(("patient_name", data.patient_name))
            .bind(("attendant", data.attendant))
            .bind(("attendant_name", data.attendant_name))
            .bind(("chief_complaint", data.chief_complaint))
            .bind(("vitals", data.vitals))
            .bind(("now", now))
            .await?;

        let created: Option<Visit> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create visit".to_string()))
    }

    /// Find visit by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Visit>> {
        let thing = parse_record_id(id)?;
        let visit: Option<Visit> = self.base.db().select(thing).await?;
        Ok(visit)
    }

    /// Today's queue: WAITING / IN_PROGRESS visits inside the day window,
    /// ordered by queue number ascending
    ///
    /// `search` matches visit number, patient name or patient number
    /// (case-insensitive substring).
    pub async fn find_queue(
        &self,
        day_start: i64,
        day_end: i64,
        search: Option<&str>,
    ) -> RepoResult<Vec<Visit>> {
        let q = search.unwrap_or("").trim().to_lowercase();
        let filter = if q.is_empty() {
            ""
        } else {
            r#"AND (string::lowercase(visit_number) CONTAINS $q
                OR string::lowercase(patient_name) CONTAINS $q
                OR string::lowercase(patient_number) CONTAINS $q)"#
        };

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"SELECT * FROM visit
                    WHERE visit_date >= $start AND visit_date < $end
                    AND status IN ['WAITING', 'IN_PROGRESS']
                    {filter}
                    ORDER BY queue_number ASC"#
            ))
            .bind(("start", day_start))
            .bind(("end", day_end))
            .bind(("q", q))
            .await?;

        let visits: Vec<Visit> = result.take(0)?;
        Ok(visits)
    }

    /// Overwrite the status field (legality is checked by the visit service)
    pub async fn update_status(&self, id: &str, status: VisitStatus) -> RepoResult<Visit> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", shared::util::now_millis()))
            .await?;

        result
            .take::<Option<Visit>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Visit {} not found", id)))
    }

    /// Paginated listing, filterable by status and free-text search
    pub async fn find_page(
        &self,
        status: Option<VisitStatus>,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Visit>, u64)> {
        let q = search.unwrap_or("").trim().to_lowercase();
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = $status");
        }
        if !q.is_empty() {
            conditions.push(
                r#"(string::lowercase(visit_number) CONTAINS $q
                    OR string::lowercase(patient_name) CONTAINS $q
                    OR string::lowercase(patient_number) CONTAINS $q)"#,
            );
        }
        let filter = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let start = (page.max(1) - 1) * limit;
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM visit {filter} ORDER BY visit_date DESC LIMIT $limit START $start"
            ))
            .query(format!("SELECT count() FROM visit {filter} GROUP ALL"))
            .bind(("status", status))
            .bind(("q", q))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let visits: Vec<Visit> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((visits, total))
    }

    /// Completed visits with the latest treatment's diagnosis and service
    /// name joined in for display
    pub async fn find_completed_page(
        &self,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<CompletedVisit>, u64)> {
        let q = search.unwrap_or("").trim().to_lowercase();
        let filter = if q.is_empty() {
            ""
        } else {
            r#"AND (string::lowercase(visit_number) CONTAINS $q
                OR string::lowercase(patient_name) CONTAINS $q
                OR string::lowercase(patient_number) CONTAINS $q)"#
        };

        let start = (page.max(1) - 1) * limit;
        let mut result = self
            .base
            .db()
            .query(format!(
                r#"SELECT * FROM visit
                    WHERE status = 'COMPLETED' {filter}
                    ORDER BY visit_date DESC LIMIT $limit START $start"#
            ))
            .query(format!(
                "SELECT count() FROM visit WHERE status = 'COMPLETED' {filter} GROUP ALL"
            ))
            .bind(("q", q))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let visits: Vec<Visit> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);

        // Join the latest treatment per visit in one extra query.
        // Rows come back oldest-first, so later entries overwrite earlier
        // ones and the map ends up holding the most recent treatment.
        let ids: Vec<RecordId> = visits.iter().filter_map(|v| v.id.clone()).collect();
        let mut latest: std::collections::HashMap<String, LastTreatment> =
            std::collections::HashMap::new();
        if !ids.is_empty() {
            let mut result = self
                .base
                .db()
                .query(
                    r#"SELECT visit, diagnosis, service_name FROM treatment
                        WHERE visit IN $ids ORDER BY created_at ASC"#,
                )
                .bind(("ids", ids))
                .await?;
            let treatments: Vec<LastTreatment> = result.take(0)?;
            for t in treatments {
                latest.insert(t.visit.to_string(), t);
            }
        }

        let visits = visits
            .into_iter()
            .map(|visit| {
                let last = visit
                    .id
                    .as_ref()
                    .and_then(|id| latest.get(&id.to_string()));
                CompletedVisit {
                    diagnosis: last.and_then(|t| t.diagnosis.clone()),
                    service_name: last.and_then(|t| t.service_name.clone()),
                    visit,
                }
            })
            .collect();

        Ok((visits, total))
    }
}
