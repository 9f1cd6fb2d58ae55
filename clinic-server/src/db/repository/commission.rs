//! Commission Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, parse_record_id};
use crate::db::models::Commission;

#[derive(Clone)]
pub struct CommissionRepository {
    base: BaseRepository,
}

impl CommissionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Commissions for a period, optionally restricted to one staff member
    pub async fn find_by_period(
        &self,
        staff_id: Option<&str>,
        month: u32,
        year: i32,
    ) -> RepoResult<Vec<Commission>> {
        let staff = match staff_id {
            Some(id) => Some(parse_record_id(id)?),
            None => None,
        };
        let staff_filter = if staff.is_some() {
            "AND staff = $staff"
        } else {
            ""
        };

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"SELECT * FROM commission
                    WHERE month = $month AND year = $year {staff_filter}
                    ORDER BY created_at DESC"#
            ))
            .bind(("month", month))
            .bind(("year", year))
            .bind(("staff", staff))
            .await?;

        let commissions: Vec<Commission> = result.take(0)?;
        Ok(commissions)
    }

    /// All commissions derived from one treatment (normally exactly one)
    pub async fn find_by_treatment(&self, treatment_id: &str) -> RepoResult<Vec<Commission>> {
        let thing = parse_record_id(treatment_id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM commission WHERE treatment = $treatment")
            .bind(("treatment", thing))
            .await?;

        let commissions: Vec<Commission> = result.take(0)?;
        Ok(commissions)
    }
}
