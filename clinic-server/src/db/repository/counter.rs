//! Counter Repository
//!
//! 每个序列作用域一行计数器，单条 UPSERT 原子自增。
//! 并发请求拿到的值互不相同；新作用域从 1 开始。

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Debug, Deserialize)]
struct CounterRow {
    value: i64,
}

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
}

impl CounterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically increment the counter for `scope` and return the new value
    ///
    /// Scope keys: `patient`, `visit-YYYYMMDD`, `queue-YYYYMMDD`, `payment-YYYYMM`.
    pub async fn next(&self, scope: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT type::thing('counter', $scope) SET value += 1, updated_at = $now RETURN AFTER",
            )
            .bind(("scope", scope.to_string()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let rows: Vec<CounterRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|r| r.value)
            .ok_or_else(|| RepoError::Database(format!("Counter upsert for '{}' returned no row", scope)))
    }

    /// Current counter value without incrementing (0 if the scope is fresh)
    pub async fn current(&self, scope: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT value FROM type::thing('counter', $scope)")
            .bind(("scope", scope.to_string()))
            .await?;

        let rows: Vec<CounterRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(|r| r.value).unwrap_or(0))
    }
}
