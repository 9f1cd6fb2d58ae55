//! 序列号生成
//!
//! 人类可读编号（病历号、就诊号、队列号、付款号）的生成与格式化。
//! 每个作用域（全局 / 自然日 / 自然月）对应一行计数器，
//! 由 [`CounterRepository`] 单条 UPSERT 原子自增 —— 并发请求不会撞号。
//!
//! 格式（与前端约定，逐位兼容）：
//! - 病历号 `P-000042`
//! - 就诊号 `V-20250115-0007`
//! - 队列号 裸整数，每日从 1 开始
//! - 付款号 `PAY-202501-0004`

use chrono::NaiveDate;
use chrono_tz::Tz;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{CounterRepository, RepoResult};
use crate::utils::time;

/// Counter scope for the global patient sequence
pub const PATIENT_SCOPE: &str = "patient";

/// Counter scope for a day's visit numbers
pub fn visit_scope(date: NaiveDate) -> String {
    format!("visit-{}", date.format("%Y%m%d"))
}

/// Counter scope for a day's queue numbers
pub fn queue_scope(date: NaiveDate) -> String {
    format!("queue-{}", date.format("%Y%m%d"))
}

/// Counter scope for a month's payment numbers
pub fn payment_scope(date: NaiveDate) -> String {
    format!("payment-{}", date.format("%Y%m"))
}

/// `P-` + 6-digit zero-padded global sequence
pub fn format_patient_number(seq: i64) -> String {
    format!("P-{:06}", seq)
}

/// `V-YYYYMMDD-` + 4-digit zero-padded per-day sequence
pub fn format_visit_number(date: NaiveDate, seq: i64) -> String {
    format!("V-{}-{:04}", date.format("%Y%m%d"), seq)
}

/// `PAY-YYYYMM-` + 4-digit zero-padded per-month sequence
pub fn format_payment_number(date: NaiveDate, seq: i64) -> String {
    format!("PAY-{}-{:04}", date.format("%Y%m"), seq)
}

/// 序列号生成服务
///
/// 日/月作用域按业务时区滚动。
#[derive(Clone)]
pub struct SequenceService {
    counters: CounterRepository,
    tz: Tz,
}

impl std::fmt::Debug for SequenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceService").field("tz", &self.tz).finish()
    }
}

impl SequenceService {
    pub fn new(db: Surreal<Db>, tz: Tz) -> Self {
        Self {
            counters: CounterRepository::new(db),
            tz,
        }
    }

    /// 业务时区的今天
    pub fn today(&self) -> NaiveDate {
        time::today_in(self.tz)
    }

    /// Next patient number, e.g. "P-000042"
    pub async fn next_patient_number(&self) -> RepoResult<String> {
        let seq = self.counters.next(PATIENT_SCOPE).await?;
        Ok(format_patient_number(seq))
    }

    /// Next visit number for today, e.g. "V-20250115-0007"
    pub async fn next_visit_number(&self) -> RepoResult<String> {
        let today = self.today();
        let seq = self.counters.next(&visit_scope(today)).await?;
        Ok(format_visit_number(today, seq))
    }

    /// Next queue number for today (1 if the day is fresh)
    pub async fn next_queue_number(&self) -> RepoResult<i64> {
        let today = self.today();
        self.counters.next(&queue_scope(today)).await
    }

    /// Next payment number for this month, e.g. "PAY-202501-0004"
    pub async fn next_payment_number(&self) -> RepoResult<String> {
        let today = self.today();
        let seq = self.counters.next(&payment_scope(today)).await?;
        Ok(format_payment_number(today, seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn patient_number_is_zero_padded_to_six() {
        assert_eq!(format_patient_number(1), "P-000001");
        assert_eq!(format_patient_number(42), "P-000042");
        assert_eq!(format_patient_number(123456), "P-123456");
    }

    #[test]
    fn visit_number_embeds_date() {
        assert_eq!(format_visit_number(date(2025, 1, 15), 1), "V-20250115-0001");
        assert_eq!(format_visit_number(date(2025, 1, 15), 7), "V-20250115-0007");
        assert_eq!(format_visit_number(date(2025, 12, 3), 42), "V-20251203-0042");
    }

    #[test]
    fn payment_number_embeds_month() {
        assert_eq!(format_payment_number(date(2025, 1, 15), 4), "PAY-202501-0004");
        assert_eq!(format_payment_number(date(2025, 11, 1), 1), "PAY-202511-0001");
    }

    #[test]
    fn scopes_roll_over_with_the_calendar() {
        assert_eq!(visit_scope(date(2025, 1, 15)), "visit-20250115");
        assert_ne!(visit_scope(date(2025, 1, 15)), visit_scope(date(2025, 1, 16)));
        // Queue and visit sequences are independent even on the same day
        assert_ne!(visit_scope(date(2025, 1, 15)), queue_scope(date(2025, 1, 15)));
        // Payment scope only changes with the month
        assert_eq!(
            payment_scope(date(2025, 1, 15)),
            payment_scope(date(2025, 1, 31))
        );
        assert_ne!(
            payment_scope(date(2025, 1, 31)),
            payment_scope(date(2025, 2, 1))
        );
    }
}
