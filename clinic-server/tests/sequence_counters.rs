//! Counter-backed sequence generation against an embedded database.
//!
//! Run: cargo test -p clinic-server --test sequence_counters

use clinic_server::db::DbService;
use clinic_server::db::repository::CounterRepository;
use clinic_server::sequence;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

async fn setup() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("clinic.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap().db;
    (tmp, db)
}

#[tokio::test]
async fn fresh_scope_starts_at_one() {
    let (_tmp, db) = setup().await;
    let counters = CounterRepository::new(db);

    assert_eq!(counters.current("patient").await.unwrap(), 0);
    assert_eq!(counters.next("patient").await.unwrap(), 1);
    assert_eq!(counters.next("patient").await.unwrap(), 2);
    assert_eq!(counters.next("patient").await.unwrap(), 3);
    assert_eq!(counters.current("patient").await.unwrap(), 3);
}

#[tokio::test]
async fn scopes_are_independent() {
    let (_tmp, db) = setup().await;
    let counters = CounterRepository::new(db);

    assert_eq!(counters.next("visit-20250115").await.unwrap(), 1);
    assert_eq!(counters.next("visit-20250115").await.unwrap(), 2);

    // A different day starts over; queue and visit scopes don't share
    assert_eq!(counters.next("visit-20250116").await.unwrap(), 1);
    assert_eq!(counters.next("queue-20250115").await.unwrap(), 1);
    assert_eq!(counters.next("payment-202501").await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_increments_never_collide() {
    let (_tmp, db) = setup().await;
    let counters = CounterRepository::new(db);

    let mut handles = Vec::new();
    for _ in 0..10 {
        let counters = counters.clone();
        handles.push(tokio::spawn(async move {
            counters.next("queue-20250115").await.unwrap()
        }));
    }

    let mut values = Vec::new();
    for handle in handles {
        values.push(handle.await.unwrap());
    }
    values.sort_unstable();

    // All distinct, covering 1..=10 with no gaps
    assert_eq!(values, (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn formatted_numbers_match_the_wire_format() {
    let (_tmp, db) = setup().await;
    let counters = CounterRepository::new(db);
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    // Count 41 → next patient number P-000042
    for _ in 0..41 {
        counters.next(sequence::PATIENT_SCOPE).await.unwrap();
    }
    let seq = counters.next(sequence::PATIENT_SCOPE).await.unwrap();
    assert_eq!(sequence::format_patient_number(seq), "P-000042");

    // 0 prior visits on 2025-01-15 → V-20250115-0001
    let seq = counters.next(&sequence::visit_scope(date)).await.unwrap();
    assert_eq!(sequence::format_visit_number(date, seq), "V-20250115-0001");

    let seq = counters.next(&sequence::payment_scope(date)).await.unwrap();
    assert_eq!(sequence::format_payment_number(date, seq), "PAY-202501-0001");
}
