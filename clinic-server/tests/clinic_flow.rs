//! End-to-end clinical flow against an embedded database:
//! registration → queue → treatment/commission → payment.
//!
//! Run: cargo test -p clinic-server --test clinic_flow

use chrono_tz::Tz;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

use clinic_server::db::DbService;
use clinic_server::db::models::{
    CatalogServiceCreate, PaymentCreate, PaymentMethod, PaymentStatus, StaffRole, TreatmentCreate,
    UserCreate, VisitCreate, VisitPatient, VisitStatus,
};
use clinic_server::db::repository::{
    CommissionRepository, PatientRepository, ServiceRepository, TreatmentRepository, UserRepository,
    VisitRepository,
};
use clinic_server::sequence::SequenceService;
use clinic_server::services::{PaymentService, TreatmentService, VisitService};
use clinic_server::utils::AppError;

const TZ: Tz = chrono_tz::Asia::Jakarta;

struct TestClinic {
    // Keeps the database directory alive for the duration of the test
    _tmp: TempDir,
    db: Surreal<Db>,
    visits: VisitService,
    treatments: TreatmentService,
    payments: PaymentService,
    nurse_id: String,
    doctor_id: String,
}

async fn setup() -> TestClinic {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("clinic.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap().db;

    let sequence = SequenceService::new(db.clone(), TZ);
    let visits = VisitService::new(db.clone(), sequence.clone(), TZ);
    let treatments = TreatmentService::new(db.clone(), TZ);
    let payments = PaymentService::new(db.clone(), sequence);

    let users = UserRepository::new(db.clone());
    let nurse = users
        .create(UserCreate {
            username: "ns.rina".to_string(),
            password: "rahasia-sekali".to_string(),
            display_name: Some("Ns. Rina".to_string()),
            role: StaffRole::Nurse,
        })
        .await
        .unwrap();
    let doctor = users
        .create(UserCreate {
            username: "drg.sari".to_string(),
            password: "rahasia-sekali".to_string(),
            display_name: Some("drg. Sari".to_string()),
            role: StaffRole::Doctor,
        })
        .await
        .unwrap();

    TestClinic {
        _tmp: tmp,
        db,
        visits,
        treatments,
        payments,
        nurse_id: nurse.id.unwrap().to_string(),
        doctor_id: doctor.id.unwrap().to_string(),
    }
}

fn walk_in(name: &str, phone: &str, attendant: &str) -> VisitCreate {
    VisitCreate {
        patient: VisitPatient {
            id: None,
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            birth_date: None,
            gender: None,
            address: None,
            allergy_notes: None,
            emergency_contact: None,
        },
        attendant: attendant.to_string(),
        chief_complaint: Some("Sakit gigi".to_string()),
        vitals: None,
    }
}

fn today_str() -> String {
    chrono::Utc::now()
        .with_timezone(&TZ)
        .date_naive()
        .format("%Y%m%d")
        .to_string()
}

#[tokio::test]
async fn first_visit_registers_patient_and_opens_queue() {
    let clinic = setup().await;

    let visit = clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();

    assert_eq!(visit.patient_number, "P-000001");
    assert_eq!(visit.visit_number, format!("V-{}-0001", today_str()));
    assert_eq!(visit.queue_number, 1);
    assert_eq!(visit.status, VisitStatus::Waiting);
    assert_eq!(visit.total_cost, 0.0);

    // Fetching right after creation returns the same identifiers
    let repo = VisitRepository::new(clinic.db.clone());
    let fetched = repo
        .find_by_id(&visit.id.clone().unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.visit_number, visit.visit_number);
    assert_eq!(fetched.queue_number, visit.queue_number);
    assert_eq!(fetched.status, VisitStatus::Waiting);
}

#[tokio::test]
async fn phone_match_reuses_existing_patient() {
    let clinic = setup().await;

    let first = clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();
    let second = clinic
        .visits
        .create_visit(walk_in("Ani W.", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();

    // Same patient row, no new registration
    assert_eq!(first.patient, second.patient);
    assert_eq!(second.patient_number, "P-000001");

    // Queue and visit sequences advanced
    assert_eq!(second.queue_number, 2);
    assert_eq!(second.visit_number, format!("V-{}-0002", today_str()));

    let patients = PatientRepository::new(clinic.db.clone());
    let (_, total) = patients.find_page(None, 1, 10).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn explicit_patient_id_must_resolve() {
    let clinic = setup().await;

    let mut payload = walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id);
    payload.patient.id = Some("patient:doesnotexist".to_string());

    let err = clinic.visits.create_visit(payload).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn queue_lists_waiting_visits_in_order() {
    let clinic = setup().await;

    clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();
    clinic
        .visits
        .create_visit(walk_in("Budi Santoso", "081298765432", &clinic.nurse_id))
        .await
        .unwrap();

    let queue = clinic.visits.queue(None).await.unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].queue_number, 1);
    assert_eq!(queue[1].queue_number, 2);

    // Case-insensitive substring filter on patient name
    let filtered = clinic.visits.queue(Some("budi")).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].patient_name, "Budi Santoso");

    // Completed/cancelled visits leave the queue
    let first_id = queue[0].id.clone().unwrap().to_string();
    clinic
        .visits
        .update_status(&first_id, VisitStatus::Cancelled)
        .await
        .unwrap();
    let queue = clinic.visits.queue(None).await.unwrap();
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn status_machine_rejects_illegal_transitions() {
    let clinic = setup().await;

    let visit = clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();
    let id = visit.id.clone().unwrap().to_string();

    // WAITING -> COMPLETED skips IN_PROGRESS
    let err = clinic
        .visits
        .update_status(&id, VisitStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let visit = clinic
        .visits
        .update_status(&id, VisitStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(visit.status, VisitStatus::InProgress);

    let visit = clinic
        .visits
        .update_status(&id, VisitStatus::Completed)
        .await
        .unwrap();
    assert_eq!(visit.status, VisitStatus::Completed);

    // COMPLETED is terminal
    let err = clinic
        .visits
        .update_status(&id, VisitStatus::Waiting)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn treatment_accumulates_total_and_derives_commission() {
    let clinic = setup().await;

    let catalog = ServiceRepository::new(clinic.db.clone());
    let scaling = catalog
        .create(CatalogServiceCreate {
            name: "Scaling".to_string(),
            category: Some("Preventive".to_string()),
            base_price: 100_000.0,
            commission_rate: 10.0,
        })
        .await
        .unwrap();

    let visit = clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();
    let visit_id = visit.id.clone().unwrap().to_string();

    let treatment = clinic
        .treatments
        .create(TreatmentCreate {
            visit: visit_id.clone(),
            service: scaling.id.clone().unwrap().to_string(),
            performer: clinic.doctor_id.clone(),
            tooth_number: Some("36".to_string()),
            diagnosis: Some("Calculus".to_string()),
            quantity: 2,
            discount: 10_000.0,
        })
        .await
        .unwrap();

    // subtotal = 100000 * 2 - 10000
    assert_eq!(treatment.unit_price, 100_000.0);
    assert_eq!(treatment.subtotal, 190_000.0);

    let visits = VisitRepository::new(clinic.db.clone());
    let reloaded = visits.find_by_id(&visit_id).await.unwrap().unwrap();
    assert_eq!(reloaded.total_cost, 190_000.0);

    // Commission was written in the same transaction, tagged with the current period
    let commissions = CommissionRepository::new(clinic.db.clone());
    let rows = commissions
        .find_by_treatment(&treatment.id.clone().unwrap().to_string())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 19_000.0);
    assert_eq!(rows[0].rate, 10.0);
    let now = chrono::Utc::now().with_timezone(&TZ);
    use chrono::Datelike;
    assert_eq!(rows[0].month, now.month());
    assert_eq!(rows[0].year, now.year());

    // A second treatment accumulates on top
    clinic
        .treatments
        .create(TreatmentCreate {
            visit: visit_id.clone(),
            service: scaling.id.clone().unwrap().to_string(),
            performer: clinic.doctor_id.clone(),
            tooth_number: None,
            diagnosis: None,
            quantity: 1,
            discount: 0.0,
        })
        .await
        .unwrap();
    let reloaded = visits.find_by_id(&visit_id).await.unwrap().unwrap();
    assert_eq!(reloaded.total_cost, 290_000.0);

    let treatments = TreatmentRepository::new(clinic.db.clone());
    assert_eq!(treatments.find_by_visit(&visit_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn treatment_requires_existing_visit_and_service() {
    let clinic = setup().await;

    let err = clinic
        .treatments
        .create(TreatmentCreate {
            visit: "visit:doesnotexist".to_string(),
            service: "service:doesnotexist".to_string(),
            performer: clinic.doctor_id.clone(),
            tooth_number: None,
            diagnosis: None,
            quantity: 1,
            discount: 0.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn payments_derive_change_and_status() {
    let clinic = setup().await;

    let visit = clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();
    let visit_id = visit.id.clone().unwrap().to_string();
    let month = chrono::Utc::now()
        .with_timezone(&TZ)
        .date_naive()
        .format("%Y%m")
        .to_string();

    let paid = clinic
        .payments
        .create(PaymentCreate {
            visit: visit_id.clone(),
            method: PaymentMethod::Cash,
            amount: 190_000.0,
            paid_amount: 200_000.0,
            reference: None,
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(paid.payment_number, format!("PAY-{}-0001", month));
    assert_eq!(paid.change_amount, 10_000.0);
    assert_eq!(paid.status, PaymentStatus::Paid);
    assert_eq!(paid.visit_number, visit.visit_number);
    assert_eq!(paid.patient_name, "Ani Wijaya");

    // Underpayment: no change, PARTIAL status; the visit accepts multiple payments
    let partial = clinic
        .payments
        .create(PaymentCreate {
            visit: visit_id.clone(),
            method: PaymentMethod::Qris,
            amount: 190_000.0,
            paid_amount: 100_000.0,
            reference: Some("QR-123".to_string()),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(partial.payment_number, format!("PAY-{}-0002", month));
    assert_eq!(partial.change_amount, 0.0);
    assert_eq!(partial.status, PaymentStatus::Partial);

    // Per-visit listing is newest-first
    let repo = clinic_server::db::repository::PaymentRepository::new(clinic.db.clone());
    let history = repo.find_by_visit(&visit_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].payment_number, partial.payment_number);
}

#[tokio::test]
async fn payment_requires_existing_visit() {
    let clinic = setup().await;

    let err = clinic
        .payments
        .create(PaymentCreate {
            visit: "visit:doesnotexist".to_string(),
            method: PaymentMethod::Cash,
            amount: 1_000.0,
            paid_amount: 1_000.0,
            reference: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn completed_history_carries_latest_treatment_info() {
    let clinic = setup().await;

    let catalog = ServiceRepository::new(clinic.db.clone());
    let scaling = catalog
        .create(CatalogServiceCreate {
            name: "Scaling".to_string(),
            category: None,
            base_price: 100_000.0,
            commission_rate: 10.0,
        })
        .await
        .unwrap();

    let visit = clinic
        .visits
        .create_visit(walk_in("Ani Wijaya", "081234567890", &clinic.nurse_id))
        .await
        .unwrap();
    let visit_id = visit.id.clone().unwrap().to_string();

    clinic
        .treatments
        .create(TreatmentCreate {
            visit: visit_id.clone(),
            service: scaling.id.clone().unwrap().to_string(),
            performer: clinic.doctor_id.clone(),
            tooth_number: None,
            diagnosis: Some("Calculus".to_string()),
            quantity: 1,
            discount: 0.0,
        })
        .await
        .unwrap();

    clinic
        .visits
        .update_status(&visit_id, VisitStatus::InProgress)
        .await
        .unwrap();
    clinic
        .visits
        .update_status(&visit_id, VisitStatus::Completed)
        .await
        .unwrap();

    let visits = VisitRepository::new(clinic.db.clone());
    let (completed, total) = visits.find_completed_page(None, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(completed[0].diagnosis.as_deref(), Some("Calculus"));
    assert_eq!(completed[0].service_name.as_deref(), Some("Scaling"));
}
