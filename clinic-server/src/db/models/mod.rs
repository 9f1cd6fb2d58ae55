//! Database Models

// Serde helpers
pub mod serde_helpers;

// Staff
pub mod user;
pub mod leave_request;

// Clinical flow
pub mod patient;
pub mod visit;
pub mod treatment;

// Catalog
pub mod service;

// Finance
pub mod commission;
pub mod payment;

// Re-exports
pub use user::{StaffRole, User, UserCreate};
pub use leave_request::{LeaveRequest, LeaveRequestCreate, LeaveStatus, LeaveStatusUpdate, LeaveType};
pub use patient::{Gender, Patient, PatientCreate, PatientUpdate};
pub use visit::{
    CompletedVisit, Visit, VisitCreate, VisitPatient, VisitStatus, VisitStatusUpdate, Vitals,
};
pub use treatment::{Treatment, TreatmentCreate};
pub use service::{CatalogService, CatalogServiceCreate, CatalogServiceUpdate};
pub use commission::{Commission, CommissionReport};
pub use payment::{Payment, PaymentCreate, PaymentMethod, PaymentStatus};
