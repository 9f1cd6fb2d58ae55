//! 业务服务 - 多步写入编排
//!
//! 跨多个 repository 的业务流程放在这里，handler 保持薄：
//!
//! - [`VisitService`] - 挂号（解析/建档病人 + 生成编号 + 插入就诊）、状态流转
//! - [`TreatmentService`] - 治疗 + 抽成的事务写入
//! - [`PaymentService`] - 收款（编号 + 找零 + 状态推导）

pub mod payment_service;
pub mod treatment_service;
pub mod visit_service;

pub use payment_service::PaymentService;
pub use treatment_service::TreatmentService;
pub use visit_service::VisitService;
