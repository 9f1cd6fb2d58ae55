//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`patients`] - 病人管理接口
//! - [`visits`] - 就诊/排队接口
//! - [`treatments`] - 治疗记录接口
//! - [`services`] - 服务目录接口
//! - [`commissions`] - 抽成报表接口
//! - [`payments`] - 收款接口
//! - [`leave_requests`] - 请假接口
//! - [`users`] - 员工管理接口

pub mod health;

pub mod commissions;
pub mod leave_requests;
pub mod patients;
pub mod payments;
pub mod services;
pub mod treatments;
pub mod users;
pub mod visits;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult, ok};

/// Assemble all resource routers
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(patients::router())
        .merge(visits::router())
        .merge(treatments::router())
        .merge(services::router())
        .merge(commissions::router())
        .merge(payments::router())
        .merge(leave_requests::router())
        .merge(users::router())
}
