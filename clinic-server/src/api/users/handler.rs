//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{User, UserCreate};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult, ok};

/// List active staff members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(ok(users))
}

/// Get user by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(ok(user))
}

/// Create a staff member (password is argon2-hashed, never serialized back)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<ApiResponse<User>>> {
    payload.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;
    Ok(ok(user))
}
