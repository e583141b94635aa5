//! REST user CRUD.
//!
//! These routes do not check identity; only the GraphQL mutations are
//! restricted to admins.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domains::users::actions;
use crate::domains::users::models::{NewUser, Role, UpdateUser, User};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// POST /users
pub async fn create_user_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_payload())?;

    let input = NewUser {
        name: request.name,
        email: request.email,
        role: request.role,
    };
    let user = actions::create_user(input, state.deps.store.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
pub async fn list_users_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = actions::list_users(state.deps.store.as_ref()).await?;
    Ok(Json(users))
}

/// GET /users/:id
pub async fn get_user_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user_id = actions::parse_user_id(&id)?;
    let user = actions::get_user(user_id, state.deps.store.as_ref()).await?;
    Ok(Json(user))
}

/// PUT /users/:id
pub async fn update_user_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let user_id = actions::parse_user_id(&id)?;
    let Json(update) = payload.map_err(|_| ApiError::invalid_payload())?;

    let user = actions::update_user(user_id, update, state.deps.store.as_ref()).await?;
    Ok(Json(user))
}

/// DELETE /users/:id
pub async fn delete_user_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = actions::parse_user_id(&id)?;
    actions::delete_user(user_id, state.deps.store.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
