use juniper::FieldResult;
use tracing::info;

use crate::domains::users::actions;
use crate::domains::users::data::UserData;
use crate::domains::users::models::{NewUser, Role, UpdateUser};
use crate::server::error::ApiError;
use crate::server::graphql::context::GraphQLContext;

/// Create a user (admin only)
pub async fn create_user(
    name: String,
    email: String,
    role: Option<Role>,
    ctx: &GraphQLContext,
) -> FieldResult<UserData> {
    let admin = ctx.require_admin().map_err(ApiError::from)?;
    info!(admin = %admin.email, "create_user mutation called");

    let input = NewUser {
        name,
        email,
        role: role.unwrap_or_default(),
    };
    let user = actions::create_user(input, ctx.deps.store.as_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(UserData::from(user))
}

/// Update a user (admin only)
pub async fn update_user(
    id: String,
    name: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    ctx: &GraphQLContext,
) -> FieldResult<UserData> {
    let admin = ctx.require_admin().map_err(ApiError::from)?;
    info!(admin = %admin.email, "update_user mutation called: {}", id);

    let user_id = actions::parse_user_id(&id).map_err(ApiError::from)?;
    let update = UpdateUser { name, email, role };
    let user = actions::update_user(user_id, update, ctx.deps.store.as_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(UserData::from(user))
}

/// Delete a user (admin only)
pub async fn delete_user(id: String, ctx: &GraphQLContext) -> FieldResult<bool> {
    let admin = ctx.require_admin().map_err(ApiError::from)?;
    info!(admin = %admin.email, "delete_user mutation called: {}", id);

    let user_id = actions::parse_user_id(&id).map_err(ApiError::from)?;
    actions::delete_user(user_id, ctx.deps.store.as_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(true)
}
