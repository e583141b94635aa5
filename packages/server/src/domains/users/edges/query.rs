use juniper::FieldResult;
use tracing::info;

use crate::domains::users::actions;
use crate::domains::users::data::UserData;
use crate::domains::users::errors::UserError;
use crate::server::error::ApiError;
use crate::server::graphql::context::GraphQLContext;

/// The user record behind the caller's token, if one exists
pub async fn me(ctx: &GraphQLContext) -> FieldResult<Option<UserData>> {
    let auth_user = ctx.require_auth().map_err(ApiError::from)?;

    let user = actions::get_user_by_email(&auth_user.email, ctx.deps.store.as_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(user.map(UserData::from))
}

/// Get user by ID
pub async fn get_user(id: String, ctx: &GraphQLContext) -> FieldResult<Option<UserData>> {
    ctx.require_auth().map_err(ApiError::from)?;
    info!("get_user query called: {}", id);

    let user_id = actions::parse_user_id(&id).map_err(ApiError::from)?;
    match actions::get_user(user_id, ctx.deps.store.as_ref()).await {
        Ok(user) => Ok(Some(UserData::from(user))),
        Err(UserError::NotFound) => Ok(None),
        Err(e) => Err(ApiError::from(e).into()),
    }
}

/// Get all users (admin only)
pub async fn get_users(ctx: &GraphQLContext) -> FieldResult<Vec<UserData>> {
    ctx.require_admin().map_err(ApiError::from)?;
    info!("get_users query called");

    let users = actions::list_users(ctx.deps.store.as_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(users.into_iter().map(UserData::from).collect())
}
