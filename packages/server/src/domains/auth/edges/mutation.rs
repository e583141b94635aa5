use juniper::FieldResult;

use crate::domains::auth::actions;
use crate::domains::auth::data::AuthPayload;
use crate::server::error::ApiError;
use crate::server::graphql::context::GraphQLContext;

/// Email a one-time code to `email`
pub async fn request_otp(email: String, ctx: &GraphQLContext) -> FieldResult<bool> {
    actions::request_otp(&email, &ctx.deps)
        .await
        .map_err(ApiError::from)?;
    Ok(true)
}

/// Exchange an emailed code for a session token
///
/// Unknown, used, expired and wrong codes all fail with the same message.
pub async fn verify_otp(email: String, otp: String, ctx: &GraphQLContext) -> FieldResult<AuthPayload> {
    let session = actions::verify_otp(&email, &otp, &ctx.deps)
        .await
        .map_err(ApiError::from)?;
    Ok(AuthPayload::from(session))
}

/// Exchange a Google ID token for a session token
pub async fn google_login(
    id_token: String,
    client_id: Option<String>,
    ctx: &GraphQLContext,
) -> FieldResult<AuthPayload> {
    let session = actions::google_login(&id_token, client_id.as_deref(), &ctx.deps)
        .await
        .map_err(ApiError::from)?;
    Ok(AuthPayload::from(session))
}
