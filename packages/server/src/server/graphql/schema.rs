//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldResult, RootNode};

use crate::domains::auth::data::AuthPayload;
use crate::domains::auth::edges::mutation as auth_mutation;
use crate::domains::users::data::UserData;
use crate::domains::users::edges::{mutation as user_mutation, query as user_query};
use crate::domains::users::models::Role;

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // User Queries
    // =========================================================================

    /// The user record for the current session token
    async fn me(ctx: &GraphQLContext) -> FieldResult<Option<UserData>> {
        user_query::me(ctx).await
    }

    /// Get a user by ID (requires authentication)
    async fn user(ctx: &GraphQLContext, id: String) -> FieldResult<Option<UserData>> {
        user_query::get_user(id, ctx).await
    }

    /// List all users (admin only)
    async fn users(ctx: &GraphQLContext) -> FieldResult<Vec<UserData>> {
        user_query::get_users(ctx).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Auth Mutations
    // =========================================================================

    /// Email a one-time login code
    async fn request_otp(ctx: &GraphQLContext, email: String) -> FieldResult<bool> {
        auth_mutation::request_otp(email, ctx).await
    }

    /// Exchange a one-time code for a session token
    async fn verify_otp(ctx: &GraphQLContext, email: String, otp: String) -> FieldResult<AuthPayload> {
        auth_mutation::verify_otp(email, otp, ctx).await
    }

    /// Exchange a Google ID token for a session token
    async fn google_login(
        ctx: &GraphQLContext,
        id_token: String,
        client_id: Option<String>,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::google_login(id_token, client_id, ctx).await
    }

    // =========================================================================
    // User Mutations (admin only)
    // =========================================================================

    async fn create_user(
        ctx: &GraphQLContext,
        name: String,
        email: String,
        role: Option<Role>,
    ) -> FieldResult<UserData> {
        user_mutation::create_user(name, email, role, ctx).await
    }

    async fn update_user(
        ctx: &GraphQLContext,
        id: String,
        name: Option<String>,
        email: Option<String>,
        role: Option<Role>,
    ) -> FieldResult<UserData> {
        user_mutation::update_user(id, name, email, role, ctx).await
    }

    async fn delete_user(ctx: &GraphQLContext, id: String) -> FieldResult<bool> {
        user_mutation::delete_user(id, ctx).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
