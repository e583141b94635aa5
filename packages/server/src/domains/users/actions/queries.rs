use uuid::Uuid;

use crate::domains::users::errors::UserError;
use crate::domains::users::models::User;
use crate::kernel::BaseCredentialStore;

pub async fn get_user(id: Uuid, store: &dyn BaseCredentialStore) -> Result<User, UserError> {
    store.find_user(id).await?.ok_or(UserError::NotFound)
}

pub async fn get_user_by_email(
    email: &str,
    store: &dyn BaseCredentialStore,
) -> Result<Option<User>, UserError> {
    Ok(store.find_user_by_email(email).await?)
}

pub async fn list_users(store: &dyn BaseCredentialStore) -> Result<Vec<User>, UserError> {
    Ok(store.list_users().await?)
}

/// Parse a user id from a path or GraphQL argument
pub fn parse_user_id(raw: &str) -> Result<Uuid, UserError> {
    Uuid::parse_str(raw.trim()).map_err(|_| UserError::Validation("Invalid user ID".into()))
}
