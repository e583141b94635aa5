use tracing::info;
use uuid::Uuid;

use crate::domains::users::errors::UserError;
use crate::domains::users::models::{NewUser, UpdateUser, User};
use crate::kernel::BaseCredentialStore;

fn trimmed(value: Option<String>, field: &str) -> Result<Option<String>, UserError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Err(UserError::Validation(format!("{} cannot be empty", field))),
        other => Ok(other),
    }
}

/// Create a user. Name and email are required; role defaults to USER.
pub async fn create_user(input: NewUser, store: &dyn BaseCredentialStore) -> Result<User, UserError> {
    let new_user = NewUser {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        role: input.role,
    };
    if new_user.name.is_empty() || new_user.email.is_empty() {
        return Err(UserError::Validation("Name and Email are required".into()));
    }

    let user = store.create_user(&new_user).await?;
    info!(user_id = %user.id, role = %user.role, "User created");
    Ok(user)
}

/// Apply a partial update. Provided fields must not be blank.
pub async fn update_user(
    id: Uuid,
    input: UpdateUser,
    store: &dyn BaseCredentialStore,
) -> Result<User, UserError> {
    let update = UpdateUser {
        name: trimmed(input.name, "Name")?,
        email: trimmed(input.email, "Email")?,
        role: input.role,
    };

    let user = store
        .update_user(id, &update)
        .await?
        .ok_or(UserError::NotFound)?;
    info!(user_id = %user.id, "User updated");
    Ok(user)
}

pub async fn delete_user(id: Uuid, store: &dyn BaseCredentialStore) -> Result<(), UserError> {
    if !store.delete_user(id).await? {
        return Err(UserError::NotFound);
    }
    info!(user_id = %id, "User deleted");
    Ok(())
}
