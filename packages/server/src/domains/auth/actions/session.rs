//! Session minting shared by every login flow

use tracing::{info, warn};

use crate::domains::auth::errors::LoginError;
use crate::domains::users::models::{Role, User};
use crate::kernel::{BaseCredentialStore, ServerDeps};

/// Outcome of a successful login
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub role: Role,
    /// The user record for the email, if one exists yet
    pub user: Option<User>,
}

/// Look up the role for `email`.
///
/// Anyone without a user record (or whose lookup fails) gets `Role::User`.
pub async fn resolve_user(email: &str, store: &dyn BaseCredentialStore) -> (Role, Option<User>) {
    match store.find_user_by_email(email).await {
        Ok(Some(user)) => (user.role, Some(user)),
        Ok(None) => (Role::default(), None),
        Err(e) => {
            warn!(email = %email, error = %e, "Role lookup failed, defaulting to USER");
            (Role::default(), None)
        }
    }
}

/// Mint a session token for an email whose ownership has just been proven.
///
/// The email doubles as subject and user id in the claims.
pub async fn start_session(email: &str, deps: &ServerDeps) -> Result<LoginSession, LoginError> {
    let (role, user) = resolve_user(email, deps.store.as_ref()).await;
    mint_session(email, role, user, deps)
}

/// Mint a session token for an already-resolved role
pub(crate) fn mint_session(
    email: &str,
    role: Role,
    user: Option<User>,
    deps: &ServerDeps,
) -> Result<LoginSession, LoginError> {
    let token = deps
        .jwt_service
        .create_token(email, email, role)
        .map_err(LoginError::Token)?;

    info!(email = %email, role = %role, "Session issued");
    Ok(LoginSession { token, role, user })
}
