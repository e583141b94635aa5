//! Google sign-in action

use tracing::{error, info, warn};

use super::required;
use super::session::{start_session, LoginSession};
use crate::domains::auth::errors::LoginError;
use crate::kernel::ServerDeps;

/// Email returned for the development bypass token
pub const BYPASS_EMAIL: &str = "test@gmail.com";

/// Exchange a Google ID token for a session token.
///
/// `client_id` overrides the configured audience. When the deployment has a
/// bypass token configured (never in production) and `id_token` equals it,
/// Google is not contacted.
pub async fn google_login(
    id_token: &str,
    client_id: Option<&str>,
    deps: &ServerDeps,
) -> Result<LoginSession, LoginError> {
    let id_token =
        required(id_token).ok_or_else(|| LoginError::Validation("ID token is required".into()))?;

    let email = if deps.identity_bypass_token.as_deref() == Some(id_token) {
        warn!("Identity bypass token used; skipping Google verification");
        BYPASS_EMAIL.to_string()
    } else {
        let audience = client_id
            .and_then(required)
            .or(deps.google_client_id.as_deref())
            .ok_or_else(|| LoginError::Validation("Client ID is required".into()))?;

        deps.identity_verifier
            .verify_id_token(id_token, audience)
            .await
            .map_err(|e| {
                error!(error = %e, "Google token validation failed");
                LoginError::IdentityRejected(e.to_string())
            })?
    };

    info!(email = %email, "Google identity verified");
    start_session(&email, deps).await
}
