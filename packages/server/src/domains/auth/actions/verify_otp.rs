//! Verify OTP action

use chrono::Utc;
use tracing::{error, info, warn};

use super::required;
use super::session::{mint_session, resolve_user, LoginSession};
use crate::domains::auth::errors::LoginError;
use crate::domains::users::models::{Role, User};
use crate::kernel::{BaseCredentialStore, ServerDeps};

/// An email whose ownership was just proven
#[derive(Debug, Clone)]
pub struct VerifiedLogin {
    pub email: String,
    pub role: Role,
    pub user: Option<User>,
}

/// Check `code` against the latest code issued for `email`.
///
/// Order of checks: missing, used, expired, mismatch. Only a mismatch writes
/// (attempt count) and only a match consumes the record. Neither write is
/// fatal. Fetch and consume are separate statements, so two concurrent calls
/// with the same fresh code can both succeed.
pub async fn verify_code(
    email: &str,
    code: &str,
    store: &dyn BaseCredentialStore,
) -> Result<VerifiedLogin, LoginError> {
    let otp = store
        .find_latest_otp(email)
        .await?
        .ok_or(LoginError::NotFound)?;

    if otp.is_used {
        return Err(LoginError::AlreadyUsed);
    }

    if otp.is_expired_at(Utc::now()) {
        return Err(LoginError::Expired);
    }

    // Plain equality; not constant-time.
    if otp.code != code {
        if let Err(e) = store.increment_otp_attempts(otp.id).await {
            warn!(otp_id = %otp.id, error = %e, "Failed to record OTP attempt");
        }
        return Err(LoginError::InvalidCode);
    }

    if let Err(e) = store.mark_otp_used(otp.id).await {
        error!(otp_id = %otp.id, error = %e, "Failed to mark OTP as used");
    }

    let (role, user) = resolve_user(email, store).await;
    Ok(VerifiedLogin {
        email: email.to_string(),
        role,
        user,
    })
}

/// Exchange an emailed code for a session token
pub async fn verify_otp(email: &str, code: &str, deps: &ServerDeps) -> Result<LoginSession, LoginError> {
    let (Some(email), Some(code)) = (required(email), required(code)) else {
        return Err(LoginError::Validation("Email and OTP are required".into()));
    };

    let verified = verify_code(email, code, deps.store.as_ref())
        .await
        .map_err(|e| {
            match &e {
                e if e.is_rejection() => info!(email = %email, reason = %e, "OTP rejected"),
                e => error!(email = %email, error = %e, "OTP verification failed"),
            }
            e
        })?;

    mint_session(&verified.email, verified.role, verified.user, deps)
}
