//! Request OTP action

use chrono::Utc;
use tracing::{error, info};

use super::required;
use crate::domains::auth::errors::LoginError;
use crate::domains::auth::models::Otp;
use crate::domains::auth::otp::generate_otp_code;
use crate::kernel::{BaseCredentialStore, ServerDeps};

/// Generate and persist a fresh code for `email`.
///
/// The caller has already validated `email`. Persistence failures are returned
/// as-is; nothing is retried.
pub async fn issue_otp(email: &str, store: &dyn BaseCredentialStore) -> Result<Otp, LoginError> {
    let otp = Otp::new(email, generate_otp_code(), Utc::now());
    let saved = store.insert_otp(&otp).await?;
    Ok(saved)
}

/// Issue a code for `email` and deliver it.
///
/// If delivery fails the stored code is kept; the client may simply ask again.
pub async fn request_otp(email: &str, deps: &ServerDeps) -> Result<(), LoginError> {
    let email = required(email).ok_or_else(|| LoginError::Validation("Email is required".into()))?;

    let otp = issue_otp(email, deps.store.as_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to save OTP");
        e
    })?;

    if let Err(e) = deps.email_service.send_otp(email, &otp.code).await {
        error!(email = %email, error = %e, "Failed to send OTP email");
        return Err(LoginError::Delivery(e));
    }

    info!(email = %email, otp_id = %otp.id, "OTP issued");
    Ok(())
}
