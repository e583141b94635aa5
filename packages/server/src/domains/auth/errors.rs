use thiserror::Error;

use crate::kernel::store::StoreError;

/// Message returned for every rejected credential, whatever the cause
pub const REJECTED_MESSAGE: &str = "Invalid or expired OTP";

/// Failures of the login flows (OTP request, OTP verification, Google sign-in)
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("{0}")]
    Validation(String),

    #[error("No one-time code issued for this email")]
    NotFound,

    #[error("One-time code already used")]
    AlreadyUsed,

    #[error("One-time code expired")]
    Expired,

    #[error("One-time code does not match")]
    InvalidCode,

    #[error("Identity token rejected: {0}")]
    IdentityRejected(String),

    #[error("Failed to deliver one-time code")]
    Delivery(#[source] anyhow::Error),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to mint session token")]
    Token(#[source] anyhow::Error),
}

impl LoginError {
    /// Whether the caller presented credentials that did not check out.
    ///
    /// These all surface to clients as one indistinguishable message.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LoginError::NotFound
                | LoginError::AlreadyUsed
                | LoginError::Expired
                | LoginError::InvalidCode
                | LoginError::IdentityRejected(_)
        )
    }

    /// Text safe to show a client. Internal causes never leak.
    pub fn public_message(&self) -> String {
        match self {
            LoginError::Validation(msg) => msg.clone(),
            LoginError::IdentityRejected(_) => "Invalid Google token".to_string(),
            e if e.is_rejection() => REJECTED_MESSAGE.to_string(),
            LoginError::Delivery(_) => "Failed to send OTP email".to_string(),
            LoginError::Token(_) => "Failed to generate token".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}
