//! Auth domain actions - business logic functions
//!
//! Actions are plain async functions called from both REST handlers and
//! GraphQL mutations.

mod google_login;
mod request_otp;
mod session;
mod verify_otp;

pub use google_login::google_login;
pub use request_otp::{issue_otp, request_otp};
pub use session::{resolve_user, start_session, LoginSession};
pub use verify_otp::{verify_code, verify_otp, VerifiedLogin};

/// Trim and require a non-empty value
pub(crate) fn required(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
