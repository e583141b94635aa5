use thiserror::Error;

use crate::kernel::store::StoreError;

/// Failures of user record management
#[derive(Error, Debug)]
pub enum UserError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    NotFound,

    #[error("A user with this email already exists")]
    Conflict,

    /// Display stays generic; the cause is kept as the error source for logs.
    #[error("Internal server error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for UserError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict(_) => UserError::Conflict,
            other => UserError::Store(other),
        }
    }
}
