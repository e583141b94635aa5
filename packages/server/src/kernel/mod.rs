//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod email;
pub mod identity;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use email::{create_email_service, LogEmailService, SmtpEmailService};
pub use identity::GoogleIdentityVerifier;
pub use store::{PostgresCredentialStore, StoreError, StoreResult, STORE_TIMEOUT};
pub use test_dependencies::TestDependencies;
pub use traits::*;
