// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (issuing and verifying codes) lives in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEmailService, BaseCredentialStore)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::auth::models::Otp;
use crate::domains::users::models::{NewUser, UpdateUser, User};
use crate::kernel::store::StoreResult;

// =============================================================================
// Credential Store Trait (Infrastructure - persistence)
// =============================================================================

/// Storage and lookup-by-key for OTP and user records.
///
/// Every method is a single statement against the backing store; there is no
/// transaction spanning calls.
#[async_trait]
pub trait BaseCredentialStore: Send + Sync {
    /// Persist a freshly issued OTP record
    async fn insert_otp(&self, otp: &Otp) -> StoreResult<Otp>;

    /// Most recently created OTP record for an email
    async fn find_latest_otp(&self, email: &str) -> StoreResult<Option<Otp>>;

    /// Add one failed attempt to an OTP record
    async fn increment_otp_attempts(&self, id: Uuid) -> StoreResult<()>;

    /// Flag an OTP record as consumed
    async fn mark_otp_used(&self, id: Uuid) -> StoreResult<()>;

    async fn create_user(&self, user: &NewUser) -> StoreResult<User>;

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Returns `None` when no user has this id
    async fn update_user(&self, id: Uuid, update: &UpdateUser) -> StoreResult<Option<User>>;

    /// Returns whether a user was removed
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;

    /// Liveness check used by the health endpoint
    async fn ping(&self) -> StoreResult<()>;
}

// =============================================================================
// Email Service Trait (Infrastructure - OTP delivery)
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Deliver a one-time code to an email address
    async fn send_otp(&self, to: &str, code: &str) -> Result<()>;
}

// =============================================================================
// Identity Verifier Trait (Infrastructure - external identity provider)
// =============================================================================

#[async_trait]
pub trait BaseIdentityVerifier: Send + Sync {
    /// Validate an externally issued ID token for `audience` and return its verified email
    async fn verify_id_token(&self, id_token: &str, audience: &str) -> Result<String>;
}
