//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain actions.
//! All external services use trait abstractions to enable testing.
//! Built once at startup from `Config`; nothing in it changes afterwards.

use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseCredentialStore, BaseEmailService, BaseIdentityVerifier};

/// Server dependencies accessible to actions and resolvers
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseCredentialStore>,
    pub email_service: Arc<dyn BaseEmailService>,
    pub identity_verifier: Arc<dyn BaseIdentityVerifier>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    /// Default audience for Google ID tokens
    pub google_client_id: Option<String>,
    /// Development-only sentinel that skips Google verification.
    /// `Config` refuses to produce one in production.
    pub identity_bypass_token: Option<String>,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn BaseCredentialStore>,
        email_service: Arc<dyn BaseEmailService>,
        identity_verifier: Arc<dyn BaseIdentityVerifier>,
        jwt_service: Arc<JwtService>,
        google_client_id: Option<String>,
        identity_bypass_token: Option<String>,
    ) -> Self {
        Self {
            store,
            email_service,
            identity_verifier,
            jwt_service,
            google_client_id,
            identity_bypass_token,
        }
    }
}
