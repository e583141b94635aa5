// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{
    BaseCredentialStore, BaseEmailService, BaseIdentityVerifier, ServerDeps, StoreError,
    StoreResult,
};
use crate::domains::auth::models::Otp;
use crate::domains::auth::JwtService;
use crate::domains::users::models::{NewUser, UpdateUser, User};

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";
pub const TEST_GOOGLE_CLIENT_ID: &str = "test-client-id";

// =============================================================================
// In-memory Credential Store
// =============================================================================

/// Credential store backed by vectors, with switches to fail the best-effort writes
pub struct InMemoryCredentialStore {
    otps: Mutex<Vec<Otp>>,
    users: Mutex<Vec<User>>,
    fail_increment: AtomicBool,
    fail_mark_used: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            otps: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            fail_increment: AtomicBool::new(false),
            fail_mark_used: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Make `increment_otp_attempts` fail
    pub fn fail_increment(self) -> Self {
        self.fail_increment.store(true, Ordering::SeqCst);
        self
    }

    /// Make `mark_otp_used` fail
    pub fn fail_mark_used(self) -> Self {
        self.fail_mark_used.store(true, Ordering::SeqCst);
        self
    }

    /// Make every lookup fail, as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail_reads.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a user directly (fixture helper)
    pub fn with_user(self, name: &str, email: &str, role: crate::domains::users::models::Role) -> Self {
        self.users.lock().unwrap().push(User {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        });
        self
    }

    /// Snapshot of an OTP record by id
    pub fn otp(&self, id: Uuid) -> Option<Otp> {
        self.otps.lock().unwrap().iter().find(|o| o.id == id).cloned()
    }

    /// All OTP records for an email, oldest first
    pub fn otps_for(&self, email: &str) -> Vec<Otp> {
        self.otps
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.email == email)
            .cloned()
            .collect()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Internal(anyhow::anyhow!("store unavailable")));
        }
        Ok(())
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCredentialStore for InMemoryCredentialStore {
    async fn insert_otp(&self, otp: &Otp) -> StoreResult<Otp> {
        self.check_available()?;
        self.otps.lock().unwrap().push(otp.clone());
        Ok(otp.clone())
    }

    async fn find_latest_otp(&self, email: &str) -> StoreResult<Option<Otp>> {
        self.check_available()?;
        let otps = self.otps.lock().unwrap();
        Ok(otps
            .iter()
            .filter(|o| o.email == email)
            .max_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)))
            .cloned())
    }

    async fn increment_otp_attempts(&self, id: Uuid) -> StoreResult<()> {
        if self.fail_increment.load(Ordering::SeqCst) {
            return Err(StoreError::Internal(anyhow::anyhow!("increment failed")));
        }
        if let Some(otp) = self.otps.lock().unwrap().iter_mut().find(|o| o.id == id) {
            otp.attempt_count += 1;
        }
        Ok(())
    }

    async fn mark_otp_used(&self, id: Uuid) -> StoreResult<()> {
        if self.fail_mark_used.load(Ordering::SeqCst) {
            return Err(StoreError::Internal(anyhow::anyhow!("mark used failed")));
        }
        if let Some(otp) = self.otps.lock().unwrap().iter_mut().find(|o| o.id == id) {
            otp.is_used = true;
        }
        Ok(())
    }

    async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("idx_users_email".to_string()));
        }
        let created = User {
            id: Uuid::now_v7(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_user(&self, id: Uuid, update: &UpdateUser) -> StoreResult<Option<User>> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &update.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict("idx_users_email".to_string()));
            }
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

pub struct MockEmailService {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A service whose every delivery fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// All (recipient, code) pairs delivered so far
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Most recent code delivered to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send_otp(&self, to: &str, code: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("SMTP relay refused the message");
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

// =============================================================================
// Mock Identity Verifier
// =============================================================================

/// Accepts only the (token, audience) pairs it was told about
pub struct MockIdentityVerifier {
    tokens: HashMap<(String, String), String>,
    calls: Mutex<Vec<String>>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_token(mut self, id_token: &str, audience: &str, email: &str) -> Self {
        self.tokens.insert(
            (id_token.to_string(), audience.to_string()),
            email.to_string(),
        );
        self
    }

    /// Tokens that reached the verifier
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockIdentityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityVerifier for MockIdentityVerifier {
    async fn verify_id_token(&self, id_token: &str, audience: &str) -> Result<String> {
        self.calls.lock().unwrap().push(id_token.to_string());
        self.tokens
            .get(&(id_token.to_string(), audience.to_string()))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("failed to validate id token"))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub store: Arc<InMemoryCredentialStore>,
    pub email_service: Arc<MockEmailService>,
    pub identity_verifier: Arc<MockIdentityVerifier>,
    pub jwt_service: Arc<JwtService>,
    pub identity_bypass_token: Option<String>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryCredentialStore::new()),
            email_service: Arc::new(MockEmailService::new()),
            identity_verifier: Arc::new(MockIdentityVerifier::new()),
            jwt_service: Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
            )),
            identity_bypass_token: None,
        }
    }

    /// Set a custom credential store
    pub fn mock_store(mut self, store: InMemoryCredentialStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Set a custom email service
    pub fn mock_email(mut self, service: MockEmailService) -> Self {
        self.email_service = Arc::new(service);
        self
    }

    /// Set a custom identity verifier
    pub fn mock_identity(mut self, verifier: MockIdentityVerifier) -> Self {
        self.identity_verifier = Arc::new(verifier);
        self
    }

    /// Enable the development identity bypass with this sentinel
    pub fn identity_bypass(mut self, token: &str) -> Self {
        self.identity_bypass_token = Some(token.to_string());
        self
    }

    /// Build ServerDeps sharing these mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.store.clone(),
            self.email_service.clone(),
            self.identity_verifier.clone(),
            self.jwt_service.clone(),
            Some(TEST_GOOGLE_CLIENT_ID.to_string()),
            self.identity_bypass_token.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
