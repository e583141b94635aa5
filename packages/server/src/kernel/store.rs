//! PostgreSQL-backed credential store.
//!
//! Each call delegates to a model query and is bounded by `STORE_TIMEOUT`;
//! an elapsed timeout fails the call instead of blocking the request.

use async_trait::async_trait;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::domains::auth::models::Otp;
use crate::domains::users::models::{NewUser, UpdateUser, User};
use crate::kernel::BaseCredentialStore;

/// Upper bound for any single store operation
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Run a store operation under `limit`, classifying its failure.
pub async fn bounded<T, F>(limit: Duration, operation: F) -> StoreResult<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(classify(e)),
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

fn classify(error: anyhow::Error) -> StoreError {
    if let Some(sqlx::Error::Database(db_err)) = error.downcast_ref::<sqlx::Error>() {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return StoreError::Conflict(constraint);
        }
    }
    StoreError::Internal(error)
}

/// Credential store over a shared Postgres pool
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            timeout: STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseCredentialStore for PostgresCredentialStore {
    async fn insert_otp(&self, otp: &Otp) -> StoreResult<Otp> {
        bounded(self.timeout, otp.insert(&self.pool)).await
    }

    async fn find_latest_otp(&self, email: &str) -> StoreResult<Option<Otp>> {
        bounded(self.timeout, Otp::find_latest_by_email(email, &self.pool)).await
    }

    async fn increment_otp_attempts(&self, id: Uuid) -> StoreResult<()> {
        bounded(self.timeout, Otp::increment_attempts(id, &self.pool)).await
    }

    async fn mark_otp_used(&self, id: Uuid) -> StoreResult<()> {
        bounded(self.timeout, Otp::mark_used(id, &self.pool)).await
    }

    async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        bounded(self.timeout, User::create(user, &self.pool)).await
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        bounded(self.timeout, User::find_by_id(id, &self.pool)).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        bounded(self.timeout, User::find_by_email(email, &self.pool)).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        bounded(self.timeout, User::find_all(&self.pool)).await
    }

    async fn update_user(&self, id: Uuid, update: &UpdateUser) -> StoreResult<Option<User>> {
        bounded(self.timeout, User::update(id, update, &self.pool)).await
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        bounded(self.timeout, User::delete(id, &self.pool)).await
    }

    async fn ping(&self) -> StoreResult<()> {
        bounded(self.timeout, async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
        .await
    }
}
