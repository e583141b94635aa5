use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// How long an issued code stays valid
pub const OTP_TTL_MINUTES: i64 = 10;

/// One-time passcode record
///
/// Records are append-only history: a new request inserts a new row, and
/// verification always reads the newest row for the email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Otp {
    pub id: Uuid,
    pub email: String,
    #[sqlx(rename = "otp")]
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    pub attempt_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    /// Build a fresh, unused record issued at `now`
    pub fn new(email: impl Into<String>, code: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            code: code.into(),
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
            is_used: false,
            attempt_count: 0,
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Otp {
    /// Persist a freshly issued record
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        let otp = sqlx::query_as::<_, Otp>(
            r#"
            INSERT INTO otps (id, email, otp, expires_at, is_used, attempt_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, otp, expires_at, is_used, attempt_count, created_at
            "#,
        )
        .bind(self.id)
        .bind(&self.email)
        .bind(&self.code)
        .bind(self.expires_at)
        .bind(self.is_used)
        .bind(self.attempt_count)
        .bind(self.created_at)
        .fetch_one(pool)
        .await?;
        Ok(otp)
    }

    /// Most recently created record for an email
    pub async fn find_latest_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let otp = sqlx::query_as::<_, Otp>(
            r#"
            SELECT id, email, otp, expires_at, is_used, attempt_count, created_at
            FROM otps
            WHERE email = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;
        Ok(otp)
    }

    pub async fn increment_attempts(id: Uuid, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE otps SET attempt_count = attempt_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Unconditional update by id; concurrent verifications are not serialized here.
    pub async fn mark_used(id: Uuid, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE otps SET is_used = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
