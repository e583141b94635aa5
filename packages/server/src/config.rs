use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Deployment environment. Gates development-only behavior such as the
/// mock identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_production(self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

impl FromStr for AppEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" | "test" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            other => bail!("unknown APP_ENV value: {}", other),
        }
    }
}

/// SMTP settings for OTP delivery. `email` unset means log-only demo mode.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub email: Option<String>,
    pub password: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub app_env: AppEnv,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub smtp: SmtpConfig,
    pub google_client_id: Option<String>,
    /// Sentinel identity token accepted without contacting Google.
    /// Only ever populated outside production.
    pub google_mock_token: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let app_env: AppEnv = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .context("APP_ENV must be development or production")?;

        let google_mock_token =
            identity_bypass_token(app_env, non_empty(env::var("GOOGLE_MOCK_TOKEN").ok()))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            app_env,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "user-management-service".to_string()),
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .context("SMTP_PORT must be a valid number")?,
                email: non_empty(env::var("SMTP_EMAIL").ok()),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            },
            google_client_id: non_empty(env::var("GOOGLE_CLIENT_ID").ok()),
            google_mock_token,
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
        })
    }
}

/// Resolve the mock identity token for the given environment.
///
/// A mock token in production is a configuration error, never silently honored.
pub fn identity_bypass_token(app_env: AppEnv, token: Option<String>) -> Result<Option<String>> {
    match token {
        Some(_) if app_env.is_production() => {
            bail!("GOOGLE_MOCK_TOKEN must not be set when APP_ENV=production")
        }
        other => Ok(other),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
