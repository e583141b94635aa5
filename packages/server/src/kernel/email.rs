//! OTP delivery over SMTP (lettre), with a log-only fallback for local development.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SmtpConfig;
use crate::domains::auth::models::OTP_TTL_MINUTES;
use crate::kernel::BaseEmailService;

const OTP_SUBJECT: &str = "Your OTP Code";
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

fn otp_body(code: &str) -> String {
    format!(
        "Your 6-digit verification code is: {}\nThis code expires in {} minutes.",
        code, OTP_TTL_MINUTES
    )
}

/// Sends OTP emails through an authenticated STARTTLS relay
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpEmailService {
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self> {
        let credentials = Credentials::new(username.to_string(), password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .with_context(|| format!("Failed to create SMTP transport for {}", host))?
            .port(port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from_address: username.to_string(),
        })
    }

    fn build_message(&self, to: &str, code: &str) -> Result<Message> {
        Message::builder()
            .from(self.from_address.parse().context("Invalid from address")?)
            .to(to.parse().context("Invalid recipient address")?)
            .subject(OTP_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(otp_body(code))
            .context("Failed to build OTP email")
    }
}

#[async_trait]
impl BaseEmailService for SmtpEmailService {
    async fn send_otp(&self, to: &str, code: &str) -> Result<()> {
        let message = self.build_message(to, code)?;

        self.transport
            .send(message)
            .await
            .context("Failed to send email")?;

        info!(to = %to, "OTP email sent");
        Ok(())
    }
}

/// Demo-mode delivery used when no SMTP account is configured.
///
/// The code is written to the log instead of being mailed.
#[derive(Default)]
pub struct LogEmailService;

#[async_trait]
impl BaseEmailService for LogEmailService {
    async fn send_otp(&self, to: &str, code: &str) -> Result<()> {
        warn!(to = %to, code = %code, "DEMO MODE: SMTP not configured, OTP logged instead of sent");
        Ok(())
    }
}

/// Pick the delivery backend for the given SMTP settings
pub fn create_email_service(smtp: &SmtpConfig) -> Result<Arc<dyn BaseEmailService>> {
    match &smtp.email {
        Some(account) => Ok(Arc::new(SmtpEmailService::new(
            &smtp.host,
            smtp.port,
            account,
            &smtp.password,
        )?)),
        None => {
            warn!("SMTP_EMAIL not set; OTP delivery runs in log-only demo mode");
            Ok(Arc::new(LogEmailService))
        }
    }
}
