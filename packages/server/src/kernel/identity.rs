//! Google ID token verification via the `tokeninfo` endpoint.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::kernel::BaseIdentityVerifier;

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Subset of the claims Google returns for a valid ID token.
///
/// `tokeninfo` encodes numbers and booleans as strings.
#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    pub aud: String,
    pub iss: String,
    pub exp: String,
    pub email: Option<String>,
    pub email_verified: Option<String>,
}

impl TokenInfo {
    /// Check audience, issuer and expiry, then return the verified email
    pub fn verified_email(self, audience: &str, now_unix: i64) -> Result<String> {
        if self.aud != audience {
            bail!("token audience does not match client id");
        }
        if !GOOGLE_ISSUERS.contains(&self.iss.as_str()) {
            bail!("token issuer {} is not Google", self.iss);
        }
        let exp: i64 = self.exp.parse().context("token exp is not a timestamp")?;
        if exp < now_unix {
            bail!("token expired");
        }
        if self.email_verified.as_deref() == Some("false") {
            bail!("email not verified by Google");
        }
        self.email
            .filter(|email| !email.is_empty())
            .context("email not found in google token payload")
    }
}

pub struct GoogleIdentityVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
}

impl GoogleIdentityVerifier {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            tokeninfo_url: GOOGLE_TOKENINFO_URL.to_string(),
        })
    }
}

#[async_trait]
impl BaseIdentityVerifier for GoogleIdentityVerifier {
    async fn verify_id_token(&self, id_token: &str, audience: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .context("Failed to reach Google tokeninfo")?;

        if !response.status().is_success() {
            bail!("failed to validate id token: status {}", response.status());
        }

        let info: TokenInfo = response
            .json()
            .await
            .context("Malformed tokeninfo response")?;

        debug!(aud = %info.aud, "Google token info received");
        info.verified_email(audience, chrono::Utc::now().timestamp())
    }
}
